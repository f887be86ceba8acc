//! Catalog-driven auto-registration.
//!
//! A [`Catalog`] lists every blueprint an application wants registered
//! automatically. [`AutoScanner::scan`] walks the catalog and marks each
//! blueprint that appears as a child of another one as [`RegisterMode::Pass`],
//! so the subsequent [`AutoScanner::register`] pass only starts walks from
//! tree roots and nothing gets mounted twice. A blueprint's own
//! [`scan_mode`] override always beats the marking.
//!
//! [`scan_mode`]: crate::blueprint::Blueprint::scan_mode

use std::collections::HashMap;

use crate::blueprint::Blueprint;
use crate::error::RegisterError;
use crate::registrar::Registrar;

/// How the scanner treats a catalogued blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterMode {
    /// Start a registration walk from this blueprint.
    #[default]
    Register,
    /// Skip it; some other walk already covers it.
    Pass,
}

impl RegisterMode {
    pub fn is_register(self) -> bool {
        matches!(self, RegisterMode::Register)
    }

    pub fn is_pass(self) -> bool {
        matches!(self, RegisterMode::Pass)
    }
}

type BlueprintCtor<S> = Box<dyn Fn() -> Box<dyn Blueprint<S>> + Send + Sync>;

/// The set of blueprints eligible for auto-registration.
pub struct Catalog<S = ()> {
    ctors: Vec<BlueprintCtor<S>>,
}

impl<S> Default for Catalog<S> {
    fn default() -> Self {
        Catalog { ctors: Vec::new() }
    }
}

impl<S> Catalog<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a blueprint type constructible via [`Default`].
    pub fn add<B>(&mut self) -> &mut Self
    where
        B: Blueprint<S> + Default + 'static,
    {
        self.add_with(|| Box::new(B::default()))
    }

    /// Adds a blueprint with an explicit constructor.
    pub fn add_with<F>(&mut self, ctor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Blueprint<S>> + Send + Sync + 'static,
    {
        self.ctors.push(Box::new(ctor));
        self
    }

    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }
}

/// A catalogued blueprint instance plus the mode the scan settled on.
pub struct ScannedEntry<S = ()> {
    blueprint: Box<dyn Blueprint<S>>,
    mode: RegisterMode,
}

impl<S> ScannedEntry<S> {
    pub fn key(&self) -> &str {
        self.blueprint.key()
    }

    pub fn blueprint(&self) -> &dyn Blueprint<S> {
        self.blueprint.as_ref()
    }

    /// Effective mode: the blueprint's own override, else the scan's marking.
    pub fn mode(&self) -> RegisterMode {
        self.blueprint.scan_mode().unwrap_or(self.mode)
    }

    pub fn is_pass(&self) -> bool {
        self.mode().is_pass()
    }

    /// Marks the entry as passed. Without `force` the marking is left alone.
    pub fn to_pass(&mut self, force: bool) {
        if force {
            self.mode = RegisterMode::Pass;
        }
    }

    /// Marks the entry for registration. Without `force` the marking is
    /// left alone.
    pub fn to_register(&mut self, force: bool) {
        if force {
            self.mode = RegisterMode::Register;
        }
    }
}

/// Runs the scan and feeds the surviving entries to a [`Registrar`].
pub struct AutoScanner<S = ()> {
    entries: Vec<ScannedEntry<S>>,
    index: HashMap<String, usize>,
}

impl<S> Default for AutoScanner<S> {
    fn default() -> Self {
        AutoScanner {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S> AutoScanner<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds entries for the whole catalog, pass-marking every blueprint
    /// that shows up as a child of another entry. Only direct children are
    /// marked per entry; a catalog listing every blueprint covers all
    /// levels that way.
    pub fn scan(&mut self, catalog: &Catalog<S>) {
        if catalog.is_empty() {
            tracing::warn!("auto-scan catalog is empty, nothing to register");
            return;
        }
        for ctor in &catalog.ctors {
            let blueprint = ctor();
            let key = blueprint.key().to_string();
            self.mark_children(blueprint.as_ref());
            if self.index.contains_key(&key) {
                continue;
            }
            self.insert(ScannedEntry {
                blueprint,
                mode: RegisterMode::Register,
            });
        }
    }

    /// Registers every entry that is not pass-marked.
    pub fn register(&self, registrar: &mut Registrar<'_, S>) -> Result<(), RegisterError> {
        for entry in &self.entries {
            if entry.is_pass() {
                tracing::debug!(key = entry.key(), "skipping pass-marked blueprint");
                continue;
            }
            registrar.register(entry.blueprint())?;
        }
        Ok(())
    }

    /// Scans and registers the catalog when the configuration enables
    /// auto-scan. Returns whether anything ran.
    pub fn run_if_enabled(
        catalog: &Catalog<S>,
        registrar: &mut Registrar<'_, S>,
    ) -> Result<bool, RegisterError> {
        if !registrar.config().auto_scan {
            return Ok(false);
        }
        let mut scanner = AutoScanner::new();
        scanner.scan(catalog);
        scanner.register(registrar)?;
        Ok(true)
    }

    pub fn entries(&self) -> &[ScannedEntry<S>] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&ScannedEntry<S>> {
        self.index.get(key).map(|&at| &self.entries[at])
    }

    /// Mutable access, for remarking entries between scan and register.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ScannedEntry<S>> {
        self.index.get(key).map(|&at| &mut self.entries[at])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn mark_children(&mut self, blueprint: &dyn Blueprint<S>) {
        for child in blueprint.children() {
            let key = child.key().to_string();
            match self.index.get(&key) {
                Some(&at) => self.entries[at].to_pass(true),
                None => self.insert(ScannedEntry {
                    blueprint: child,
                    mode: RegisterMode::Pass,
                }),
            }
        }
    }

    fn insert(&mut self, entry: ScannedEntry<S>) {
        let key = entry.key().to_string();
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
    }
}
