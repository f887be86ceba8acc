use trellis_core::{
    Blueprint, Registrar, RouteRecord, RouteTable, SequenceEntry, Sequences, TrellisConfig, Verb,
};

/// Registration harness for blueprint trees.
///
/// Walks blueprints into a fresh [`RouteTable`] and [`Sequences`] pair and
/// exposes assertion helpers over the result, so routing tests never need
/// an HTTP stack:
///
/// ```ignore
/// let mut harness = Harness::new();
/// harness.register(&Admin);
/// harness.assert_route(Verb::Get, "/admin/users");
/// harness
///     .assert_view("admin.users", "admin.users")
///     .assert_middleware("admin.users", &["auth"]);
/// ```
pub struct Harness {
    table: RouteTable,
    sequences: Sequences,
    config: TrellisConfig,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(TrellisConfig::default())
    }

    pub fn with_config(config: TrellisConfig) -> Self {
        Self {
            table: RouteTable::new(),
            sequences: Sequences::new(),
            config,
        }
    }

    /// Register a blueprint tree, panicking on failure.
    pub fn register<S>(&mut self, blueprint: &dyn Blueprint<S>) -> &mut Self {
        let mut registrar = Registrar::new(&mut self.table, &mut self.sequences, &self.config);
        if let Err(e) = registrar.register(blueprint) {
            panic!("registration failed: {e}");
        }
        self
    }

    /// Number of routes registered so far.
    pub fn route_count(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn sequences(&self) -> &Sequences {
        &self.sequences
    }

    /// Assert a route exists with the given verb and full path.
    pub fn assert_route(&self, verb: Verb, path: &str) -> &RouteRecord {
        self.table
            .records()
            .iter()
            .find(|record| record.verb == verb && record.path == path)
            .unwrap_or_else(|| {
                panic!(
                    "no {verb} route at {path}\nRegistered routes:\n{}",
                    self.table
                )
            })
    }

    /// Assert a route exists with the given composed name.
    pub fn assert_named(&self, name: &str) -> &RouteRecord {
        self.table.find(name).unwrap_or_else(|| {
            panic!(
                "no route named {name}\nRegistered routes:\n{}",
                self.table
            )
        })
    }

    /// Assert the composed view name of a named route.
    pub fn assert_view(&self, name: &str, view: &str) -> &Self {
        let record = self.assert_named(name);
        assert_eq!(record.view, view, "view mismatch for {name}");
        self
    }

    /// Assert the effective middleware stack of a named route, in order.
    pub fn assert_middleware(&self, name: &str, expected: &[&str]) -> &Self {
        let record = self.assert_named(name);
        assert_eq!(record.middleware, expected, "middleware mismatch for {name}");
        self
    }

    /// Assert a sequence entry was recorded for a blueprint key.
    pub fn assert_sequence(&self, key: &str, group: Option<&str>) -> &SequenceEntry {
        self.sequences
            .lookup(key, group)
            .unwrap_or_else(|| panic!("no sequence entry for key {key} (group {group:?})"))
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
