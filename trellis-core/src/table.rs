//! A recording backend.
//!
//! [`RouteTable`] implements [`Router`] by writing every emitted endpoint
//! down as a [`RouteRecord`] instead of mounting it anywhere. It backs the
//! `trellis routes` listing and most of the test harness, and doubles as
//! the reference for what a real backend should see.

use std::fmt;

use crate::blueprint::Verb;
use crate::error::RegisterError;
use crate::registrar::{effective_middleware, ActionRef, Endpoint, Router, Scope};

/// One registered route, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub verb: Verb,
    /// Scope-flattened URL.
    pub path: String,
    /// Composed route name.
    pub name: String,
    /// Composed view name.
    pub view: String,
    /// Registry key of the action, or `"<inline>"` for inline handlers.
    pub action: String,
    pub domain: Option<String>,
    /// Middleware in effect, scope chain included.
    pub middleware: Vec<String>,
}

/// Collects routes without mounting them.
#[derive(Debug, Default)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    scopes: Vec<Scope>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Looks a record up by its composed route name.
    pub fn find(&self, name: &str) -> Option<&RouteRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<S> Router<S> for RouteTable {
    fn route(&mut self, endpoint: Endpoint<S>) -> Result<(), RegisterError> {
        let action = match &endpoint.action {
            ActionRef::Registry(key) => key.clone(),
            ActionRef::Inline => "<inline>".to_string(),
        };
        self.records.push(RouteRecord {
            verb: endpoint.verb,
            path: endpoint.full_path.clone(),
            name: endpoint.context.name().to_string(),
            view: endpoint.context.view().to_string(),
            action,
            domain: endpoint.domain.clone(),
            middleware: effective_middleware(&self.scopes, &endpoint.middleware, &endpoint.exclude),
        });
        Ok(())
    }

    fn enter_scope(&mut self, scope: Scope) -> Result<(), RegisterError> {
        self.scopes.push(scope);
        Ok(())
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb_width = self
            .records
            .iter()
            .map(|record| record.verb.as_str().len())
            .max()
            .unwrap_or(0);
        let path_width = self
            .records
            .iter()
            .map(|record| record.path.len())
            .max()
            .unwrap_or(0);
        for record in &self.records {
            writeln!(
                f,
                "{:verb_width$}  {:path_width$}  {}",
                record.verb.as_str(),
                record.path,
                record.name,
            )?;
        }
        Ok(())
    }
}
