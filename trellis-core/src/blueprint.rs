use axum::routing::{MethodFilter, MethodRouter};

use crate::config::TrellisConfig;
use crate::scanner::RegisterMode;

/// Stable identity of a blueprint type, usable before an instance exists.
///
/// This is what [`Blueprint::key`] returns by default, so cross-references
/// (sequence groups, sequence lookups) can be written without constructing
/// the referenced blueprint.
pub fn key_of<B>() -> &'static str {
    std::any::type_name::<B>()
}

/// A single node of a declarative route tree.
///
/// A blueprint describes one route or one group of routes: an identifier,
/// optional overrides for the derived route name / view name / URL pieces,
/// the HTTP verb, the action to invoke, middleware to apply or drop, and
/// the nested blueprints that live under it. The [`Registrar`] walks a tree
/// of these and emits the composed result into a router backend; blueprints
/// themselves never touch the network.
///
/// A node with children is a *group*: it contributes a scope (name, URL
/// prefix, middleware) that its subtree inherits. A group may still carry
/// its own action, in which case it registers a concrete route as well.
///
/// `S` is the router state type, matching `axum::Router<S>`.
///
/// [`Registrar`]: crate::registrar::Registrar
pub trait Blueprint<S = ()>: Send + Sync {
    /// Unique identifier, the seed for every derived value.
    ///
    /// The route-name, view-name and URL segments all default to the
    /// normalized identifier when their overrides are unset.
    fn ident(&self) -> &str;

    /// Stable key identifying this blueprint type in sequences and scans.
    fn key(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Route-name segment override. Defaults to the identifier.
    fn name(&self) -> Option<&str> {
        None
    }

    /// View-name segment override. Defaults to the identifier.
    fn view(&self) -> Option<&str> {
        None
    }

    /// URL-prefix segment override, applied when this node is a group.
    /// Defaults to the identifier.
    fn prefix(&self) -> Option<&str> {
        None
    }

    /// URL segment override for this node's own route. Used verbatim,
    /// while the default is the identifier normalized with the URL
    /// segment delimiter.
    fn segment(&self) -> Option<&str> {
        None
    }

    /// Full URL override for this node's own route, bypassing segment
    /// derivation and the variables suffix.
    fn raw_path(&self) -> Option<&str> {
        None
    }

    /// HTTP verb of this node's own route.
    fn verb(&self) -> Verb {
        Verb::Get
    }

    /// The action this route invokes, resolved late through the backend's
    /// handler registry. When `None`, [`Blueprint::endpoint`] is consulted.
    fn action(&self) -> Option<Action> {
        None
    }

    /// Controller applied to [`Action::Named`] actions of this node and,
    /// by inheritance, of every descendant that does not set its own.
    fn controller(&self) -> Option<&str> {
        None
    }

    /// Host this route (and its subtree) is bound to. Carried through to
    /// the emitted descriptors; backends decide whether they can enforce it.
    fn domain(&self) -> Option<&str> {
        None
    }

    /// Ordered URL variables appended to the derived URL.
    fn variables(&self) -> Vec<Variable> {
        Vec::new()
    }

    /// Middleware names applied to this route, or to the whole subtree
    /// when this node is a group.
    fn middleware(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Middleware names dropped from the inherited set for this route or
    /// subtree. Excluding a name that was never applied is a no-op.
    fn exclude_middleware(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Nested blueprints registered under this node's scope.
    fn children(&self) -> Vec<Box<dyn Blueprint<S>>> {
        Vec::new()
    }

    /// Inline handler used when no [`Blueprint::action`] is set.
    ///
    /// The returned router is mounted as-is, so it carries its own method;
    /// keep [`Blueprint::verb`] in agreement so listings and sequence
    /// entries reflect what is actually mounted.
    fn endpoint(&self) -> Option<MethodRouter<S>> {
        None
    }

    /// Auto-scan preference. `Some(Pass)` keeps this blueprint out of
    /// top-level registration even when it is placed in the catalog;
    /// `Some(Register)` forces top-level registration even when another
    /// blueprint nests it.
    fn scan_mode(&self) -> Option<RegisterMode> {
        None
    }

    /// Sequence-group override. Defaults follow the group-name mode
    /// configured in [`TrellisConfig`]; see [`crate::sequences`].
    fn sequence_group(&self) -> Option<&'static str> {
        None
    }

    /// A node with children is a group.
    fn is_group(&self) -> bool {
        !self.children().is_empty()
    }
}

/// HTTP verb of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verb {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
            Verb::Options => "OPTIONS",
        }
    }

    /// The axum method filter this verb mounts under.
    pub fn filter(&self) -> MethodFilter {
        match self {
            Verb::Get => MethodFilter::GET,
            Verb::Post => MethodFilter::POST,
            Verb::Put => MethodFilter::PUT,
            Verb::Patch => MethodFilter::PATCH,
            Verb::Delete => MethodFilter::DELETE,
            Verb::Options => MethodFilter::OPTIONS,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a route invokes, before resolution against a handler registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A bare action name. Composed with the controller in effect (own or
    /// inherited from an enclosing group) using the action delimiter, or
    /// used as the registry key directly when no controller applies.
    Named(String),
    /// An explicit controller / method pair, ignoring any inherited
    /// controller.
    Controller { controller: String, method: String },
}

impl Action {
    pub fn named(name: impl Into<String>) -> Self {
        Action::Named(name.into())
    }

    pub fn controller(controller: impl Into<String>, method: impl Into<String>) -> Self {
        Action::Controller {
            controller: controller.into(),
            method: method.into(),
        }
    }
}

/// One URL variable, rendered into the derived URL in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    scope: Option<String>,
    name: String,
}

impl Variable {
    /// `plain("id")` renders as `{id}`.
    pub fn plain(name: impl Into<String>) -> Self {
        Variable {
            scope: None,
            name: name.into(),
        }
    }

    /// `scoped("posts", "id_post")` renders as `posts/{id_post}`.
    pub fn scoped(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Variable {
            scope: Some(scope.into()),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Renders the variable with the configured markers and delimiter.
    pub fn render(&self, config: &TrellisConfig) -> String {
        match &self.scope {
            Some(scope) => format!(
                "{scope}{}{}{}{}",
                config.url_delimiter, config.variable_open, self.name, config.variable_close
            ),
            None => format!(
                "{}{}{}",
                config.variable_open, self.name, config.variable_close
            ),
        }
    }
}
