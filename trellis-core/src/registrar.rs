//! The registration walk.
//!
//! [`Registrar`] drives a depth-first walk over a blueprint tree: it
//! composes the [`Context`] along each path, memoizes a sequence entry per
//! node, resolves inherited controller and domain, and emits the result
//! into a [`Router`] backend as scopes and endpoints. The walk itself never
//! matches URLs or dispatches requests; what happens with the emitted
//! descriptors is entirely the backend's business.

use axum::routing::MethodRouter;

use crate::blueprint::{Action, Blueprint, Verb};
use crate::config::{GroupNameMode, TrellisConfig};
use crate::context::{normalize, Context, TraceFrame};
use crate::error::RegisterError;
use crate::sequences::{SequenceEntry, Sequences};

/// A resolved action reference carried on an [`Endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRef {
    /// Key into the backend's handler registry, with the controller (own
    /// or inherited) already composed in.
    Registry(String),
    /// The blueprint supplied an inline handler; see [`Endpoint::handler`].
    Inline,
}

/// One concrete route emitted by the walk.
pub struct Endpoint<S = ()> {
    pub verb: Verb,
    /// Derived URL of the node itself, relative to the enclosing scope.
    pub path: String,
    /// Scope-flattened URL, ready to mount on a flat router.
    pub full_path: String,
    /// The node's own route-name segment. Empty for a group's own route,
    /// whose name is carried by its scope.
    pub name: String,
    pub action: ActionRef,
    /// Inline handler, present exactly when `action` is [`ActionRef::Inline`].
    pub handler: Option<MethodRouter<S>>,
    /// Effective domain, own or inherited from the nearest ancestor.
    pub domain: Option<String>,
    /// The node's own middleware names.
    pub middleware: Vec<String>,
    /// The node's own excluded middleware names.
    pub exclude: Vec<String>,
    /// Composed context at this node.
    pub context: Context,
}

impl<S> Endpoint<S> {
    /// Key of the blueprint this endpoint was emitted for.
    pub fn blueprint_key(&self) -> &str {
        self.context.last().map(|frame| frame.key.as_str()).unwrap_or_default()
    }
}

/// One group scope emitted by the walk. Guaranteed to be closed by a
/// matching [`Router::exit_scope`], also when registration fails midway.
#[derive(Debug, Clone)]
pub struct Scope {
    /// Key of the group blueprint.
    pub key: String,
    /// The group's own route-name segment.
    pub name: String,
    /// The group's own URL-prefix segment, without delimiters.
    pub prefix: String,
    /// The group's own domain, if any.
    pub domain: Option<String>,
    /// Middleware applied to the whole subtree.
    pub middleware: Vec<String>,
    /// Middleware dropped for the whole subtree.
    pub exclude: Vec<String>,
    /// Composed context at the group node.
    pub context: Context,
}

/// Backend receiving the walk's output.
///
/// Implementations stack scopes: between `enter_scope` and the matching
/// `exit_scope`, every `route` (and nested scope) belongs to that scope.
pub trait Router<S = ()> {
    fn route(&mut self, endpoint: Endpoint<S>) -> Result<(), RegisterError>;
    fn enter_scope(&mut self, scope: Scope) -> Result<(), RegisterError>;
    fn exit_scope(&mut self);
}

/// Middleware set in effect for a route: scope-chain names (outermost
/// first) plus the route's own, de-duplicated preserving first position,
/// minus everything excluded anywhere on the chain or the route itself.
pub fn effective_middleware(
    scopes: &[Scope],
    middleware: &[String],
    exclude: &[String],
) -> Vec<String> {
    let excluded: Vec<&str> = scopes
        .iter()
        .flat_map(|scope| scope.exclude.iter())
        .chain(exclude.iter())
        .map(String::as_str)
        .collect();

    let mut effective: Vec<String> = Vec::new();
    for name in scopes
        .iter()
        .flat_map(|scope| scope.middleware.iter())
        .chain(middleware.iter())
    {
        if excluded.contains(&name.as_str()) {
            continue;
        }
        if effective.iter().any(|present| present == name) {
            continue;
        }
        effective.push(name.clone());
    }
    effective
}

/// Walks blueprint trees into a backend.
pub struct Registrar<'a, S = ()> {
    backend: &'a mut dyn Router<S>,
    sequences: &'a mut Sequences,
    config: &'a TrellisConfig,
}

/// Inherited state flowing parent to child during a walk.
struct Walk {
    context: Context,
    scope_path: String,
    caller: Option<String>,
    group: Option<String>,
    controller: Option<String>,
    domain: Option<String>,
}

/// Everything resolved for the node currently being visited.
struct Facts {
    own_name: String,
    own_prefix: String,
    context: Context,
    group: String,
    controller: Option<String>,
    domain: Option<String>,
}

impl<'a, S> Registrar<'a, S> {
    pub fn new<R>(
        backend: &'a mut R,
        sequences: &'a mut Sequences,
        config: &'a TrellisConfig,
    ) -> Self
    where
        R: Router<S>,
    {
        Registrar {
            backend,
            sequences,
            config,
        }
    }

    pub fn config(&self) -> &TrellisConfig {
        self.config
    }

    /// Registers a blueprint tree, starting from a fresh context.
    pub fn register(&mut self, blueprint: &dyn Blueprint<S>) -> Result<(), RegisterError> {
        tracing::debug!(key = blueprint.key(), "registering blueprint tree");
        self.visit(
            blueprint,
            Walk {
                context: Context::new(),
                scope_path: String::new(),
                caller: None,
                group: None,
                controller: None,
                domain: None,
            },
        )
    }

    fn visit(&mut self, node: &dyn Blueprint<S>, walk: Walk) -> Result<(), RegisterError> {
        let Walk {
            context: mut ctx,
            scope_path,
            caller,
            group: parent_group,
            controller,
            domain,
        } = walk;

        let frame = self.frame(node);
        let own_name = frame.name.clone();
        let own_prefix = frame.prefix.clone();
        ctx.push(frame, self.config);

        let group = self.resolve_group(node, parent_group.as_deref(), caller.as_deref());
        self.sequences.record(SequenceEntry {
            key: node.key().to_string(),
            called_by: caller,
            group: group.clone(),
            name: ctx.name().to_string(),
            view: ctx.view().to_string(),
            prefix: ctx.prefix().to_string(),
            trace: ctx.trace().to_vec(),
        });

        let facts = Facts {
            own_name,
            own_prefix,
            context: ctx,
            group,
            controller: node.controller().map(str::to_owned).or(controller),
            domain: node.domain().map(str::to_owned).or(domain),
        };

        if node.is_group() {
            self.visit_group(node, facts, scope_path)
        } else {
            let endpoint = self.endpoint_for(node, &facts, &scope_path, false)?;
            tracing::trace!(verb = %endpoint.verb, path = %endpoint.full_path, "route");
            self.backend.route(endpoint)
        }
    }

    fn visit_group(
        &mut self,
        node: &dyn Blueprint<S>,
        facts: Facts,
        scope_path: String,
    ) -> Result<(), RegisterError> {
        tracing::debug!(key = node.key(), name = %facts.context.name(), "scope");
        self.backend.enter_scope(Scope {
            key: node.key().to_string(),
            name: facts.own_name.clone(),
            prefix: facts.own_prefix.clone(),
            domain: node.domain().map(str::to_owned),
            middleware: owned(node.middleware()),
            exclude: owned(node.exclude_middleware()),
            context: facts.context.clone(),
        })?;
        let result = self.scope_body(node, &facts, &scope_path);
        self.backend.exit_scope();
        result
    }

    fn scope_body(
        &mut self,
        node: &dyn Blueprint<S>,
        facts: &Facts,
        scope_path: &str,
    ) -> Result<(), RegisterError> {
        // A group with its own action registers a concrete route too. Its
        // URL sits beside the children's prefix, not under it.
        if node.action().is_some() || node.endpoint().is_some() {
            let endpoint = self.endpoint_for(node, facts, scope_path, true)?;
            tracing::trace!(verb = %endpoint.verb, path = %endpoint.full_path, "route");
            self.backend.route(endpoint)?;
        }

        let child_scope = format!(
            "{scope_path}{}{}",
            self.config.url_delimiter, facts.own_prefix
        );
        for child in node.children() {
            self.visit(
                child.as_ref(),
                Walk {
                    context: facts.context.clone(),
                    scope_path: child_scope.clone(),
                    caller: Some(node.key().to_string()),
                    group: Some(facts.group.clone()),
                    controller: facts.controller.clone(),
                    domain: facts.domain.clone(),
                },
            )?;
        }
        Ok(())
    }

    fn endpoint_for(
        &self,
        node: &dyn Blueprint<S>,
        facts: &Facts,
        scope_path: &str,
        scoped: bool,
    ) -> Result<Endpoint<S>, RegisterError> {
        let (action, handler) = self.resolve_action(node, facts.controller.as_deref())?;
        let path = self.own_url(node);
        let full_path = format!("{scope_path}{path}");
        // A scoped endpoint is a group's own route: name and middleware
        // already travel on the scope it just opened.
        Ok(Endpoint {
            verb: node.verb(),
            path,
            full_path,
            name: if scoped {
                String::new()
            } else {
                facts.own_name.clone()
            },
            action,
            handler,
            domain: facts.domain.clone(),
            middleware: if scoped { Vec::new() } else { owned(node.middleware()) },
            exclude: if scoped {
                Vec::new()
            } else {
                owned(node.exclude_middleware())
            },
            context: facts.context.clone(),
        })
    }

    fn resolve_action(
        &self,
        node: &dyn Blueprint<S>,
        controller: Option<&str>,
    ) -> Result<(ActionRef, Option<MethodRouter<S>>), RegisterError> {
        let delimiter = &self.config.action_delimiter;
        match node.action() {
            Some(Action::Controller { controller, method }) => Ok((
                ActionRef::Registry(format!("{controller}{delimiter}{method}")),
                None,
            )),
            Some(Action::Named(name)) => Ok(match controller {
                Some(ctrl) => (ActionRef::Registry(format!("{ctrl}{delimiter}{name}")), None),
                None => (ActionRef::Registry(name), None),
            }),
            None => match node.endpoint() {
                Some(handler) => Ok((ActionRef::Inline, Some(handler))),
                None => Err(RegisterError::MissingAction {
                    key: node.key().to_string(),
                }),
            },
        }
    }

    /// The node's own URL: the explicit raw path, or the delimited segment
    /// followed by the variables suffix when variables exist.
    fn own_url(&self, node: &dyn Blueprint<S>) -> String {
        let delimiter = &self.config.url_delimiter;
        if let Some(raw) = node.raw_path() {
            return if raw.starts_with(delimiter.as_str()) {
                raw.to_string()
            } else {
                format!("{delimiter}{raw}")
            };
        }

        let segment = node
            .segment()
            .map(str::to_owned)
            .unwrap_or_else(|| normalize(node.ident(), &self.config.url_segment_delimiter));
        let variables = node.variables();
        if variables.is_empty() {
            return format!("{delimiter}{segment}");
        }
        let suffix = variables
            .iter()
            .map(|variable| variable.render(self.config))
            .collect::<Vec<_>>()
            .join(delimiter);
        format!("{delimiter}{segment}{delimiter}{suffix}")
    }

    /// Sequence-group resolution: the node's own override wins; under
    /// `EveryGroup` a group node starts its own scope; a root keys the
    /// tree by itself; everything else inherits from its caller.
    fn resolve_group(
        &self,
        node: &dyn Blueprint<S>,
        parent_group: Option<&str>,
        caller: Option<&str>,
    ) -> String {
        if let Some(own) = node.sequence_group() {
            return own.to_string();
        }
        if self.config.group_name_mode == GroupNameMode::EveryGroup && node.is_group() {
            return node.key().to_string();
        }
        match (parent_group, caller) {
            (Some(group), _) => group.to_string(),
            (None, Some(caller)) => caller.to_string(),
            (None, None) => node.key().to_string(),
        }
    }

    fn frame(&self, node: &dyn Blueprint<S>) -> TraceFrame {
        TraceFrame {
            key: node.key().to_string(),
            ident: node.ident().to_string(),
            name: normalize(
                node.name().unwrap_or(node.ident()),
                &self.config.route_name_delimiter,
            ),
            view: normalize(
                node.view().unwrap_or(node.ident()),
                &self.config.view_delimiter,
            ),
            prefix: normalize(
                node.prefix().unwrap_or(node.ident()),
                &self.config.url_segment_delimiter,
            ),
        }
    }
}

fn owned(names: Vec<&'static str>) -> Vec<String> {
    names.into_iter().map(str::to_owned).collect()
}
