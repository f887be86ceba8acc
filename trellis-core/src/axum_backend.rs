//! Mounting walks onto a real [`axum::Router`].
//!
//! Blueprints name their actions and middleware; [`Handlers`] and
//! [`Middlewares`] map those names to actual axum handlers and layers.
//! [`AxumBackend`] resolves every emitted endpoint against the two
//! registries and flattens it onto a plain router, which [`finish`]
//! hands back ready to serve.
//!
//! [`finish`]: AxumBackend::finish

use std::collections::HashMap;

use axum::handler::Handler;
use axum::routing::{on, MethodFilter, MethodRouter};

use crate::error::RegisterError;
use crate::registrar::{effective_middleware, ActionRef, Endpoint, Router, Scope};

type HandlerFactory<S> = Box<dyn Fn(MethodFilter) -> MethodRouter<S> + Send + Sync>;
type MiddlewareLayer<S> = Box<dyn Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync>;

/// Named handler registry. Keys match the action references blueprints
/// produce, controller delimiter included (`"UserController::show"`).
pub struct Handlers<S = ()> {
    factories: HashMap<String, HandlerFactory<S>>,
}

impl<S> Default for Handlers<S> {
    fn default() -> Self {
        Handlers {
            factories: HashMap::new(),
        }
    }
}

impl<S> Handlers<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an axum handler under an action name.
    pub fn mount<H, T>(&mut self, name: impl Into<String>, handler: H)
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let factory = move |filter: MethodFilter| on(filter, handler.clone());
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn build(&self, name: &str, filter: MethodFilter) -> Option<MethodRouter<S>> {
        self.factories.get(name).map(|factory| factory(filter))
    }
}

/// Named middleware registry. Each entry wraps a [`MethodRouter`], usually
/// with [`MethodRouter::layer`].
pub struct Middlewares<S = ()> {
    layers: HashMap<String, MiddlewareLayer<S>>,
}

impl<S> Default for Middlewares<S> {
    fn default() -> Self {
        Middlewares {
            layers: HashMap::new(),
        }
    }
}

impl<S> Middlewares<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, layer: F)
    where
        F: Fn(MethodRouter<S>) -> MethodRouter<S> + Send + Sync + 'static,
    {
        self.layers.insert(name.into(), Box::new(layer));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    fn apply(&self, name: &str, router: MethodRouter<S>) -> Option<MethodRouter<S>> {
        self.layers.get(name).map(|layer| layer(router))
    }
}

/// [`Router`] backend that mounts endpoints on an [`axum::Router`].
///
/// Paths are mounted flattened, so the underlying router's rules apply
/// directly: a duplicate or malformed path panics there, not here.
pub struct AxumBackend<S = ()> {
    handlers: Handlers<S>,
    middlewares: Middlewares<S>,
    scopes: Vec<Scope>,
    router: axum::Router<S>,
    routes: usize,
}

impl<S> AxumBackend<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(handlers: Handlers<S>, middlewares: Middlewares<S>) -> Self {
        AxumBackend {
            handlers,
            middlewares,
            scopes: Vec::new(),
            router: axum::Router::new(),
            routes: 0,
        }
    }

    /// Number of routes mounted so far.
    pub fn route_count(&self) -> usize {
        self.routes
    }

    /// Hands the assembled router back. Callers holding a stateful
    /// `Router<S>` supply the state afterwards, as usual for axum.
    pub fn finish(self) -> axum::Router<S> {
        self.router
    }
}

impl<S> Router<S> for AxumBackend<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route(&mut self, endpoint: Endpoint<S>) -> Result<(), RegisterError> {
        let key = endpoint.blueprint_key().to_string();
        let filter = endpoint.verb.filter();
        let Endpoint {
            action,
            handler,
            full_path,
            middleware,
            exclude,
            ..
        } = endpoint;

        let mut method_router = match action {
            ActionRef::Registry(action_key) => self
                .handlers
                .build(&action_key, filter)
                .ok_or_else(|| RegisterError::UnknownAction {
                    key: key.clone(),
                    action: action_key,
                })?,
            ActionRef::Inline => handler.ok_or_else(|| {
                RegisterError::Backend("inline endpoint missing its handler".to_string())
            })?,
        };

        // .layer() wraps, so reversed application keeps the declared
        // order outermost-first at request time.
        let effective = effective_middleware(&self.scopes, &middleware, &exclude);
        for name in effective.iter().rev() {
            method_router = self.middlewares.apply(name, method_router).ok_or_else(|| {
                RegisterError::UnknownMiddleware {
                    key: key.clone(),
                    middleware: name.clone(),
                }
            })?;
        }

        self.router = std::mem::take(&mut self.router).route(&full_path, method_router);
        self.routes += 1;
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
