/// Errors surfaced while walking a blueprint tree into a backend.
#[derive(Debug)]
pub enum RegisterError {
    /// A leaf blueprint defines neither an action nor an inline endpoint.
    MissingAction { key: String },
    /// An action key resolved to nothing in the backend's handler registry.
    UnknownAction { key: String, action: String },
    /// A middleware name is not registered with the backend.
    UnknownMiddleware { key: String, middleware: String },
    /// A backend-specific failure.
    Backend(String),
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterError::MissingAction { key } => {
                write!(f, "blueprint '{key}' defines neither an action nor an endpoint")
            }
            RegisterError::UnknownAction { key, action } => {
                write!(f, "no handler mounted for action '{action}' (required by '{key}')")
            }
            RegisterError::UnknownMiddleware { key, middleware } => {
                write!(
                    f,
                    "no middleware registered under '{middleware}' (required by '{key}')"
                )
            }
            RegisterError::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl std::error::Error for RegisterError {}
