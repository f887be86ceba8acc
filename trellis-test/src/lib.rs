mod app;
mod harness;

pub use app::{TestApp, TestRequest, TestResponse};
pub use harness::Harness;
