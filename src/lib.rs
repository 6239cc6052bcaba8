use std::sync::Arc;

pub mod completion;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod mcp;
pub mod stdio;

use completion::CompletionProvider;

#[derive(Clone)]
pub struct AppState {
    pub server_name: Arc<str>,
    pub completion_provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(server_name: String, completion_provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            server_name: Arc::<str>::from(server_name),
            completion_provider,
        }
    }
}
