use crate::config::AppConfig;

/// Shared handler state. Holds only the immutable service configuration;
/// requests share no mutable data.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
