use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::moderation::ModerationEngine;
use crate::store::GameStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: ModerationEngine,
    /// Read-only catalog access for the storefront list/detail views.
    pub catalog: Arc<dyn GameStore>,
    pub config: Config,
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ModerationEngine {
    fn from_ref(state: &AppState) -> Self {
        state.engine.clone()
    }
}
