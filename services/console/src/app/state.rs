//! services/console/src/app/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::AuthStore;
use crate::config::Config;
use botverse_core::ports::BotGateway;
use std::sync::Arc;

/// The shared application state, created once at startup by the composition
/// root and passed to every screen. There is no ambient global: the auth
/// store and gateway travel through this struct explicitly.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn BotGateway>,
    pub config: Arc<Config>,
    pub auth: AuthStore,
}
