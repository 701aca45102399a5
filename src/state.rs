use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::db::InviteStore;
use crate::mail::InviteMailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub store: Arc<dyn InviteStore>,
    pub mailer: Arc<dyn InviteMailer>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: AuthService,
        store: Arc<dyn InviteStore>,
        mailer: Arc<dyn InviteMailer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            store,
            mailer,
        }
    }
}
