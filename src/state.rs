use std::sync::Arc;

use crate::account::permissions::PermissionRegistry;
use crate::account::services::AccountService;
use crate::auth::jwt::JwtManager;
use crate::auth::services::{AuthService, AuthSettings};
use crate::config::Config;
use crate::db::store::{FormSubmissionStore, TokenStore, UserStore};
use crate::forms::FormService;
use crate::i18n::Localization;
use crate::notifications::Mailer;

/// Shared by every handler; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountService>,
    pub forms: Arc<FormService>,
}

impl AppState {
    pub fn new(
        config: &Config,
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        submissions: Arc<dyn FormSubmissionStore>,
        mailer: Arc<dyn Mailer>,
        registry: PermissionRegistry,
    ) -> Self {
        let registry = Arc::new(registry);
        let i18n = Arc::new(Localization::new(
            config.default_locale.clone(),
            config.supported_locales.clone(),
        ));
        let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiration_hours);

        let auth = AuthService::new(
            users.clone(),
            tokens.clone(),
            mailer.clone(),
            jwt_manager,
            registry.clone(),
            i18n.clone(),
            AuthSettings::from(config),
        );
        let accounts = AccountService::new(
            users,
            tokens,
            mailer,
            registry,
            i18n,
            config.app_url.clone(),
            config.social_providers.clone(),
        );

        Self {
            auth: Arc::new(auth),
            accounts: Arc::new(accounts),
            forms: Arc::new(FormService::new(submissions)),
        }
    }
}
