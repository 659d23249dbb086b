use std::sync::Arc;

use account_manager_api::{
    ActionResponse, LoginRequest, LoginResponse, RefreshTokenResponse, RegisterRequest,
    ResetPasswordRequest, SendPasswordResetRequest, UserResponse,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::account::permissions::PermissionRegistry;
use crate::account::profile::UserProfile;
use crate::account::services::new_confirmation_token;
use crate::account::slug::{slug_base, unique_slug};
use crate::config::Config;
use crate::db::models::password_reset::PasswordReset;
use crate::db::models::refresh_token::NewRefreshToken;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::store::{TokenStore, UserStore};
use crate::error::AppError;
use crate::i18n::Localization;
use crate::notifications::{Mailer, Notification};
use crate::validation::ValidationErrors;

use super::jwt::JwtManager;
use super::password::PasswordManager;

const REGISTER_FORM: &str = "/register";
const LOGIN_FORM: &str = "/login";
const RESET_FORM: &str = "/password/reset";
const DEFAULT_TIMEZONE: &str = "UTC";

/// Lifetimes and link base used by the session and reset flows
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub app_url: String,
    pub refresh_token_days: i64,
    pub password_reset_minutes: i64,
}

impl From<&Config> for AuthSettings {
    fn from(config: &Config) -> Self {
        Self {
            app_url: config.app_url.clone(),
            refresh_token_days: config.refresh_token_days,
            password_reset_minutes: config.password_reset_minutes,
        }
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenStore>,
    mailer: Arc<dyn Mailer>,
    jwt_manager: JwtManager,
    registry: Arc<PermissionRegistry>,
    i18n: Arc<Localization>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        mailer: Arc<dyn Mailer>,
        jwt_manager: JwtManager,
        registry: Arc<PermissionRegistry>,
        i18n: Arc<Localization>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            jwt_manager,
            registry,
            i18n,
            settings,
        }
    }

    /// Creates an unconfirmed active account and mails the confirmation link
    pub fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        let mut errors = ValidationErrors::new().back_to(REGISTER_FORM);
        if errors.required("name", &request.name) {
            errors.max_length("name", &request.name);
        }
        errors.email("email", &request.email);
        if !errors.has("email") && self.users.find_user_by_email(&request.email)?.is_some() {
            errors.add("email", "The email has already been taken.");
        }
        errors.password(
            "password",
            &request.password,
            &request.password_confirmation,
        );
        if let Some(locale) = &request.locale
            && !self.i18n.is_supported(locale)
        {
            errors.add("locale", "The selected locale is invalid.");
        }
        if let Some(timezone) = &request.timezone {
            errors.timezone("timezone", timezone);
        }
        errors.into_result()?;

        let base = slug_base(&request.name);
        let slug = unique_slug(&base, &self.users.slugs_like(&base)?);

        let new_user = NewUser {
            name: request.name,
            email: request.email,
            password: PasswordManager::hash(&request.password)?,
            active: true,
            confirmation_token: Some(new_confirmation_token()),
            confirmed: false,
            locale: request
                .locale
                .unwrap_or_else(|| self.i18n.default_locale().to_string()),
            timezone: request
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            slug,
        };

        let user = self.users.create_user(&new_user)?;
        tracing::info!(user_id = user.id, slug = %user.slug, "User registered");

        if let Some(token) = &user.confirmation_token {
            self.mailer.send(&Notification::ConfirmEmail {
                to: user.email.clone(),
                name: user.name.clone(),
                url: format!("{}/account/confirmation/{token}", self.settings.app_url),
            })?;
        }

        let profile = UserProfile::load(self.users.as_ref(), user)?;
        Ok(profile.to_response(Some(&profile), &self.registry, &self.i18n))
    }

    /// Issues an access token plus a fresh refresh token
    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let mut errors = ValidationErrors::new().back_to(LOGIN_FORM);
        errors.required("email", &request.email);
        errors.required("password", &request.password);
        errors.into_result()?;

        let Some(user) = self.users.find_user_by_email(&request.email)? else {
            tracing::warn!("Login attempt for an unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !PasswordManager::verify(&request.password, &user.password)? {
            tracing::warn!(user_id = user.id, "Login attempt with a wrong password");
            return Err(AppError::InvalidCredentials);
        }

        if !user.active {
            return Err(AppError::AccountDisabled);
        }

        let user = self.users.update_user(
            user.id,
            &UpdateUser {
                last_access_at: Some(Some(Utc::now())),
                ..Default::default()
            },
        )?;

        let access_token = self.jwt_manager.generate_access_token(user.id)?;
        let refresh_token = self.issue_refresh_token(user.id)?;
        tracing::info!(user_id = user.id, "User logged in");

        let profile = UserProfile::load(self.users.as_ref(), user)?;
        Ok(LoginResponse {
            access_token,
            refresh_token,
            user: profile.to_response(Some(&profile), &self.registry, &self.i18n),
            expires_in: self.jwt_manager.expiration_hours() * 3600,
        })
    }

    /// Rotates `raw`: the presented refresh token is consumed, a new one returned
    pub fn refresh(&self, raw: &str) -> Result<(RefreshTokenResponse, String), AppError> {
        let (id, secret) = parse_refresh_token(raw)?;

        let stored = self
            .tokens
            .find_refresh_token(id)?
            .ok_or(AppError::InvalidRefreshToken)?;

        if stored.expires_at < Utc::now() {
            self.tokens.delete_refresh_token(id)?;
            return Err(AppError::RefreshTokenExpired);
        }

        if !PasswordManager::verify(secret, &stored.token_hash)? {
            tracing::warn!(user_id = stored.user_id, "Refresh token secret mismatch");
            return Err(AppError::InvalidRefreshToken);
        }

        self.tokens.delete_refresh_token(id)?;

        let user = self
            .users
            .find_user(stored.user_id)?
            .ok_or(AppError::InvalidRefreshToken)?;
        if !user.active {
            return Err(AppError::AccountDisabled);
        }

        let access_token = self.jwt_manager.generate_access_token(user.id)?;
        let refresh_token = self.issue_refresh_token(user.id)?;

        Ok((
            RefreshTokenResponse {
                access_token,
                expires_in: self.jwt_manager.expiration_hours() * 3600,
            },
            refresh_token,
        ))
    }

    /// Déconnexion: révoque tous les refresh tokens de l'utilisateur
    pub fn logout(&self, user_id: i32) -> Result<(), AppError> {
        let revoked = self.tokens.delete_refresh_tokens_for_user(user_id)?;
        tracing::info!(user_id, revoked, "User logged out");
        Ok(())
    }

    /// Resolves a bearer token to the user it was issued for, reloaded from storage
    pub fn authenticate(&self, access_token: &str) -> Result<UserProfile, AppError> {
        let claims = self.jwt_manager.verify_token(access_token)?;

        let user = self
            .users
            .find_user(claims.sub)?
            .ok_or_else(|| AppError::unauthorized("This account no longer exists"))?;
        if !user.active {
            return Err(AppError::AccountDisabled);
        }

        Ok(UserProfile::load(self.users.as_ref(), user)?)
    }

    /// Same answer whether or not the address belongs to an account
    pub fn send_password_reset(
        &self,
        request: &SendPasswordResetRequest,
    ) -> Result<ActionResponse, AppError> {
        let mut errors = ValidationErrors::new().back_to(RESET_FORM);
        errors.email("email", &request.email);
        errors.into_result()?;

        match self.users.find_user_by_email(&request.email)? {
            Some(user) => self.send_reset_link(&user)?,
            None => tracing::debug!("Password reset requested for an unknown email"),
        }

        Ok(ActionResponse::new(
            RESET_FORM,
            self.i18n.flash(
                self.i18n.default_locale(),
                "labels.user.password_reset_link_sent",
            ),
        ))
    }

    pub fn reset_password(&self, request: &ResetPasswordRequest) -> Result<ActionResponse, AppError> {
        let mut errors = ValidationErrors::new().back_to(RESET_FORM);
        errors.email("email", &request.email);
        errors.required("token", &request.token);
        errors.password(
            "password",
            &request.password,
            &request.password_confirmation,
        );
        errors.into_result()?;

        let reset = self
            .tokens
            .find_password_reset(&request.email)?
            .ok_or(AppError::InvalidResetToken)?;

        let expires_at = reset.created_at + Duration::minutes(self.settings.password_reset_minutes);
        if expires_at < Utc::now() {
            self.tokens.delete_password_reset(&reset.email)?;
            return Err(AppError::InvalidResetToken);
        }
        if !PasswordManager::verify(&request.token, &reset.token)? {
            return Err(AppError::InvalidResetToken);
        }

        let user = self
            .users
            .find_user_by_email(&request.email)?
            .ok_or(AppError::InvalidResetToken)?;

        let hash = PasswordManager::hash(&request.password)?;
        self.users.update_password(user.id, &hash)?;
        self.tokens.delete_password_reset(&reset.email)?;
        let revoked = self.tokens.delete_refresh_tokens_for_user(user.id)?;
        tracing::info!(user_id = user.id, revoked, "Password reset");

        Ok(ActionResponse::new(
            LOGIN_FORM,
            self.i18n.flash(&user.locale, "labels.user.password_reset"),
        ))
    }

    fn send_reset_link(&self, user: &User) -> Result<(), AppError> {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.put_password_reset(&PasswordReset {
            email: user.email.clone(),
            token: PasswordManager::hash(&token)?,
            created_at: Utc::now(),
        })?;

        self.mailer.send(&Notification::ResetPassword {
            to: user.email.clone(),
            url: format!("{}/password/reset/{token}", self.settings.app_url),
        })?;
        tracing::info!(user_id = user.id, "Password reset link sent");
        Ok(())
    }

    /// `<id>.<secret>`; only the bcrypt hash of the secret is stored
    fn issue_refresh_token(&self, user_id: i32) -> Result<String, AppError> {
        let id = Uuid::new_v4();
        let secret = Uuid::new_v4().simple().to_string();

        self.tokens.create_refresh_token(&NewRefreshToken {
            id,
            user_id,
            token_hash: PasswordManager::hash(&secret)?,
            expires_at: Utc::now() + Duration::days(self.settings.refresh_token_days),
        })?;

        Ok(format!("{id}.{secret}"))
    }
}

fn parse_refresh_token(raw: &str) -> Result<(Uuid, &str), AppError> {
    let (id, secret) = raw.split_once('.').ok_or(AppError::InvalidTokenFormat)?;
    let id = Uuid::parse_str(id).map_err(|_| AppError::InvalidTokenFormat)?;
    if secret.is_empty() {
        return Err(AppError::InvalidTokenFormat);
    }
    Ok((id, secret))
}
