use std::collections::BTreeMap;
use std::sync::Arc;

use account_manager_api::{
    AccountPage, ActionResponse, ChangePasswordRequest, UpdateAccountRequest, UserResponse,
};
use uuid::Uuid;

use crate::auth::password::PasswordManager;
use crate::db::models::user::{UpdateUser, User};
use crate::db::store::{TokenStore, UserStore};
use crate::error::AppError;
use crate::i18n::{self, Localization};
use crate::notifications::{Mailer, Notification};
use crate::validation::ValidationErrors;

use super::permissions::PermissionRegistry;
use super::profile::UserProfile;

const ACCOUNT_PATH: &str = "/account";
const EDIT_ANCHOR: &str = "/account#edit";
const PASSWORD_ANCHOR: &str = "/account#password";

pub struct AccountService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenStore>,
    mailer: Arc<dyn Mailer>,
    registry: Arc<PermissionRegistry>,
    i18n: Arc<Localization>,
    app_url: String,
    social_providers: Vec<String>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenStore>,
        mailer: Arc<dyn Mailer>,
        registry: Arc<PermissionRegistry>,
        i18n: Arc<Localization>,
        app_url: impl Into<String>,
        social_providers: Vec<String>,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            registry,
            i18n,
            app_url: app_url.into(),
            social_providers,
        }
    }

    /// Profile page of the signed-in user
    pub fn index(&self, actor: &UserProfile) -> AccountPage {
        let providers = self
            .social_providers
            .iter()
            .map(|provider| (provider.clone(), actor.get_provider(provider).is_some()))
            .collect::<BTreeMap<_, _>>();

        AccountPage {
            user: actor.to_response(Some(actor), &self.registry, &self.i18n),
            locales: self.i18n.locales(),
            timezones: i18n::timezones().to_vec(),
            providers,
        }
    }

    pub fn update(
        &self,
        actor: &UserProfile,
        input: UpdateAccountRequest,
    ) -> Result<ActionResponse, AppError> {
        let current = &actor.user;
        let mut errors = ValidationErrors::new().back_to(EDIT_ANCHOR);

        if errors.required("name", &input.name) {
            errors.max_length("name", &input.name);
        }
        errors.email("email", &input.email);
        if !errors.has("email")
            && let Some(owner) = self.users.find_user_by_email(&input.email)?
            && owner.id != current.id
        {
            errors.add("email", "The email has already been taken.");
        }
        if errors.required("locale", &input.locale) && !self.i18n.is_supported(&input.locale) {
            errors.add("locale", "The selected locale is invalid.");
        }
        errors.timezone("timezone", &input.timezone);
        errors.into_result()?;

        let email_changed = input.email != current.email;
        let mut changes = UpdateUser {
            name: Some(input.name),
            email: Some(input.email),
            locale: Some(input.locale),
            timezone: Some(input.timezone),
            ..Default::default()
        };
        if email_changed {
            changes.confirmed = Some(false);
            changes.confirmation_token = Some(Some(new_confirmation_token()));
        }

        let user = self.users.update_user(current.id, &changes)?;
        tracing::info!(user_id = user.id, email_changed, "Profile updated");

        if email_changed {
            self.tokens.delete_password_reset(&current.email)?;
            self.send_confirmation_mail(&user)?;
        }

        Ok(ActionResponse::new(
            ACCOUNT_PATH,
            self.i18n.flash(&user.locale, "labels.user.profile_updated"),
        ))
    }

    /// Mails the confirmation link; nothing is sent to an already confirmed address.
    /// `back` is the page the request came from.
    pub fn send_confirmation(
        &self,
        actor: &UserProfile,
        back: Option<&str>,
    ) -> Result<ActionResponse, AppError> {
        let user = &actor.user;

        if user.confirmed {
            tracing::debug!(user_id = user.id, "Email already confirmed, nothing sent");
        } else {
            let user = match user.confirmation_token {
                Some(_) => user.clone(),
                None => self.users.update_user(
                    user.id,
                    &UpdateUser {
                        confirmation_token: Some(Some(new_confirmation_token())),
                        ..Default::default()
                    },
                )?,
            };
            self.send_confirmation_mail(&user)?;
        }

        let redirect_to = back
            .and_then(|referer| local_path(referer, &self.app_url))
            .unwrap_or(ACCOUNT_PATH);

        Ok(ActionResponse::new(
            redirect_to,
            self.i18n
                .flash(&user.locale, "labels.user.email_confirmation_sended"),
        ))
    }

    /// Consumes `token`; a second use of the same token fails.
    pub fn confirm_email(
        &self,
        actor: &UserProfile,
        token: &str,
    ) -> Result<ActionResponse, AppError> {
        let user = &actor.user;

        if token.is_empty() || user.confirmation_token.as_deref() != Some(token) {
            tracing::warn!(user_id = user.id, "Confirmation token rejected");
            return Err(AppError::InvalidConfirmationToken);
        }

        let user = self.users.update_user(
            user.id,
            &UpdateUser {
                confirmed: Some(true),
                confirmation_token: Some(None),
                ..Default::default()
            },
        )?;
        tracing::info!(user_id = user.id, "Email confirmed");

        Ok(ActionResponse::new(
            ACCOUNT_PATH,
            self.i18n.flash(&user.locale, "labels.user.email_confirmed"),
        ))
    }

    pub fn change_password(
        &self,
        actor: &UserProfile,
        input: &ChangePasswordRequest,
    ) -> Result<ActionResponse, AppError> {
        let mut errors = ValidationErrors::new().back_to(PASSWORD_ANCHOR);
        errors.required("old_password", &input.old_password);
        errors.password("password", &input.password, &input.password_confirmation);
        errors.into_result()?;

        let user = &actor.user;
        if !PasswordManager::verify(&input.old_password, &user.password)? {
            tracing::warn!(user_id = user.id, "Password change with a wrong old password");
            return Err(AppError::InvalidOldPassword);
        }

        let hash = PasswordManager::hash(&input.password)?;
        self.users.update_password(user.id, &hash)?;
        tracing::info!(user_id = user.id, "Password changed");

        Ok(ActionResponse::new(
            ACCOUNT_PATH,
            self.i18n.flash(&user.locale, "labels.user.password_updated"),
        ))
    }

    /// Deletes the account first, then every session it still holds.
    pub fn delete(&self, actor: &UserProfile) -> Result<ActionResponse, AppError> {
        let user = &actor.user;
        if user.is_super_admin() {
            return Err(AppError::forbidden("The super admin account cannot be deleted"));
        }

        self.users.delete_user(user.id)?;
        let revoked = self.tokens.delete_refresh_tokens_for_user(user.id)?;
        self.tokens.delete_password_reset(&user.email)?;
        tracing::info!(user_id = user.id, revoked, "Account deleted");

        Ok(ActionResponse::new(
            "/",
            self.i18n.flash(&user.locale, "labels.user.account_deleted"),
        ))
    }

    /// Users visible to `actor`, optionally only actives and only holders of `role`.
    pub fn list_users(
        &self,
        actor: &UserProfile,
        only_active: bool,
        role: Option<&str>,
    ) -> Result<Vec<UserResponse>, AppError> {
        actor.authorize("view users")?;

        let mut listed = Vec::new();
        for user in self.users.list_users(only_active)? {
            let profile = UserProfile::load(self.users.as_ref(), user)?;
            if role.is_some_and(|role| !profile.has_role(role)) {
                continue;
            }
            listed.push(profile.to_response(Some(actor), &self.registry, &self.i18n));
        }
        Ok(listed)
    }

    fn send_confirmation_mail(&self, user: &User) -> Result<(), AppError> {
        let Some(token) = user.confirmation_token.as_deref() else {
            return Err(AppError::internal("Confirmation token missing"));
        };

        self.mailer.send(&Notification::ConfirmEmail {
            to: user.email.clone(),
            name: user.name.clone(),
            url: format!("{}/account/confirmation/{token}", self.app_url),
        })?;
        Ok(())
    }
}

pub fn new_confirmation_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Same-site path of `referer`, if it points inside the application
fn local_path<'a>(referer: &'a str, app_url: &str) -> Option<&'a str> {
    let path = referer.strip_prefix(app_url).unwrap_or(referer);
    let mut chars = path.chars();
    let rooted = chars.next() == Some('/') && !matches!(chars.next(), Some('/' | '\\'));
    (rooted && !path.chars().any(char::is_control)).then_some(path)
}
