//! In-memory store, recording mailer and fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::account::profile::UserProfile;
use crate::auth::password::PasswordManager;
use crate::config::Config;
use crate::db::error::RepositoryError;
use crate::db::models::form_submission::{FormSubmission, NewFormSubmission};
use crate::db::models::password_reset::PasswordReset;
use crate::db::models::refresh_token::{NewRefreshToken, RefreshToken};
use crate::db::models::role::{Role, RoleWithPermissions};
use crate::db::models::social_login::SocialLogin;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::store::{FormSubmissionStore, TokenStore, UserStore};
use crate::notifications::{Mailer, Notification, NotificationError};
use crate::state::AppState;

pub fn user(id: i32) -> User {
    let now = Utc::now();
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        password: String::new(),
        active: true,
        confirmation_token: None,
        confirmed: true,
        remember_token: None,
        locale: "en".to_string(),
        timezone: "UTC".to_string(),
        slug: format!("user-{id}"),
        last_access_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn profile(id: i32, roles: Vec<RoleWithPermissions>) -> UserProfile {
    UserProfile {
        user: user(id),
        roles,
        providers: Vec::new(),
    }
}

pub fn role(id: i32, name: &str, display_name: &str, permissions: &[&str]) -> RoleWithPermissions {
    let now = Utc::now();
    RoleWithPermissions {
        role: Role {
            id,
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        },
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn social_login(id: i32, user_id: i32, provider: &str, provider_id: &str) -> SocialLogin {
    let now = Utc::now();
    SocialLogin {
        id,
        user_id,
        provider: provider.to_string(),
        provider_id: provider_id.to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    roles: Vec<(i32, RoleWithPermissions)>,
    providers: Vec<SocialLogin>,
    refresh_tokens: Vec<RefreshToken>,
    password_resets: Vec<PasswordReset>,
    submissions: Vec<FormSubmission>,
    last_user_id: i32,
    last_submission_id: i32,
}

/// Mirrors the Postgres constraints the services rely on: unique email and
/// slug, and cascading deletes from users.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Active, unconfirmed user with a pending confirmation token
    pub fn seed_user(&self, name: &str, email: &str, password: &str) -> User {
        let base = crate::account::slug::slug_base(name);
        let slug = crate::account::slug::unique_slug(&base, &self.slugs_like(&base).unwrap());
        self.create_user(&NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: PasswordManager::hash(password).unwrap(),
            active: true,
            confirmation_token: Some(Uuid::new_v4().simple().to_string()),
            confirmed: false,
            locale: "en".to_string(),
            timezone: "UTC".to_string(),
            slug,
        })
        .unwrap()
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.find_user(id).unwrap()
    }

    pub fn confirm(&self, id: i32) {
        self.update_user(
            id,
            &UpdateUser {
                confirmed: Some(true),
                confirmation_token: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    }

    pub fn set_active(&self, id: i32, active: bool) {
        self.update_user(
            id,
            &UpdateUser {
                active: Some(active),
                ..Default::default()
            },
        )
        .unwrap();
    }

    pub fn assign_role(&self, user_id: i32, role: RoleWithPermissions) {
        self.tables.lock().unwrap().roles.push((user_id, role));
    }

    pub fn link_provider(&self, user_id: i32, provider: &str, provider_id: &str) {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.providers.len() as i32 + 1;
        tables
            .providers
            .push(social_login(id, user_id, provider, provider_id));
    }

    pub fn issue_refresh_token(&self, user_id: i32) {
        self.create_refresh_token(&NewRefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: PasswordManager::hash("secret").unwrap(),
            expires_at: Utc::now() + Duration::days(7),
        })
        .unwrap();
    }

    pub fn refresh_token_count(&self, user_id: i32) -> usize {
        self.tables
            .lock()
            .unwrap()
            .refresh_tokens
            .iter()
            .filter(|token| token.user_id == user_id)
            .count()
    }
}

impl UserStore for MemoryStore {
    fn find_user(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|user| user.email == email).cloned())
    }

    fn list_users(&self, only_active: bool) -> Result<Vec<User>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|user| !only_active || user.active)
            .cloned()
            .collect())
    }

    fn slugs_like(&self, base: &str) -> Result<Vec<String>, RepositoryError> {
        let prefix = format!("{base}-");
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|user| user.slug == base || user.slug.starts_with(&prefix))
            .map(|user| user.slug.clone())
            .collect())
    }

    fn create_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|user| user.email == new_user.email) {
            return Err(RepositoryError::UniqueViolation("users_email_key".to_string()));
        }
        if tables.users.iter().any(|user| user.slug == new_user.slug) {
            return Err(RepositoryError::UniqueViolation("users_slug_key".to_string()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: tables.last_user_id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            active: new_user.active,
            confirmation_token: new_user.confirmation_token.clone(),
            confirmed: new_user.confirmed,
            remember_token: None,
            locale: new_user.locale.clone(),
            timezone: new_user.timezone.clone(),
            slug: new_user.slug.clone(),
            last_access_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    fn update_user(&self, id: i32, changes: &UpdateUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(email) = &changes.email
            && tables.users.iter().any(|user| user.id != id && &user.email == email)
        {
            return Err(RepositoryError::UniqueViolation("users_email_key".to_string()));
        }

        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {id}")))?;

        let changes = changes.clone();
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(active) = changes.active {
            user.active = active;
        }
        if let Some(token) = changes.confirmation_token {
            user.confirmation_token = token;
        }
        if let Some(confirmed) = changes.confirmed {
            user.confirmed = confirmed;
        }
        if let Some(locale) = changes.locale {
            user.locale = locale;
        }
        if let Some(timezone) = changes.timezone {
            user.timezone = timezone;
        }
        if let Some(last_access_at) = changes.last_access_at {
            user.last_access_at = last_access_at;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    fn update_password(&self, id: i32, password_hash: &str) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("user {id}")))?;
        user.password = password_hash.to_string();
        Ok(())
    }

    fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|user| user.id != id);
        if tables.users.len() == before {
            return Err(RepositoryError::NotFound(format!("user {id}")));
        }
        tables.roles.retain(|(user_id, _)| *user_id != id);
        tables.providers.retain(|login| login.user_id != id);
        tables.refresh_tokens.retain(|token| token.user_id != id);
        Ok(())
    }

    fn roles_for_user(&self, user_id: i32) -> Result<Vec<RoleWithPermissions>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .roles
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, role)| role.clone())
            .collect())
    }

    fn providers_for_user(&self, user_id: i32) -> Result<Vec<SocialLogin>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .providers
            .iter()
            .filter(|login| login.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl TokenStore for MemoryStore {
    fn create_refresh_token(
        &self,
        token: &NewRefreshToken,
    ) -> Result<RefreshToken, RepositoryError> {
        let now = Utc::now();
        let created = RefreshToken {
            id: token.id,
            user_id: token.user_id,
            token_hash: token.token_hash.clone(),
            expires_at: token.expires_at,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .refresh_tokens
            .push(created.clone());
        Ok(created)
    }

    fn find_refresh_token(&self, id: Uuid) -> Result<Option<RefreshToken>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.refresh_tokens.iter().find(|t| t.id == id).cloned())
    }

    fn delete_refresh_token(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .unwrap()
            .refresh_tokens
            .retain(|t| t.id != id);
        Ok(())
    }

    fn delete_refresh_tokens_for_user(&self, user_id: i32) -> Result<usize, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.refresh_tokens.len();
        tables.refresh_tokens.retain(|t| t.user_id != user_id);
        Ok(before - tables.refresh_tokens.len())
    }

    fn put_password_reset(&self, reset: &PasswordReset) -> Result<(), RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.password_resets.retain(|r| r.email != reset.email);
        tables.password_resets.push(reset.clone());
        Ok(())
    }

    fn find_password_reset(&self, email: &str) -> Result<Option<PasswordReset>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .password_resets
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    fn delete_password_reset(&self, email: &str) -> Result<(), RepositoryError> {
        self.tables
            .lock()
            .unwrap()
            .password_resets
            .retain(|r| r.email != email);
        Ok(())
    }
}

impl FormSubmissionStore for MemoryStore {
    fn create_submission(
        &self,
        submission: &NewFormSubmission,
    ) -> Result<FormSubmission, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        tables.last_submission_id += 1;
        let now = Utc::now();
        let created = FormSubmission {
            id: tables.last_submission_id,
            submission_type: submission.submission_type.clone(),
            data: submission.data.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.submissions.push(created.clone());
        Ok(created)
    }

    fn find_submission(&self, id: i32) -> Result<Option<FormSubmission>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.submissions.iter().find(|s| s.id == id).cloned())
    }

    fn list_submissions(
        &self,
        submission_type: Option<&str>,
    ) -> Result<Vec<FormSubmission>, RepositoryError> {
        let tables = self.tables.lock().unwrap();
        let mut listed: Vec<FormSubmission> = tables
            .submissions
            .iter()
            .filter(|s| submission_type.is_none_or(|wanted| s.submission_type == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(listed)
    }

    fn delete_submission(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.submissions.len();
        tables.submissions.retain(|s| s.id != id);
        Ok(tables.submissions.len() != before)
    }
}

/// Keeps every notification instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Application state wired to an in-memory store, plus handles on its fakes.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub state: AppState,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let mailer = Arc::new(RecordingMailer::default());
    let config = Config {
        jwt_secret: "router_test_secret".to_string(),
        ..Config::default()
    };
    let state = AppState::new(
        &config,
        store.clone(),
        store.clone(),
        store.clone(),
        mailer.clone(),
        crate::account::permissions::PermissionRegistry::default(),
    );
    TestApp {
        store,
        mailer,
        state,
    }
}
