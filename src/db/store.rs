//! Storage seams used by the services.
//!
//! `PgStore` implements them on top of the diesel repositories; tests swap in
//! an in-memory implementation.

use uuid::Uuid;

use super::DbPool;
use super::connection::get_connection;
use super::error::RepositoryError;
use super::models::form_submission::{FormSubmission, NewFormSubmission};
use super::models::password_reset::PasswordReset;
use super::models::refresh_token::{NewRefreshToken, RefreshToken};
use super::models::role::RoleWithPermissions;
use super::models::social_login::SocialLogin;
use super::models::user::{NewUser, UpdateUser, User};
use super::repositories::form_submission_repository::FormSubmissionRepository;
use super::repositories::password_reset_repository::PasswordResetRepository;
use super::repositories::refresh_token_repository::RefreshTokenRepository;
use super::repositories::role_repository::RoleRepository;
use super::repositories::social_login_repository::SocialLoginRepository;
use super::repositories::user_repository::UserRepository;

pub trait UserStore: Send + Sync {
    fn find_user(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn list_users(&self, only_active: bool) -> Result<Vec<User>, RepositoryError>;
    fn slugs_like(&self, base: &str) -> Result<Vec<String>, RepositoryError>;
    fn create_user(&self, new_user: &NewUser) -> Result<User, RepositoryError>;
    fn update_user(&self, id: i32, changes: &UpdateUser) -> Result<User, RepositoryError>;
    fn update_password(&self, id: i32, password_hash: &str) -> Result<(), RepositoryError>;
    fn delete_user(&self, id: i32) -> Result<(), RepositoryError>;
    fn roles_for_user(&self, user_id: i32) -> Result<Vec<RoleWithPermissions>, RepositoryError>;
    fn providers_for_user(&self, user_id: i32) -> Result<Vec<SocialLogin>, RepositoryError>;
}

/// Refresh tokens and password reset tokens.
pub trait TokenStore: Send + Sync {
    fn create_refresh_token(&self, token: &NewRefreshToken)
    -> Result<RefreshToken, RepositoryError>;
    fn find_refresh_token(&self, id: Uuid) -> Result<Option<RefreshToken>, RepositoryError>;
    fn delete_refresh_token(&self, id: Uuid) -> Result<(), RepositoryError>;
    fn delete_refresh_tokens_for_user(&self, user_id: i32) -> Result<usize, RepositoryError>;
    fn put_password_reset(&self, reset: &PasswordReset) -> Result<(), RepositoryError>;
    fn find_password_reset(&self, email: &str) -> Result<Option<PasswordReset>, RepositoryError>;
    fn delete_password_reset(&self, email: &str) -> Result<(), RepositoryError>;
}

pub trait FormSubmissionStore: Send + Sync {
    fn create_submission(
        &self,
        submission: &NewFormSubmission,
    ) -> Result<FormSubmission, RepositoryError>;
    fn find_submission(&self, id: i32) -> Result<Option<FormSubmission>, RepositoryError>;
    fn list_submissions(
        &self,
        submission_type: Option<&str>,
    ) -> Result<Vec<FormSubmission>, RepositoryError>;
    fn delete_submission(&self, id: i32) -> Result<bool, RepositoryError>;
}

/// Postgres-backed store; every call checks out its own pooled connection.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgStore {
    fn find_user(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        UserRepository::find_by_id(&mut *get_connection(&self.pool)?, id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        UserRepository::find_by_email(&mut *get_connection(&self.pool)?, email)
    }

    fn list_users(&self, only_active: bool) -> Result<Vec<User>, RepositoryError> {
        UserRepository::list(&mut *get_connection(&self.pool)?, only_active)
    }

    fn slugs_like(&self, base: &str) -> Result<Vec<String>, RepositoryError> {
        UserRepository::slugs_like(&mut *get_connection(&self.pool)?, base)
    }

    fn create_user(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        UserRepository::create(&mut *get_connection(&self.pool)?, new_user)
    }

    fn update_user(&self, id: i32, changes: &UpdateUser) -> Result<User, RepositoryError> {
        UserRepository::update(&mut *get_connection(&self.pool)?, id, changes)
    }

    fn update_password(&self, id: i32, password_hash: &str) -> Result<(), RepositoryError> {
        UserRepository::update_password(&mut *get_connection(&self.pool)?, id, password_hash)
    }

    fn delete_user(&self, id: i32) -> Result<(), RepositoryError> {
        UserRepository::delete(&mut *get_connection(&self.pool)?, id)
    }

    fn roles_for_user(&self, user_id: i32) -> Result<Vec<RoleWithPermissions>, RepositoryError> {
        RoleRepository::find_for_user(&mut *get_connection(&self.pool)?, user_id)
    }

    fn providers_for_user(&self, user_id: i32) -> Result<Vec<SocialLogin>, RepositoryError> {
        SocialLoginRepository::find_for_user(&mut *get_connection(&self.pool)?, user_id)
    }
}

impl TokenStore for PgStore {
    fn create_refresh_token(
        &self,
        token: &NewRefreshToken,
    ) -> Result<RefreshToken, RepositoryError> {
        RefreshTokenRepository::create(&mut *get_connection(&self.pool)?, token)
    }

    fn find_refresh_token(&self, id: Uuid) -> Result<Option<RefreshToken>, RepositoryError> {
        RefreshTokenRepository::find_by_id(&mut *get_connection(&self.pool)?, id)
    }

    fn delete_refresh_token(&self, id: Uuid) -> Result<(), RepositoryError> {
        RefreshTokenRepository::delete(&mut *get_connection(&self.pool)?, id)
    }

    fn delete_refresh_tokens_for_user(&self, user_id: i32) -> Result<usize, RepositoryError> {
        RefreshTokenRepository::delete_by_user(&mut *get_connection(&self.pool)?, user_id)
    }

    fn put_password_reset(&self, reset: &PasswordReset) -> Result<(), RepositoryError> {
        PasswordResetRepository::upsert(&mut *get_connection(&self.pool)?, reset)
    }

    fn find_password_reset(&self, email: &str) -> Result<Option<PasswordReset>, RepositoryError> {
        PasswordResetRepository::find_by_email(&mut *get_connection(&self.pool)?, email)
    }

    fn delete_password_reset(&self, email: &str) -> Result<(), RepositoryError> {
        PasswordResetRepository::delete_by_email(&mut *get_connection(&self.pool)?, email)
    }
}

impl FormSubmissionStore for PgStore {
    fn create_submission(
        &self,
        submission: &NewFormSubmission,
    ) -> Result<FormSubmission, RepositoryError> {
        FormSubmissionRepository::create(&mut *get_connection(&self.pool)?, submission)
    }

    fn find_submission(&self, id: i32) -> Result<Option<FormSubmission>, RepositoryError> {
        FormSubmissionRepository::find_by_id(&mut *get_connection(&self.pool)?, id)
    }

    fn list_submissions(
        &self,
        submission_type: Option<&str>,
    ) -> Result<Vec<FormSubmission>, RepositoryError> {
        FormSubmissionRepository::list(&mut *get_connection(&self.pool)?, submission_type)
    }

    fn delete_submission(&self, id: i32) -> Result<bool, RepositoryError> {
        FormSubmissionRepository::delete(&mut *get_connection(&self.pool)?, id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use diesel::PgConnection;
    use diesel::r2d2::{ConnectionManager, Pool};

    use super::*;

    fn unreachable_store() -> PgStore {
        let manager = ConnectionManager::<PgConnection>::new("postgres://nobody@127.0.0.1:1/none");
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_millis(200))
            .build_unchecked(manager);
        PgStore::new(pool)
    }

    #[test]
    fn pg_store_backs_every_seam() {
        let store = Arc::new(unreachable_store());
        let _users: Arc<dyn UserStore> = store.clone();
        let _tokens: Arc<dyn TokenStore> = store.clone();
        let _forms: Arc<dyn FormSubmissionStore> = store;
    }

    #[test]
    fn pool_failures_surface_as_repository_errors() {
        let store = unreachable_store();

        assert!(matches!(store.find_user(1), Err(RepositoryError::PoolError(_))));
        assert!(matches!(
            store.delete_password_reset("a@example.com"),
            Err(RepositoryError::PoolError(_))
        ));
        assert!(matches!(store.list_submissions(None), Err(RepositoryError::PoolError(_))));
    }
}
