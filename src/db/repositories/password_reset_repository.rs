use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::error::RepositoryError;
use crate::db::models::password_reset::PasswordReset;
use crate::db::schema::password_resets;

pub struct PasswordResetRepository;

impl PasswordResetRepository {
    /// Replaces any pending reset for the same email
    pub fn upsert(conn: &mut PgConnection, reset: &PasswordReset) -> Result<(), RepositoryError> {
        diesel::insert_into(password_resets::table)
            .values(reset)
            .on_conflict(password_resets::email)
            .do_update()
            .set((
                password_resets::token.eq(excluded(password_resets::token)),
                password_resets::created_at.eq(excluded(password_resets::created_at)),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<PasswordReset>, RepositoryError> {
        password_resets::table
            .find(email)
            .select(PasswordReset::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn delete_by_email(conn: &mut PgConnection, email: &str) -> Result<(), RepositoryError> {
        diesel::delete(password_resets::table.find(email)).execute(conn)?;
        Ok(())
    }
}
