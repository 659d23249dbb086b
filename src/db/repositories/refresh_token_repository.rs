use diesel::prelude::*;
use uuid::Uuid;

use crate::db::error::RepositoryError;
use crate::db::models::refresh_token::{NewRefreshToken, RefreshToken};
use crate::db::schema::refresh_tokens;

pub struct RefreshTokenRepository;

impl RefreshTokenRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_refresh_token: &NewRefreshToken,
    ) -> Result<RefreshToken, RepositoryError> {
        diesel::insert_into(refresh_tokens::table)
            .values(new_refresh_token)
            .returning(RefreshToken::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<RefreshToken>, RepositoryError> {
        refresh_tokens::table
            .find(id)
            .select(RefreshToken::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), RepositoryError> {
        diesel::delete(refresh_tokens::table.find(id)).execute(conn)?;
        Ok(())
    }

    pub fn delete_by_user(conn: &mut PgConnection, user_id: i32) -> Result<usize, RepositoryError> {
        diesel::delete(refresh_tokens::table.filter(refresh_tokens::user_id.eq(user_id)))
            .execute(conn)
            .map_err(Into::into)
    }
}
