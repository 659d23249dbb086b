use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::error::RepositoryError;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::schema::users;

pub struct UserRepository;

impl UserRepository {
    /// Users allowed to sign in
    pub fn actives<'a>() -> users::BoxedQuery<'a, Pg> {
        users::table.filter(users::active.eq(true)).into_boxed()
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<User>, RepositoryError> {
        users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<User>, RepositoryError> {
        users::table
            .find(id)
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(conn: &mut PgConnection, only_active: bool) -> Result<Vec<User>, RepositoryError> {
        let query = if only_active {
            Self::actives()
        } else {
            users::table.into_boxed()
        };

        query
            .order(users::id.asc())
            .select(User::as_select())
            .load(conn)
            .map_err(Into::into)
    }

    /// Slugs equal to `base` or of the form `base-<suffix>`
    pub fn slugs_like(conn: &mut PgConnection, base: &str) -> Result<Vec<String>, RepositoryError> {
        users::table
            .select(users::slug)
            .filter(users::slug.eq(base).or(users::slug.like(format!("{base}-%"))))
            .load(conn)
            .map_err(Into::into)
    }

    pub fn create(conn: &mut PgConnection, new_user: &NewUser) -> Result<User, RepositoryError> {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn update(
        conn: &mut PgConnection,
        id: i32,
        changes: &UpdateUser,
    ) -> Result<User, RepositoryError> {
        diesel::update(users::table.find(id))
            .set(changes)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(Into::into)
    }

    pub fn update_password(
        conn: &mut PgConnection,
        id: i32,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let updated = diesel::update(users::table.find(id))
            .set(users::password.eq(password_hash))
            .execute(conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound(format!("User {id}")));
        }
        Ok(())
    }

    /// Roles, providers and refresh tokens go with it (ON DELETE CASCADE)
    pub fn delete(conn: &mut PgConnection, id: i32) -> Result<(), RepositoryError> {
        let deleted = diesel::delete(users::table.find(id)).execute(conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound(format!("User {id}")));
        }
        Ok(())
    }
}
