pub mod form_submission_repository;
pub mod password_reset_repository;
pub mod refresh_token_repository;
pub mod role_repository;
pub mod social_login_repository;
pub mod user_repository;

#[cfg(test)]
pub(crate) mod test_db {
    use diesel::{Connection, PgConnection};

    /// Connection wrapped in a transaction that is never committed.
    pub fn connection() -> PgConnection {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let mut conn = PgConnection::establish(&database_url).expect("connect to DATABASE_URL");
        conn.begin_test_transaction().expect("begin test transaction");
        conn
    }
}
