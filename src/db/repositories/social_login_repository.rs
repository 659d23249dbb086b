use diesel::prelude::*;

use crate::db::error::RepositoryError;
use crate::db::models::social_login::SocialLogin;
use crate::db::schema::social_logins;

pub struct SocialLoginRepository;

impl SocialLoginRepository {
    pub fn find_for_user(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Vec<SocialLogin>, RepositoryError> {
        social_logins::table
            .filter(social_logins::user_id.eq(user_id))
            .order(social_logins::id.asc())
            .select(SocialLogin::as_select())
            .load(conn)
            .map_err(Into::into)
    }
}
