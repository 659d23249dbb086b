use chrono::{DateTime, Utc};
use diesel::{Queryable, Selectable};

use crate::db::schema::social_logins;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = social_logins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialLogin {
    pub id: i32,
    pub user_id: i32,
    pub provider: String,
    #[allow(dead_code)]
    pub provider_id: String,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}
