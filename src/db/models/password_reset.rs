use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};

use crate::db::schema::password_resets;

/// One pending reset per email; `token` holds the bcrypt hash of the mailed token.
#[derive(Insertable, Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = password_resets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PasswordReset {
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}
