use std::fmt;

use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use md5::{Digest, Md5};

use crate::db::schema::users;

/// Identifier of the bootstrap account, implicitly granted every permission.
pub const SUPER_ADMIN_ID: i32 = 1;

const AVATAR_BASE_URL: &str = "https://secure.gravatar.com/avatar";

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub active: bool,
    pub confirmation_token: Option<String>,
    pub confirmed: bool,
    pub locale: String,
    pub timezone: String,
    pub slug: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub active: bool,
    pub confirmation_token: Option<String>,
    pub confirmed: bool,
    #[allow(dead_code)]
    pub remember_token: Option<String>,
    pub locale: String,
    pub timezone: String,
    pub slug: String,
    pub last_access_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_super_admin(&self) -> bool {
        self.id == SUPER_ADMIN_ID
    }

    /// Gravatar URL derived from the email address
    pub fn avatar(&self) -> String {
        avatar_url(&self.email)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub fn avatar_url(email: &str) -> String {
    let hash = Md5::digest(email.as_bytes());
    format!("{AVATAR_BASE_URL}/{hash:x}?size=100&d=mm&r=g")
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub confirmation_token: Option<Option<String>>,
    pub confirmed: Option<bool>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub last_access_at: Option<Option<DateTime<Utc>>>,
}
