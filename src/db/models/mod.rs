pub mod form_submission;
pub mod password_reset;
pub mod refresh_token;
pub mod role;
pub mod social_login;
pub mod user;
