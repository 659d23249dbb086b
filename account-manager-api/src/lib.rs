//! # account-manager-api
//!
//! Shared API types for the account-manager service.
//! This crate is designed to be WASM-compatible and can be used in both
//! backend (Rust) and frontend (WASM/TypeScript via wasm-bindgen) applications.
//!
//! ## Features
//!
//! - Request DTOs (`UpdateAccountRequest`, `ChangePasswordRequest`, etc.)
//! - Response DTOs (`UserResponse`, `AccountPage`, etc.)
//! - Error response format (`ErrorResponse`)
//! - Redirect + flash contract of mutating actions (`ActionResponse`)
//!
//! ## Example
//!
//! ```rust
//! use account_manager_api::{ActionResponse, Flash};
//!
//! let response = ActionResponse::new(
//!     "/account",
//!     Flash::success("labels.user.profile_updated", "Profile updated."),
//! );
//! assert_eq!(response.redirect_to, "/account");
//! ```

pub mod error;
pub mod flash;
pub mod requests;
pub mod responses;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use flash::{ActionResponse, Flash, FlashLevel};
pub use requests::*;
pub use responses::*;
