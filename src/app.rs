use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{account, admin, auth, forms, health::health};
use crate::state::AppState;

/// Routes d'authentification et de réinitialisation du mot de passe
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/password/email", post(auth::send_password_reset))
        .route("/password/reset", post(auth::reset_password))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/account",
            get(account::index)
                .post(account::update)
                .delete(account::delete),
        )
        .route("/account/confirmation", post(account::send_confirmation))
        .route(
            "/account/confirmation/{token}",
            get(account::confirm_email).post(account::confirm_email),
        )
        .route("/account/password", post(account::change_password))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/form-submissions", get(admin::list_submissions))
        .route(
            "/form-submissions/{id}",
            get(admin::show_submission).delete(admin::delete_submission),
        )
        .route("/users", get(admin::list_users))
}

/// Construit l'application complète
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/forms/{type}", post(forms::submit))
        .merge(auth_routes())
        .merge(account_routes())
        .nest("/admin", admin_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Middleware global de tracing
        .layer(TraceLayer::new_for_http())
}
