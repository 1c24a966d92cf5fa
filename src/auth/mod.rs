mod dto;
mod extractors;
mod handlers;
mod password;
mod repo;
mod session;

pub use extractors::{AuthUser, MaybeAuthUser};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
