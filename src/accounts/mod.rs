use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::form_routes())
        .merge(handlers::session_routes())
}
