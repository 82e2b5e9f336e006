pub mod completion;
pub mod dto;
mod enrich;
mod extract;
pub mod handlers;
mod prompt;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::generate_routes()
}
