//! Web server module
//!
//! JSON API over the suggestion engine and the global search.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
