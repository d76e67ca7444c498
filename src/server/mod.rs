/// Router construction
pub mod app;
/// Route handlers
pub mod handlers;
/// Shared request state
pub mod state;

pub use app::create_app;
pub use state::AppState;
