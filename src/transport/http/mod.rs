pub mod listener;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod entries;
    pub mod health;
}

pub use listener::bind_first_available;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
