mod error;
mod extract;
pub mod metrics;
mod state;

pub use error::ApiError;
pub use extract::{PictureBody, PictureId};
pub use state::AppState;
