pub mod error;
pub mod models;
pub mod timestamp;
pub mod validation;

pub use error::ErrorResponse;
pub use models::*;
pub use validation::*;
