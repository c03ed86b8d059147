pub mod models;
pub mod parser;
pub mod macros;
pub mod services;
pub mod errors;

pub use models::*;
pub use macros::*;
pub use services::*;
pub use errors::*;
