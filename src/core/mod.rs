// Core domain layer
pub mod bundle;
pub mod interfaces;
pub mod models;
pub mod services;
pub mod staleness;
pub mod tags;

pub use bundle::*;
pub use interfaces::*;
pub use models::*;
pub use services::*;
pub use staleness::*;
pub use tags::*;
