// Filter implementations and the chain that runs them
pub mod chain;
pub mod command;
pub mod css_processor;
pub mod minifier;
pub mod registry;

pub use chain::*;
pub use command::*;
pub use css_processor::*;
pub use minifier::*;
pub use registry::*;
