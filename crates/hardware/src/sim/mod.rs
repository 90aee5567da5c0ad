//! Simulation setup and execution.
//!
//! Provides the backend catalog, command-line literal parsing, binary image
//! loading, and the execution driver.

pub mod catalog;
pub mod driver;
pub mod literal;
pub mod loader;

pub use catalog::Catalog;
pub use driver::{ExecutionDriver, FaultReport};
