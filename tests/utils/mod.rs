pub mod actions;
pub mod setup;

// Re-export main utilities for use by test files
pub use actions::GameRequest;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
