//! Command implementations.

mod completions;
mod upload;

pub use completions::generate_completions;
pub use upload::run_upload;
