pub mod cli;
pub mod config;
pub mod pipeline;
pub mod presentation;

pub use cli::*;
pub use config::*;
pub use pipeline::*;
pub use presentation::*;
