pub mod commands;
pub mod serve;
pub mod research;

pub use commands::{Cli, Commands};
