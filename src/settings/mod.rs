//! Settings file loading and command-line parsing.
//! See `bin/settings_demo.rs` for a binary exercising both.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
