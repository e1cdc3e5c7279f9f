//! Command-line interface of the replay tool

pub mod args;

pub use args::Args;
