//! Infrastructure helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{data_dir, expand_tilde};
