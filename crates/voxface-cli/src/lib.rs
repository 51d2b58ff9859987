//! Voxface CLI library.
//!
//! Input loading and the `save`, `save-assets` and `inspect` commands behind
//! the `voxface` binary.

pub mod commands;
pub mod input;
