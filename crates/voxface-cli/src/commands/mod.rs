//! CLI command implementations

pub mod inspect;
pub mod json_output;
pub mod save;
pub mod save_assets;
