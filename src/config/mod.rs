//! Configuration module for sheetledger
//!
//! This module provides:
//! - Config directory resolution
//! - User settings persistence (source, layout, parsing preferences)

pub mod paths;
pub mod settings;

pub use paths::SheetledgerPaths;
pub use settings::Settings;
