//! Command implementations for drvsync CLI

pub mod completions;
pub mod detect;
pub mod helpers;
pub mod install;
pub mod scan;
pub mod version;
