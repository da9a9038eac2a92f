//! Command implementations shared by the `carelog` and `diaper-types`
//! binaries.

pub mod commands;
pub mod logging;
pub mod summary;
