//! CLI command implementations.

pub(crate) mod run;
pub(crate) mod runs;
pub(crate) mod show;
pub(crate) mod window;
