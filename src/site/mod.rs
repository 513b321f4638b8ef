pub(crate) mod config;
pub(crate) mod runtime;
pub(crate) mod snapshot;
