// Library target exists for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can import types via `spellwell::session::*` / `spellwell::stats::*`.
#![allow(dead_code)]

pub mod engine;
pub mod session;
pub mod stats;
pub mod store;
pub mod vocab;

// Private: only the binary exercises these, but they compile as part of the
// library so the whole tree stays checked.
mod app;
mod config;
