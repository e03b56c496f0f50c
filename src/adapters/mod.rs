//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod http;
pub mod search;
pub mod validation;
