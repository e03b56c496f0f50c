//! Domain layer - pure types and logic, no I/O.

pub mod conversation;
pub mod orchestration;
pub mod travel;
