//! Request validation adapters.

mod request_validator;

pub use request_validator::{ChatInput, FieldViolation, RequestValidator, ValidationErrors};
