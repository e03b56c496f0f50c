//! Wayfinder - AI Travel Planning Assistant
//!
//! This crate routes free-form travel requests into specialized lookup
//! capabilities (flights, hotels, activities) through a bounded
//! reasoning/invocation loop, and synthesizes one answer from the results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
