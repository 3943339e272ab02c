//! # Web API Request Handlers
//!
//! Handlers are thin: extract the caller, hand the request to the task service and
//! wrap the result in the response envelope.

pub mod health;
pub mod tasks;
