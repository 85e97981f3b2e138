//! HTTP API for the generation service.

pub mod handlers;
