//! # Web API Request Handlers
//!
//! HTTP request handlers organized by resource.

pub mod contacts;
pub mod ddd;
pub mod health;
