//! HTTP handlers, grouped by resource.

pub mod advice;
pub mod auth;
pub mod users;
