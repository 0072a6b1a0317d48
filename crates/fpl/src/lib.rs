//! Read-only client for the Fantasy Premier League API plus the squad
//! context builder used by the AI advice features.
//!
//! - [`client`] -- reqwest-based [`FplClient`](client::FplClient) for the
//!   bootstrap/entry/picks/history endpoints.
//! - [`catalog`] -- the id -> player-info mapping joined from the bootstrap
//!   collections.
//! - [`context`] -- the per-request squad context builder and its rendered
//!   textual form.

pub mod catalog;
pub mod client;
pub mod context;
pub mod types;

pub use client::{FplClient, FplError};
pub use context::{ContextBuilder, ContextOutcome, ContextVariant, SquadContext};
