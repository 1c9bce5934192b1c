//! REST client for the study backend.
//!
//! Every endpoint answers a `{ success, message, data }` envelope. List
//! endpoints nest a page (`{ data, metadata }`) inside it.

mod client;
pub mod types;

pub use client::ApiClient;
pub use types::*;
