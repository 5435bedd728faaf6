//! # Blog Shared
//!
//! Wire types shared between the API server and its clients.
//! Kept free of domain and infrastructure crates so it can be compiled for any client.

pub mod dto;
pub mod response;

pub use dto::{PostResponse, SearchQuery};
pub use response::ErrorResponse;
