//! # Blog Core
//!
//! The domain layer of the blog API.
//! This crate contains the post model, its validation schema and the
//! repository ports, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::RepoError;
pub use validation::{Mode, ValidationErrors};
