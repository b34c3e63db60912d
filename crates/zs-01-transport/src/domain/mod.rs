//! # Domain Layer
//!
//! Request/response value objects and transport errors.

pub mod errors;
pub mod value_objects;

pub use errors::TransportError;
pub use value_objects::{build_url, HttpMethod, HttpResponse};
