//! Authenticated request pipeline for the events API.
//!
//! [`ApiClient`] sends every call with the current bearer token and
//! recovers from an expired access token by refreshing it once through the
//! shared [`Session`].

mod client;
mod error;
mod request;
mod session;

pub use client::*;
pub use error::*;
pub use request::*;
pub use session::*;
