#![doc = include_str!("../README.md")]

pub mod auth;
pub mod client;
pub mod error;
pub mod operation;
pub mod response;
pub mod time;
pub mod xml;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::ServiceClient;
pub use error::{AzureError, AzureResult};
pub use operation::RestOperation;
pub use response::ServiceResponse;
