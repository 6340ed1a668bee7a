pub mod client;
pub mod codec;
pub mod error;
pub mod rpc;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use client::*;
pub use error::*;
