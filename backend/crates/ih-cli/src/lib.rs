//! ih-cli library
//!
//! Exports the HTTP client, which also serves as a remote `DirectoryApi`.

pub(crate) mod client;

#[cfg(test)]
mod tests;

pub use client::{CliClientResult, Client, ClientError, WireUser};
