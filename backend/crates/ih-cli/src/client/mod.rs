pub(crate) mod client;
pub(crate) mod directory_api;
pub(crate) mod error;
pub(crate) mod wire_user;

pub use client::Client;
pub use error::{ClientError, Result as CliClientResult};
pub use wire_user::WireUser;
