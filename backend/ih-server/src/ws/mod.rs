pub mod connection_registry;
pub mod error;
pub mod feed_connection;
pub mod feed_message;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod user_feed;
