mod connection_registry;
mod feed_message;
mod shutdown;
