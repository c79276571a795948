mod client;
mod wire_user;
