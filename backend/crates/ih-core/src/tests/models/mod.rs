mod identity_assertion;
mod role;
mod sync_profile;
