pub mod identity_assertion;
pub mod role;
pub mod sync_profile;
pub mod user_record;
