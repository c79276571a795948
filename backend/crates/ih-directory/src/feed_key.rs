use std::fmt;

/// Which live query a subscriber follows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedKey {
    /// One identity's record
    User(String),
    /// The list of every record
    AllUsers,
}

impl FeedKey {
    pub fn user(external_identity_id: impl Into<String>) -> Self {
        Self::User(external_identity_id.into())
    }
}

impl fmt::Display for FeedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{}", id),
            Self::AllUsers => f.write_str("users:*"),
        }
    }
}
