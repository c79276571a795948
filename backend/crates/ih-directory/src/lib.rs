pub mod directory_session;
pub mod error;
pub mod feed_key;
pub mod metrics;
pub mod user_change;
pub mod user_change_feed;
pub mod user_directory;
pub mod user_watch;

pub use directory_session::DirectorySession;
pub use error::{DirectoryError, Result};
pub use feed_key::FeedKey;
pub use ih_config::ListPolicy;
pub use metrics::DirectoryMetrics;
pub use user_change::{ChangeKind, UserChange};
pub use user_change_feed::UserChangeFeed;
pub use user_directory::UserDirectory;
pub use user_watch::{UserWatch, WatchEvent};
