pub mod fetcher;
pub mod parser;
pub mod types;

pub use fetcher::{build_client, fetch_feed, normalize_feed_url, FetchError, FetchResult};
pub use types::{FeedEntry, FetchedFeed};
