//! Sturdy — a resilient outbound request layer.
//!
//! Wraps outbound HTTP calls with bounded retries and exponential backoff,
//! per-attempt deadlines with cancellation, connectivity-aware fallback to a
//! persisted response cache, and a taxonomy of user-facing errors carrying a
//! bound retry affordance.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use sturdy::cache::MemoryCache;
//! use sturdy::client::RequestClient;
//! use sturdy::connectivity::AssumeOnline;
//! use sturdy::notify::LogSink;
//! use sturdy::types::RequestSpec;
//!
//! # async fn example() {
//! let client = RequestClient::new(
//!     Arc::new(AssumeOnline),
//!     Arc::new(MemoryCache::new()),
//!     Arc::new(LogSink),
//! );
//! let spec = RequestSpec::get("https://example.com/api/categories")
//!     .with_cache_key("categories")
//!     .with_description("load categories");
//! let result = client.execute(&spec).await.unwrap();
//! println!("{:?}", result.data);
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod connectivity;
pub mod error;
pub mod notify;
#[cfg(test)]
pub mod testsupport;
pub mod types;
