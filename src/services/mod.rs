//! Service layer: where board items come from.
//!
//! - Live GraphQL fetching (`GitHubProjectSource`)
//! - Offline replay of a raw JSON dump (`DumpSource`)
//! - Token acquisition (`token`)

mod dump;
mod github;
pub mod token;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawBoard;

pub use dump::DumpSource;
pub use github::GitHubProjectSource;

/// A complete, already paginated collection of board items.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch every item of the board.
    async fn fetch(&self) -> Result<RawBoard>;

    /// Short description for log output.
    fn describe(&self) -> String;
}
