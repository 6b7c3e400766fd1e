//! Client-side account state.
//!
//! # Design Decisions
//! - State is an explicit immutable snapshot passed to whoever needs it,
//!   not a process-wide singleton; `with_*` setters return a new snapshot
//! - Display-only data lives here; secrets (PAN/CVC) never do

pub mod market;
pub mod snapshot;

pub use market::{MarketIndex, MARKET_INDEX_USDC};
pub use snapshot::AccountSnapshot;
