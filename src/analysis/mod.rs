mod cache;
pub mod git;


pub use cache::{CommitCache, LoadOutcome};
pub use git::{GitHistoryProvider, HistoryProvider};
