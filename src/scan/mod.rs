pub mod collector;
pub mod matcher;
pub mod parallel;
pub mod reference;
pub mod report;

pub use collector::DocumentCollector;
pub use matcher::{ImportMatcher, MatchRecord, ResourceScan, SkippedDocument};
pub use parallel::map_bounded;
pub use reference::ReferenceFetcher;
pub use report::MatchReport;
