//! The search pipeline.
//!
//! ```text
//! enumerate(root, filter) -> [PathBuf] -> Scanner::scan -> [LineHit] -> SearchResult::aggregate
//! ```
//!
//! [`engine::search`] wires the stages together for a [`crate::SearchRequest`].
pub mod engine;
pub mod enumerator;
pub mod matcher;
pub mod scanner;

pub use engine::search;
pub use enumerator::enumerate;
pub use matcher::TermMatcher;
pub use scanner::Scanner;
