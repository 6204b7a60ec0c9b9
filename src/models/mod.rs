pub mod checkpoint;
pub mod constants;
pub mod lead;
pub mod verdict;

pub use checkpoint::{TaskCheckpoint, TaskStatus};
pub use lead::{normalize_email, Lead};
pub use verdict::Verdict;
