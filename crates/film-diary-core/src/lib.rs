pub mod recap;
pub mod stats;

pub use recap::build_recap;
pub use stats::{compute_longest_streak, compute_stats};
