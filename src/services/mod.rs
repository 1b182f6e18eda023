// Service exports
pub mod match_log;

pub use match_log::{MatchLog, MatchLogEntry, MatchLogError};
