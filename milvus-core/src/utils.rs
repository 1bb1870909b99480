use chrono::{DateTime, Utc};

/// Number of logical bits below the physical part of a hybrid timestamp.
pub const LOGICAL_BITS: u32 = 18;

/// Converts a wall-clock time into a Milvus hybrid timestamp (logical part zero).
///
/// Times before the Unix epoch clamp to 0, which the server reads as "now".
pub fn hybrid_timestamp(time: DateTime<Utc>) -> u64 {
    let physical = time.timestamp_millis().max(0) as u64;
    physical << LOGICAL_BITS
}

/// Same as [`hybrid_timestamp`], mapping `None` to 0.
pub fn optional_hybrid_timestamp(time: Option<DateTime<Utc>>) -> u64 {
    time.map_or(0, hybrid_timestamp)
}
