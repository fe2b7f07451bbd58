pub mod play;
pub mod sample;
pub mod seed;
pub mod strings;

pub use seed::format_snapshot_hash;
