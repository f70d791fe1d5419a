//! Shared pieces of the `brandsync` and `brandsync-external` binaries.

pub mod cli;
pub mod config;
pub mod external;
pub mod observability;
pub mod output;
pub mod sync;
