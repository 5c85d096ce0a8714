pub mod aggregation;
pub mod filename;
pub mod ticks;

pub use aggregation::{aggregate_weekly, bucket_start};
pub use filename::sanitize_filename;
pub use ticks::{generate_ticks, tick_label};
