mod pipeline;


pub use pipeline::{run_with_deadline, Pipeline};
