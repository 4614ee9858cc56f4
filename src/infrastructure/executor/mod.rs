pub mod parallel;

pub use parallel::{run_pipeline, run_workers, ParallelConfig};
