// 探索関連のドメインモデル

pub mod config;
pub mod event;
pub mod result;

pub use config::{BeamParams, InfiniteParams, RandomParams, RunPlan, ScoreFunction};
pub use event::SolverEvent;
pub use result::Solution;
