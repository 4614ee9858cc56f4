// アプリケーション層 - 探索の実行と進捗管理

pub mod progress;
pub mod solve;

pub use progress::ProgressManager;
pub use solve::{Algorithm, SolveService};
