// フォーマー全消し探索 - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod presentation;   // プレゼンテーション層
pub mod search;
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use application::{Algorithm, SolveService};
pub use constants::{H, W};
pub use domain::grid::{Action, Cell, Cluster, Color, Grid};
pub use domain::search::{BeamParams, InfiniteParams, RandomParams, RunPlan, ScoreFunction, Solution, SolverEvent};
pub use infrastructure::executor::ParallelConfig;
pub use search::SearchContext;
