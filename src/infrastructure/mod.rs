// インフラ層 - スレッド実行とファイル入出力

pub mod executor;
pub mod storage;

pub use executor::ParallelConfig;
pub use storage::{load_board, SolutionWriter};
