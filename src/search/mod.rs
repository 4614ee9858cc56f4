// 探索モジュール

pub mod beam;
pub mod context;
pub mod exhaustive;
pub mod random;
pub mod successor;

pub use beam::{solve_beam, BeamCandidate};
pub use context::{BestBound, SearchContext};
pub use exhaustive::{solve_infinite, SearchTask};
pub use random::{random_playout, solve_random, solve_random_parallel};
pub use successor::{expand, score_state, NextState, SuccessorCache};
