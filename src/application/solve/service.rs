// 全消し探索サービス（アルゴリズム名から各ソルバーへ振り分ける）

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use std::fmt;
use std::str::FromStr;

use crate::domain::grid::Grid;
use crate::domain::search::{BeamParams, InfiniteParams, RandomParams, Solution, SolverEvent};
use crate::infrastructure::executor::ParallelConfig;
use crate::search::{solve_beam, solve_infinite, solve_random, solve_random_parallel, SearchContext};

/// 探索アルゴリズム
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Random,
    RandomMt,
    Beam,
    Infinite,
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(Algorithm::Random),
            "random_mt" => Ok(Algorithm::RandomMt),
            "beam" => Ok(Algorithm::Beam),
            "infinite" => Ok(Algorithm::Infinite),
            other => Err(anyhow!("不明なソルバー: {}", other)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Random => "random",
            Algorithm::RandomMt => "random_mt",
            Algorithm::Beam => "beam",
            Algorithm::Infinite => "infinite",
        };
        f.write_str(name)
    }
}

/// 探索を管理するサービス。実行ごとに新しい探索コンテキストを作る
pub struct SolveService {
    parallel: ParallelConfig,
}

impl SolveService {
    pub fn new(parallel: ParallelConfig) -> Self {
        Self { parallel }
    }

    /// 位置引数のパラメータで探索を実行する（不正な値は既定値になる）
    pub fn run(
        &self,
        grid: &Grid,
        algorithm: Algorithm,
        args: &[String],
        events: Sender<SolverEvent>,
    ) -> Result<Option<Solution>> {
        let ctx = SearchContext::new(self.parallel.clone(), events);
        match algorithm {
            Algorithm::Random => {
                let params = RandomParams::from_args(args);
                ctx.emit(SolverEvent::Log(format!("random: 試行={}", params.trials)));
                Ok(solve_random(grid, &params, &ctx))
            }
            Algorithm::RandomMt => {
                let params = RandomParams::from_args(args);
                ctx.emit(SolverEvent::Log(format!(
                    "random_mt: 試行={} / ワーカー={}",
                    params.trials, ctx.parallel.num_workers
                )));
                solve_random_parallel(grid, &params, &ctx)
            }
            Algorithm::Beam => {
                let params = BeamParams::from_args(args);
                ctx.emit(SolverEvent::Log(format!(
                    "beam: 回数={} / 保持={} / 深さ={} / 上限={} / 評価={}",
                    params.iterations,
                    params.keep_size,
                    params.depth,
                    params.cutoff,
                    params.score_function
                )));
                solve_beam(grid, &params, &ctx)
            }
            Algorithm::Infinite => {
                let params = InfiniteParams::from_args(args);
                ctx.emit(SolverEvent::Log(format!(
                    "infinite: 上限={} / キャッシュ深さ={} / ワーカー={}",
                    params.cutoff, params.cache_depth, ctx.parallel.num_workers
                )));
                solve_infinite(grid, &params, &ctx)
            }
        }
    }
}

impl Default for SolveService {
    fn default() -> Self {
        Self::new(ParallelConfig::default())
    }
}
