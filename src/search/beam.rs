// ビーム探索

use anyhow::{Context, Result};
use rand::Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::domain::grid::{Action, Grid};
use crate::domain::search::{BeamParams, ScoreFunction, Solution, SolverEvent};
use crate::infrastructure::executor::ParallelConfig;
use crate::search::context::SearchContext;
use crate::search::random::random_playout;
use crate::vlog;

/// ビーム内の候補
#[derive(Clone, Debug)]
pub struct BeamCandidate {
    pub grid: Grid,
    /// 直近の評価でのロールアウト手数の合計
    pub total_score: usize,
    /// これまでに見つけた最短の手数と手順
    pub best_score: usize,
    pub best_actions: Option<Vec<Action>>,
    /// 並べ替えに使う評価値（小さいほど良い）
    pub score: f64,
}

impl BeamCandidate {
    pub fn new(grid: Grid, cutoff: usize) -> Self {
        Self {
            grid,
            total_score: 0,
            best_score: cutoff,
            best_actions: None,
            score: 0.0,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_cleared()
    }

    fn record(&mut self, moves: usize, actions: &[Action]) {
        if moves < self.best_score {
            self.best_score = moves;
            self.best_actions = Some(actions.to_vec());
        }
    }

    /// 評価関数に従って score を計算する
    pub fn evaluate<R: Rng + ?Sized>(&mut self, params: &BeamParams, rng: &mut R) {
        if self.is_solved() {
            let moves = self.grid.action_count();
            let actions = self.grid.actions().to_vec();
            self.record(moves, &actions);
            self.total_score = moves * params.iterations;
            self.score = moves as f64;
            return;
        }

        match params.score_function {
            ScoreFunction::Clusters => {
                self.score = self.grid.count_clusters() as f64;
            }
            ScoreFunction::Average | ScoreFunction::Best => {
                let iterations = params.iterations.max(1);
                self.total_score = 0;
                let mut round_best = usize::MAX;
                for _ in 0..iterations {
                    let mut rollout = self.grid.clone();
                    let res = random_playout(&mut rollout, params.cutoff, rng);
                    self.total_score += res;
                    round_best = round_best.min(res);
                    if res < params.cutoff {
                        self.record(res, rollout.actions());
                    }
                }
                self.score = match params.score_function {
                    ScoreFunction::Best => round_best as f64,
                    _ => self.total_score as f64 / iterations as f64,
                };
            }
        }
    }

    /// 最良ロールアウトの手順（見つかっていれば）
    pub fn best_solution(&self) -> Option<Solution> {
        self.best_actions.as_ref().map(|actions| Solution {
            moves: self.best_score,
            actions: actions.clone(),
        })
    }
}

/// 各候補を 1 手ずつ全展開する。全消し済みの候補はそのまま残す
fn expand_all(beam: Vec<BeamCandidate>, cutoff: usize) -> Vec<BeamCandidate> {
    let mut next = Vec::with_capacity(beam.len());
    for cand in beam {
        if cand.is_solved() {
            next.push(cand);
            continue;
        }
        for cluster in cand.grid.clusters() {
            let mut child = cand.grid.clone();
            child.clear_region(cluster.x as isize, cluster.y as isize);
            next.push(BeamCandidate::new(child, cutoff));
        }
    }
    next
}

/// 評価用のスレッドプール（num_workers 本）
fn scoring_pool(parallel: &ParallelConfig) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(parallel.num_workers.max(1))
        .thread_name(|i| format!("beam-{}", i))
        .build()
        .context("ビーム評価用のスレッドプールを作成できません")
}

/// round ラウンド目に残す候補数
fn keep_count(keep_size: usize, round: usize, total: usize) -> usize {
    keep_size.saturating_mul(round).min(total)
}

/// ビーム探索。
///
/// 各ラウンドで depth 手の全展開・評価・選抜を行い、
/// 保持数は keep_size × ラウンド番号まで広げる。選抜後に 2 件未満なら終了
pub fn solve_beam(
    grid: &Grid,
    params: &BeamParams,
    ctx: &SearchContext,
) -> Result<Option<Solution>> {
    ctx.best().lower_to(params.cutoff);
    let pool = scoring_pool(&ctx.parallel)?;
    let mut beam = vec![BeamCandidate::new(grid.clone(), params.cutoff)];

    for round in 1.. {
        for _ in 0..params.depth {
            beam = expand_all(beam, params.cutoff);
        }
        if beam.is_empty() {
            break;
        }

        pool.install(|| {
            beam.par_iter_mut().for_each(|cand| {
                let mut rng = rand::thread_rng();
                cand.evaluate(params, &mut rng);
            })
        });
        beam.sort_by(|a, b| a.score.total_cmp(&b.score));

        for cand in &beam {
            if cand.best_score < ctx.best().get() {
                if let Some(solution) = cand.best_solution() {
                    ctx.offer(solution);
                }
            }
        }

        let total = beam.len();
        let keep = keep_count(params.keep_size, round, total);
        ctx.emit(SolverEvent::BeamRound {
            round,
            candidates: total,
            best_kept: beam[0].score,
            worst_kept: beam[keep.max(1) - 1].score,
            worst: beam[total - 1].score,
        });
        vlog!("[beam] round={} 候補={} 保持={}", round, total, keep);

        beam.truncate(keep);
        if beam.len() < 2 || beam.iter().all(BeamCandidate::is_solved) {
            break;
        }
    }

    Ok(ctx.best_solution())
}
