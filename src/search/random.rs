// ランダム探索（一様ランダムなクリックで全消しを試行）

use anyhow::Result;
use rand::Rng;
use std::sync::Mutex;

use crate::application::progress::percent_step;
use crate::constants::DEFAULT_CUTOFF;
use crate::domain::grid::Grid;
use crate::domain::search::{RandomParams, Solution, SolverEvent};
use crate::infrastructure::executor::run_workers;
use crate::search::context::SearchContext;

/// 全消しまでランダムにクリックする。
///
/// 手数（履歴を含む）が stop に達したら打ち切り `stop + 1` を返す。
/// 全消しできたらその時点の手数を返す
pub fn random_playout<R: Rng + ?Sized>(grid: &mut Grid, stop: usize, rng: &mut R) -> usize {
    loop {
        if grid.action_count() >= stop {
            return stop + 1;
        }
        let clusters = grid.clusters();
        if clusters.is_empty() {
            return grid.action_count();
        }
        let c = clusters[rng.gen_range(0..clusters.len())];
        grid.clear_region(c.x as isize, c.y as isize);
    }
}

/// 1 回の試行。現在の最良より短ければ報告する
fn run_trial<R: Rng + ?Sized>(grid: &Grid, ctx: &SearchContext, rng: &mut R) {
    let mut trial = grid.clone();
    let stop = ctx.best().get();
    if random_playout(&mut trial, stop, rng) < stop {
        ctx.offer_grid(&trial);
    }
}

/// 単一スレッドのランダム探索
pub fn solve_random(grid: &Grid, params: &RandomParams, ctx: &SearchContext) -> Option<Solution> {
    ctx.best().lower_to(DEFAULT_CUTOFF);
    let step = percent_step(params.trials);
    let mut rng = rand::thread_rng();

    for i in 0..params.trials {
        if i % step == 0 {
            ctx.emit(SolverEvent::Progress {
                percent: i * 100 / params.trials,
            });
        }
        run_trial(grid, ctx, &mut rng);
    }
    ctx.best_solution()
}

/// ワーカープールで試行を分担するランダム探索。
/// 試行カウンタと最良手数はそれぞれ 1 つのロックで守る
pub fn solve_random_parallel(
    grid: &Grid,
    params: &RandomParams,
    ctx: &SearchContext,
) -> Result<Option<Solution>> {
    ctx.best().lower_to(DEFAULT_CUTOFF);
    let step = percent_step(params.trials);
    let started = Mutex::new(0usize);

    run_workers(&ctx.parallel, |worker| {
        let mut rng = rand::thread_rng();
        let mut mine = 0u64;
        loop {
            {
                let mut n = started.lock().unwrap_or_else(|e| e.into_inner());
                if *n >= params.trials {
                    break;
                }
                *n += 1;
                if *n % step == 0 {
                    ctx.emit(SolverEvent::Progress {
                        percent: *n * 100 / params.trials,
                    });
                }
            }
            run_trial(grid, ctx, &mut rng);
            mine += 1;
        }
        crate::vlog!("[random_mt] worker={} 試行={}", worker, mine);
    })?;

    Ok(ctx.best_solution())
}
