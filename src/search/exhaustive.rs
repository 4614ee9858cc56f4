// 総当たり分枝限定探索（相対インデックス列を有界キュー経由でワーカーへ配る）

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;

use crate::domain::grid::{distinct_colors, Cluster, Grid};
use crate::domain::search::{InfiniteParams, RunPlan, Solution, SolverEvent};
use crate::infrastructure::executor::run_pipeline;
use crate::search::context::SearchContext;
use crate::vlog;

/// ワーカーへのタスク。根局面（共有・読み取り専用）と辿る後続インデックス列
pub struct SearchTask<'a> {
    pub root: &'a Grid,
    pub clusters: &'a [Cluster],
    pub path: Vec<usize>,
}

struct Exhaustive<'a> {
    ctx: &'a SearchContext,
    root: &'a Grid,
    clusters: &'a [Cluster],
}

impl<'a> Exhaustive<'a> {
    /// タスク列を生成する（生産者）。
    ///
    /// 残り手数が full_levels 以下の段は根の領域数まで、それより浅い段は
    /// 上位 search_width 件だけ分岐する。上限は分岐を決めるたびに読み直す。
    /// 最も深い段で選んだインデックスが初手になる
    fn create_tasks(
        &self,
        level: usize,
        max_width: usize,
        plan: RunPlan,
        prefix: &mut Vec<usize>,
        tx: &Sender<SearchTask<'a>>,
    ) -> Result<()> {
        let width = if self.ctx.best().get().saturating_sub(level + 1) > plan.full_levels {
            plan.search_width
        } else {
            max_width
        };

        for i in 0..width {
            prefix.push(i);
            if level + 2 > self.ctx.best().get() {
                let mut path = prefix.clone();
                path.reverse();
                tx.send(SearchTask {
                    root: self.root,
                    clusters: self.clusters,
                    path,
                })
                .map_err(|_| anyhow!("タスクキューが閉じています"))?;
            } else {
                self.create_tasks(level + 1, max_width, plan, prefix, tx)?;
            }
            prefix.pop();
        }
        Ok(())
    }

    /// 1 タスクを最後まで辿る（ワーカー）
    fn run_task(&self, task: &SearchTask<'_>) {
        let nodes = self.walk(task.root, task.clusters, &task.path);
        self.ctx.progress().add_nodes(nodes);
        if let Some((completed, rate)) = self.ctx.progress().complete_task() {
            self.ctx.emit(SolverEvent::Throughput { completed, rate });
        }
    }

    /// path に従って後続局面を辿り、訪れたノード数を返す
    fn walk(&self, grid: &Grid, clusters: &[Cluster], path: &[usize]) -> u64 {
        // 1. これ以上短くできない
        if grid.action_count() >= self.ctx.best().get() {
            return 1;
        }
        // 2. 全消し
        if clusters.is_empty() {
            self.ctx.offer_grid(grid);
            return 1;
        }
        let Some((&index, rest)) = path.split_first() else {
            return 1;
        };
        // 3. 1 手で消せるのは 1 色だけ
        if distinct_colors(clusters) > path.len() {
            return 1;
        }
        // 4. この局面に存在しない後続
        if index >= clusters.len() {
            return 1;
        }

        let next = self.ctx.successors().next_states(grid, clusters);
        let chosen = &next[index];
        1 + self.walk(&chosen.grid, &chosen.clusters, rest)
    }
}

/// 総当たり分枝限定探索。
///
/// 生産者が段階スケジュールに沿ってインデックス列を有界キューへ積み、
/// ワーカープールが共有上限を見ながら辿る。全段階を積み終えたらキューを閉じ、
/// 残りのタスクを処理し終えて戻る
pub fn solve_infinite(
    grid: &Grid,
    params: &InfiniteParams,
    ctx: &SearchContext,
) -> Result<Option<Solution>> {
    ctx.best().lower_to(params.cutoff);
    ctx.successors().set_depth(params.cache_depth);

    let clusters = grid.clusters();
    if clusters.is_empty() {
        ctx.offer_grid(grid);
        return Ok(ctx.best_solution());
    }

    let search = Exhaustive {
        ctx,
        root: grid,
        clusters: &clusters,
    };
    let max_width = clusters.len();

    run_pipeline(
        &ctx.parallel,
        |tx| {
            for plan in &params.run_plan {
                ctx.emit(SolverEvent::RunPlan(*plan));
                vlog!("[infinite] 段階開始 {} / 上限={}", plan, ctx.best().get());
                let mut prefix = Vec::new();
                search.create_tasks(0, max_width, *plan, &mut prefix, tx)?;
            }
            Ok(())
        },
        |task| search.run_task(&task),
    )?;

    let stats = ctx.progress().get_stats();
    ctx.emit(SolverEvent::Log(format!(
        "タスク={} / ノード={} ({:.0} ノード/秒, {:.1}秒) / キャッシュ hit={} miss={} 件数={}",
        stats.tasks_completed,
        stats.nodes_searched,
        ctx.progress().nodes_per_second(),
        ctx.progress().elapsed().as_secs_f64(),
        ctx.successors().hits(),
        ctx.successors().misses(),
        ctx.successors().len()
    )));

    Ok(ctx.best_solution())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Color;
    use crate::infrastructure::executor::ParallelConfig;
    use crate::search::successor::expand;
    use crossbeam_channel::unbounded;

    fn checkerboard() -> Grid {
        let mut g = Grid::new();
        g.set(0, 0, Color::Orange).unwrap();
        g.set(1, 0, Color::Blue).unwrap();
        g.set(0, 1, Color::Blue).unwrap();
        g.set(1, 1, Color::Orange).unwrap();
        g
    }

    fn small_params(cutoff: usize) -> InfiniteParams {
        InfiniteParams {
            cutoff,
            cache_depth: 5,
            run_plan: vec![RunPlan::new(1, 1), RunPlan::new(3, 2)],
        }
    }

    #[test]
    fn single_color_block_takes_one_move() {
        let mut g = Grid::new();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            g.set(x, y, Color::Blue).unwrap();
        }
        let ctx = SearchContext::silent(ParallelConfig::new(2));
        let sol = solve_infinite(&g, &InfiniteParams::default(), &ctx)
            .unwrap()
            .unwrap();
        assert_eq!(sol.moves, 1);
        assert!(sol.verify(&g));
    }

    #[test]
    fn checkerboard_converges_to_three_moves() {
        let g = checkerboard();
        let ctx = SearchContext::silent(ParallelConfig::new(4));
        let sol = solve_infinite(&g, &small_params(10), &ctx).unwrap().unwrap();
        assert_eq!(sol.moves, 3);
        assert!(sol.verify(&g));
    }

    #[test]
    fn reported_bests_strictly_decrease_and_replay() {
        let mut g = Grid::new();
        // 3 列の小さな盤面
        let rows = [
            [Color::Orange, Color::Blue, Color::Orange],
            [Color::Green, Color::Orange, Color::Blue],
            [Color::Blue, Color::Green, Color::Orange],
        ];
        for (y, row) in rows.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                g.set(x, y, c).unwrap();
            }
        }
        let (tx, rx) = unbounded();
        let ctx = SearchContext::new(ParallelConfig::new(4).with_queue_capacity(4), tx);
        let params = InfiniteParams {
            cutoff: 10,
            cache_depth: 3,
            run_plan: vec![RunPlan::new(1, 1), RunPlan::new(2, 1)],
        };
        let sol = solve_infinite(&g, &params, &ctx).unwrap().unwrap();
        drop(ctx);

        let bests: Vec<Solution> = rx
            .iter()
            .filter_map(|e| match e {
                SolverEvent::NewBest(s) => Some(s),
                _ => None,
            })
            .collect();
        assert!(!bests.is_empty());
        assert!(bests.windows(2).all(|w| w[1].moves < w[0].moves));
        for s in &bests {
            assert!(s.verify(&g));
            assert_eq!(s.moves, s.actions.len());
        }
        assert_eq!(bests.last().unwrap(), &sol);
    }

    #[test]
    fn cutoff_too_small_finds_nothing() {
        let g = checkerboard();
        let ctx = SearchContext::silent(ParallelConfig::new(2));
        // 3 手必要なので上限 3 では見つからない（上限と同じ手数は改善ではない）
        let sol = solve_infinite(&g, &small_params(3), &ctx).unwrap();
        assert!(sol.is_none());
    }

    #[test]
    fn invalid_index_is_pruned() {
        let g = checkerboard();
        let clusters = g.clusters();
        let ctx = SearchContext::silent(ParallelConfig::new(1));
        ctx.best().lower_to(10);
        let search = Exhaustive {
            ctx: &ctx,
            root: &g,
            clusters: &clusters,
        };
        let nodes = search.walk(&g, &clusters, &[7, 0, 0, 0]);
        assert_eq!(nodes, 1);
        assert!(ctx.best_solution().is_none());
    }

    #[test]
    fn color_bound_prunes_short_paths() {
        let g = checkerboard();
        let clusters = g.clusters();
        let ctx = SearchContext::silent(ParallelConfig::new(1));
        ctx.best().lower_to(10);
        let search = Exhaustive {
            ctx: &ctx,
            root: &g,
            clusters: &clusters,
        };
        // 2 色あるので 1 手分の列では辿らない
        assert_eq!(search.walk(&g, &clusters, &[0]), 1);
    }

    #[test]
    fn walk_follows_ranked_successors() {
        let g = checkerboard();
        let clusters = g.clusters();
        let ctx = SearchContext::silent(ParallelConfig::new(1));
        ctx.best().lower_to(10);
        let search = Exhaustive {
            ctx: &ctx,
            root: &g,
            clusters: &clusters,
        };
        let first = expand(&g, &clusters).remove(0);
        search.walk(&g, &clusters, &[0, 0, 0, 0]);
        let sol = ctx.best_solution().unwrap();
        assert_eq!(sol.actions[0], first.grid.actions()[0]);
        assert!(sol.verify(&g));
    }

    #[test]
    fn producer_emits_run_plan_events() {
        let g = checkerboard();
        let (tx, rx) = unbounded();
        let ctx = SearchContext::new(ParallelConfig::new(2), tx);
        solve_infinite(&g, &small_params(10), &ctx).unwrap();
        drop(ctx);
        let plans: Vec<RunPlan> = rx
            .iter()
            .filter_map(|e| match e {
                SolverEvent::RunPlan(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(plans, vec![RunPlan::new(1, 1), RunPlan::new(3, 2)]);
    }
}
