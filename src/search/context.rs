// 探索コンテキスト（メモ化キャッシュ・共有上限・ワーカー設定・イベント送信）

use crossbeam_channel::{unbounded, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::progress::ProgressManager;
use crate::constants::DEFAULT_CACHE_DEPTH;
use crate::domain::grid::Grid;
use crate::domain::search::{Solution, SolverEvent};
use crate::infrastructure::executor::ParallelConfig;
use crate::search::successor::SuccessorCache;

/// 全消し手数の共有上限（小さくなる一方）。
///
/// `get` はロックなしの高速読み取りで、古い値を読んでも無駄な探索が増えるだけ。
/// 更新と報告は必ずロック内で行うので、報告される手数は狭義単調減少する
pub struct BestBound {
    fast: AtomicUsize,
    slot: Mutex<(usize, Option<Solution>)>,
}

impl BestBound {
    pub fn new(initial: usize) -> Self {
        Self {
            fast: AtomicUsize::new(initial),
            slot: Mutex::new((initial, None)),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.fast.load(Ordering::Relaxed)
    }

    /// 上限を bound 以下に下げる（既に小さければ何もしない）
    pub fn lower_to(&self, bound: usize) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if bound < slot.0 {
            slot.0 = bound;
            self.fast.store(bound, Ordering::Relaxed);
        }
    }

    /// 現在の上限より短ければ採用し、ロック中に on_improve を呼ぶ
    pub fn try_improve<F: FnOnce(&Solution)>(&self, solution: Solution, on_improve: F) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if solution.moves >= slot.0 {
            return false;
        }
        slot.0 = solution.moves;
        self.fast.store(solution.moves, Ordering::Relaxed);
        on_improve(&solution);
        slot.1 = Some(solution);
        true
    }

    /// これまでの最良手順
    pub fn solution(&self) -> Option<Solution> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).1.clone()
    }
}

/// 1 回の探索実行が所有する共有状態。ソルバーの入口にはすべて参照で渡す
pub struct SearchContext {
    pub parallel: ParallelConfig,
    successors: SuccessorCache,
    best: BestBound,
    progress: ProgressManager,
    events: Sender<SolverEvent>,
}

impl SearchContext {
    pub fn new(parallel: ParallelConfig, events: Sender<SolverEvent>) -> Self {
        Self {
            parallel,
            successors: SuccessorCache::new(DEFAULT_CACHE_DEPTH),
            best: BestBound::new(usize::MAX),
            progress: ProgressManager::new(),
            events,
        }
    }

    /// イベントを受け取らない実行用
    pub fn silent(parallel: ParallelConfig) -> Self {
        let (tx, _) = unbounded();
        Self::new(parallel, tx)
    }

    pub fn successors(&self) -> &SuccessorCache {
        &self.successors
    }

    pub fn best(&self) -> &BestBound {
        &self.best
    }

    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// イベント送信（受信側がいなくても探索は続ける）
    pub fn emit(&self, event: SolverEvent) {
        let _ = self.events.send(event);
    }

    /// 手順を提示し、最良なら NewBest を送る
    pub fn offer(&self, solution: Solution) -> bool {
        self.best.try_improve(solution, |s| {
            crate::vlog!("[best] {} 手", s.moves);
            let _ = self.events.send(SolverEvent::NewBest(s.clone()));
        })
    }

    /// 全消し済みの盤面の履歴を手順として提示する
    pub fn offer_grid(&self, grid: &Grid) -> bool {
        if grid.action_count() >= self.best.get() {
            return false;
        }
        self.offer(Solution::from_grid(grid))
    }

    pub fn best_solution(&self) -> Option<Solution> {
        self.best.solution()
    }
}
