// 進捗管理

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::constants::THROUGHPUT_INTERVAL;

/// 進捗統計
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressStats {
    pub tasks_completed: u64,
    pub nodes_searched: u64,
}

/// 完了タスク数とノード数の集計。処理速度の報告専用で探索結果には影響しない
pub struct ProgressManager {
    tasks_completed: AtomicU64,
    nodes_searched: AtomicU64,
    report_interval: u64,
    last_report: Mutex<Instant>,
    start_time: Instant,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self::with_interval(THROUGHPUT_INTERVAL)
    }

    pub fn with_interval(report_interval: u64) -> Self {
        let now = Instant::now();
        Self {
            tasks_completed: AtomicU64::new(0),
            nodes_searched: AtomicU64::new(0),
            report_interval: report_interval.max(1),
            last_report: Mutex::new(now),
            start_time: now,
        }
    }

    /// タスク 1 件の完了を記録する。報告間隔に達したら (完了数, タスク/秒) を返す
    pub fn complete_task(&self) -> Option<(u64, f64)> {
        let done = self.tasks_completed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.report_interval != 0 {
            return None;
        }
        let mut last = self.last_report.lock().unwrap_or_else(|e| e.into_inner());
        let interval = last.elapsed().as_secs_f64();
        *last = Instant::now();
        let rate = if interval > 0.0 {
            self.report_interval as f64 / interval
        } else {
            0.0
        };
        Some((done, rate))
    }

    /// ノード数を追加
    pub fn add_nodes(&self, count: u64) {
        self.nodes_searched.fetch_add(count, Ordering::Relaxed);
    }

    /// 現在の統計を取得
    pub fn get_stats(&self) -> ProgressStats {
        ProgressStats {
            tasks_completed: self.tasks_completed.load(Ordering::Relaxed),
            nodes_searched: self.nodes_searched.load(Ordering::Relaxed),
        }
    }

    /// 経過時間を取得
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 検索速度（ノード/秒）を取得
    pub fn nodes_per_second(&self) -> f64 {
        let nodes = self.nodes_searched.load(Ordering::Relaxed) as f64;
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            nodes / elapsed
        } else {
            0.0
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

/// trials 回の試行で 1% ごとに報告するための間隔
pub fn percent_step(trials: usize) -> usize {
    (trials / 100).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_task_reports_on_interval() {
        let mgr = ProgressManager::with_interval(3);
        assert!(mgr.complete_task().is_none());
        assert!(mgr.complete_task().is_none());
        let (done, rate) = mgr.complete_task().unwrap();
        assert_eq!(done, 3);
        assert!(rate >= 0.0);
        assert!(mgr.complete_task().is_none());
    }

    #[test]
    fn stats_track_nodes_and_tasks() {
        let mgr = ProgressManager::new();
        mgr.add_nodes(1000);
        mgr.complete_task();
        let stats = mgr.get_stats();
        assert_eq!(stats.nodes_searched, 1000);
        assert_eq!(stats.tasks_completed, 1);
        assert!(mgr.nodes_per_second() >= 0.0);
    }

    #[test]
    fn percent_step_never_zero() {
        assert_eq!(percent_step(10_000), 100);
        assert_eq!(percent_step(50), 1);
        assert_eq!(percent_step(0), 1);
    }
}
