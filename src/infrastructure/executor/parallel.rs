// 並列実行管理

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Sender};
use std::thread;

use crate::constants::DEFAULT_QUEUE_CAPACITY;

/// 並列実行設定
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// ワーカースレッド数
    pub num_workers: usize,
    /// タスクキューの容量（満杯なら生産者がブロックする）
    pub queue_capacity: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ParallelConfig {
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity.max(1);
        self
    }
}

/// 有界キューを挟んだ生産者 / ワーカープール。
///
/// `producer` は呼び出しスレッドで実行され、戻った時点でキューを閉じる。
/// ワーカーは残りのタスクをすべて処理してから終了し、全員の終了を待って戻る
pub fn run_pipeline<T, P, F>(config: &ParallelConfig, producer: P, worker: F) -> Result<()>
where
    T: Send,
    P: FnOnce(&Sender<T>) -> Result<()>,
    F: Fn(T) + Sync,
{
    let worker = &worker;
    let (task_tx, task_rx) = bounded::<T>(config.queue_capacity.max(1));

    thread::scope(|s| {
        let handles: Vec<_> = (0..config.num_workers.max(1))
            .map(|_| {
                let task_rx = task_rx.clone();
                s.spawn(move || {
                    while let Ok(task) = task_rx.recv() {
                        worker(task);
                    }
                })
            })
            .collect();
        drop(task_rx);

        let produced = producer(&task_tx);
        drop(task_tx);

        for h in handles {
            h.join()
                .map_err(|_| anyhow!("ワーカースレッドが異常終了しました"))?;
        }
        produced
    })
}

/// 同じ処理を num_workers 本のスレッドで実行し、全員の終了を待つ
pub fn run_workers<F>(config: &ParallelConfig, worker: F) -> Result<()>
where
    F: Fn(usize) + Sync,
{
    let worker = &worker;
    thread::scope(|s| {
        let handles: Vec<_> = (0..config.num_workers.max(1))
            .map(|id| s.spawn(move || worker(id)))
            .collect();
        for h in handles {
            h.join()
                .map_err(|_| anyhow!("ワーカースレッドが異常終了しました"))?;
        }
        Ok(())
    })
}
