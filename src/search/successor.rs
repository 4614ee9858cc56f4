// 後続局面の生成とメモ化

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::constants::{U64Map, NUM_COLORS};
use crate::domain::grid::{Cluster, Grid};

/// 1 手適用後の局面
#[derive(Clone, Debug)]
pub struct NextState {
    pub grid: Grid,
    pub clusters: Vec<Cluster>,
    pub score: i32,
}

/// 後続局面の並び順に使う評価値（小さいほど有望）。
///
/// 残り領域数に、領域数の少ない色ほど重く、多い色ほど軽くなる補正を加える
pub fn score_state(clusters: &[Cluster]) -> i32 {
    let mut per_color = [0i32; NUM_COLORS];
    for cluster in clusters {
        if let Some(i) = cluster.color.index() {
            per_color[i] += 1;
        }
    }
    per_color.sort_unstable();

    clusters.len() as i32 + per_color[0] * 2 + per_color[1] - per_color[2] - per_color[3] * 2
}

/// 各領域を 1 つずつ消した後続局面を、評価値の昇順（安定ソート）で返す。
/// 同じ盤面からは常に同じ並びになるので「k 番目の後続」が再現できる
pub fn expand(grid: &Grid, clusters: &[Cluster]) -> Vec<NextState> {
    let mut next: Vec<NextState> = clusters
        .iter()
        .map(|c| {
            let mut child = grid.clone();
            child.clear_region(c.x as isize, c.y as isize);
            let clusters = child.clusters();
            let score = score_state(&clusters);
            NextState {
                grid: child,
                clusters,
                score,
            }
        })
        .collect();
    next.sort_by_key(|n| n.score);
    next
}

/// 浅い局面（手数 < depth）の後続局面キャッシュ。キーは色配置の指紋。
///
/// 同じ配置に別の手順で到達した場合も最初に登録した後続局面を返すため、
/// その履歴は別経路のものになり得るが、いずれも開始盤面から実際に辿れる手順である
pub struct SuccessorCache {
    depth: AtomicUsize,
    map: Mutex<U64Map<Arc<[NextState]>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SuccessorCache {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: AtomicUsize::new(depth),
            map: Mutex::new(U64Map::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub fn set_depth(&self, depth: usize) {
        self.depth.store(depth, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, U64Map<Arc<[NextState]>>> {
        self.map.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 後続局面を返す。浅い局面はキャッシュを参照・登録する。
    /// 競合で二重に計算しても、登録は先着の 1 件だけ
    pub fn next_states(&self, grid: &Grid, clusters: &[Cluster]) -> Arc<[NextState]> {
        if grid.action_count() >= self.depth() {
            return Arc::from(expand(grid, clusters));
        }

        let key = grid.fingerprint();
        if let Some(hit) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let computed: Arc<[NextState]> = Arc::from(expand(grid, clusters));
        let mut map = self.lock();
        Arc::clone(map.entry(key).or_insert(computed))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
