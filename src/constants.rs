// 盤面定数とユーティリティ型定義

use nohash_hasher::BuildNoHashHasher;

/// ====== 盤面定数 ======
pub const W: usize = 7;
pub const H: usize = 9;

/// 塗り色の数（Empty を除く）
pub const NUM_COLORS: usize = 4;

/// ====== 探索既定値 ======
pub const DEFAULT_TRIALS: usize = 10_000;
pub const DEFAULT_CUTOFF: usize = 50;
pub const DEFAULT_CACHE_DEPTH: usize = 5;
pub const DEFAULT_BEAM_ITERATIONS: usize = 20;
pub const DEFAULT_BEAM_KEEP: usize = 10;
pub const DEFAULT_BEAM_DEPTH: usize = 3;

/// 総当たりタスクキューの容量
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// スループット報告の間隔（完了タスク数）
pub const THROUGHPUT_INTERVAL: u64 = 100_000;

// u64 キー専用のノーハッシュ（指紋はすでにハッシュ値）
pub type U64Map<V> = std::collections::HashMap<u64, V, BuildNoHashHasher<u64>>;
