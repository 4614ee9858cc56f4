// ソルバーからのイベント定義（表示層に依存しない）

use super::config::RunPlan;
use super::result::Solution;

#[derive(Clone, Debug)]
pub enum SolverEvent {
    /// ログメッセージ
    Log(String),
    /// 最良手数の更新（報告される手数は単調に減少する）
    NewBest(Solution),
    /// 試行の進捗（%）
    Progress { percent: usize },
    /// 完了タスク数と直近の処理速度（タスク/秒）
    Throughput { completed: u64, rate: f64 },
    /// 総当たりの段階開始
    RunPlan(RunPlan),
    /// ビーム 1 ラウンドの評価値の要約
    BeamRound {
        round: usize,
        candidates: usize,
        best_kept: f64,
        worst_kept: f64,
        worst: f64,
    },
}
