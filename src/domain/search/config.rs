// ソルバー設定の Value Objects

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BEAM_DEPTH, DEFAULT_BEAM_ITERATIONS, DEFAULT_BEAM_KEEP, DEFAULT_CACHE_DEPTH,
    DEFAULT_CUTOFF, DEFAULT_TRIALS,
};

/// 位置引数を解釈する。欠落・解釈失敗は既定値
fn arg_or<T: FromStr>(args: &[String], i: usize, default: T) -> T {
    args.get(i)
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// 0 を許さない位置引数
fn positive_arg(args: &[String], i: usize, default: usize) -> usize {
    match arg_or(args, i, default) {
        0 => default,
        v => v,
    }
}

/// ビーム候補の評価関数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFunction {
    /// ロールアウト手数の平均
    #[default]
    Average,
    /// ロールアウト手数の最小
    Best,
    /// 残り領域数（ロールアウトなし）
    Clusters,
}

impl FromStr for ScoreFunction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "average" => Ok(ScoreFunction::Average),
            "best" => Ok(ScoreFunction::Best),
            "clusters" => Ok(ScoreFunction::Clusters),
            other => Err(anyhow!("不明な評価関数: {}", other)),
        }
    }
}

impl fmt::Display for ScoreFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoreFunction::Average => "average",
            ScoreFunction::Best => "best",
            ScoreFunction::Clusters => "clusters",
        };
        f.write_str(name)
    }
}

/// ランダム探索の設定
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomParams {
    pub trials: usize,
}

impl RandomParams {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            trials: positive_arg(args, 0, DEFAULT_TRIALS),
        }
    }
}

impl Default for RandomParams {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
        }
    }
}

/// ビーム探索の設定
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamParams {
    /// 候補ごとのロールアウト回数
    pub iterations: usize,
    /// 1 ラウンドあたりの保持数（ラウンド番号倍に広がる）
    pub keep_size: usize,
    /// 1 ラウンドで全展開する手数
    pub depth: usize,
    /// 手数の上限
    pub cutoff: usize,
    pub score_function: ScoreFunction,
}

impl BeamParams {
    pub fn from_args(args: &[String]) -> Self {
        let d = Self::default();
        Self {
            iterations: positive_arg(args, 0, d.iterations),
            keep_size: positive_arg(args, 1, d.keep_size),
            depth: positive_arg(args, 2, d.depth),
            cutoff: positive_arg(args, 3, d.cutoff),
            score_function: arg_or(args, 4, d.score_function),
        }
    }
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_BEAM_ITERATIONS,
            keep_size: DEFAULT_BEAM_KEEP,
            depth: DEFAULT_BEAM_DEPTH,
            cutoff: DEFAULT_CUTOFF,
            score_function: ScoreFunction::Average,
        }
    }
}

/// 総当たり探索の 1 段階（末尾 full_levels 手は全幅、それ以外は上位 search_width 手）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPlan {
    pub full_levels: usize,
    pub search_width: usize,
}

impl RunPlan {
    pub const fn new(full_levels: usize, search_width: usize) -> Self {
        Self {
            full_levels,
            search_width,
        }
    }

    /// 既定の段階スケジュール
    pub fn default_schedule() -> Vec<RunPlan> {
        vec![
            RunPlan::new(1, 1),
            RunPlan::new(2, 1),
            RunPlan::new(3, 1),
            RunPlan::new(3, 3),
            RunPlan::new(4, 1),
            RunPlan::new(4, 3),
            RunPlan::new(5, 1),
            RunPlan::new(4, 3),
        ]
    }
}

impl fmt::Display for RunPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "full_levels={} search_width={}",
            self.full_levels, self.search_width
        )
    }
}

/// 総当たり（分枝限定）探索の設定
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfiniteParams {
    pub cutoff: usize,
    /// この手数未満の局面だけ後続局面をメモ化する
    pub cache_depth: usize,
    pub run_plan: Vec<RunPlan>,
}

impl InfiniteParams {
    pub fn from_args(args: &[String]) -> Self {
        let d = Self::default();
        Self {
            cutoff: positive_arg(args, 0, d.cutoff),
            cache_depth: arg_or(args, 1, d.cache_depth),
            run_plan: d.run_plan,
        }
    }
}

impl Default for InfiniteParams {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            cache_depth: DEFAULT_CACHE_DEPTH,
            run_plan: RunPlan::default_schedule(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn random_params_default_on_missing() {
        assert_eq!(RandomParams::from_args(&[]).trials, 10_000);
        assert_eq!(RandomParams::from_args(&args(&["250"])).trials, 250);
    }

    #[test]
    fn random_params_default_on_garbage() {
        assert_eq!(RandomParams::from_args(&args(&["abc"])).trials, 10_000);
        assert_eq!(RandomParams::from_args(&args(&["0"])).trials, 10_000);
    }

    #[test]
    fn beam_params_defaults() {
        let p = BeamParams::from_args(&[]);
        assert_eq!(p, BeamParams::default());
        assert_eq!(p.iterations, 20);
        assert_eq!(p.keep_size, 10);
        assert_eq!(p.depth, 3);
        assert_eq!(p.cutoff, 50);
        assert_eq!(p.score_function, ScoreFunction::Average);
    }

    #[test]
    fn beam_params_partial_and_invalid() {
        let p = BeamParams::from_args(&args(&["5", "x", "2", "30", "clusters"]));
        assert_eq!(p.iterations, 5);
        assert_eq!(p.keep_size, 10);
        assert_eq!(p.depth, 2);
        assert_eq!(p.cutoff, 30);
        assert_eq!(p.score_function, ScoreFunction::Clusters);

        let p = BeamParams::from_args(&args(&["5", "4", "2", "30", "median"]));
        assert_eq!(p.score_function, ScoreFunction::Average);
    }

    #[test]
    fn infinite_params_parse() {
        let p = InfiniteParams::from_args(&args(&["30", "0"]));
        assert_eq!(p.cutoff, 30);
        assert_eq!(p.cache_depth, 0);
        assert_eq!(p.run_plan.len(), 8);

        let p = InfiniteParams::from_args(&args(&["nope"]));
        assert_eq!(p.cutoff, 50);
        assert_eq!(p.cache_depth, 5);
    }

    #[test]
    fn score_function_roundtrip() {
        for f in [ScoreFunction::Average, ScoreFunction::Best, ScoreFunction::Clusters] {
            assert_eq!(f.to_string().parse::<ScoreFunction>().unwrap(), f);
        }
        assert!("worst".parse::<ScoreFunction>().is_err());
    }
}
