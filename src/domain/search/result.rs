// 探索結果の定義

use serde::{Deserialize, Serialize};

use crate::domain::grid::{Action, Grid};

/// 全消し手順
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: usize,
    pub actions: Vec<Action>,
}

impl Solution {
    /// 全消し済みの盤面から作成
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            moves: grid.action_count(),
            actions: grid.actions().to_vec(),
        }
    }

    /// 開始盤面に手順を再生する
    pub fn replay(&self, start: &Grid) -> Grid {
        let mut grid = start.clone();
        for a in &self.actions {
            grid.clear_region(a.x as isize, a.y as isize);
        }
        grid
    }

    /// 再生すると全消しになり、各手が記録どおりの色を消すか
    pub fn verify(&self, start: &Grid) -> bool {
        let replayed = self.replay(start);
        replayed.is_cleared()
            && replayed.actions().len() == start.action_count() + self.actions.len()
            && replayed.actions()[start.action_count()..] == self.actions[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Color;

    #[test]
    fn verify_accepts_clearing_sequence() {
        let mut start = Grid::new();
        start.set(0, 0, Color::Green).unwrap();
        start.set(1, 0, Color::Pink).unwrap();

        let mut played = start.clone();
        played.clear_region(0, 0);
        played.clear_region(1, 0);
        let sol = Solution::from_grid(&played);
        assert_eq!(sol.moves, 2);
        assert!(sol.verify(&start));
    }

    #[test]
    fn verify_rejects_incomplete_sequence() {
        let mut start = Grid::new();
        start.set(0, 0, Color::Green).unwrap();
        start.set(1, 0, Color::Pink).unwrap();

        let mut played = start.clone();
        played.clear_region(0, 0);
        let sol = Solution::from_grid(&played);
        assert!(!sol.verify(&start));
    }
}
