// 盤面と手順のテキスト描画

use std::fmt;

use crate::constants::{H, W};
use crate::domain::grid::{Action, Color, Grid};

/// 手順リストの1行
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {:2} x: {}, y: {} {}",
            self.index,
            self.x,
            self.y,
            self.color.icon()
        )
    }
}

/// 記録された手を 1 始まりの手順に変換
pub fn steps(actions: &[Action]) -> Vec<Step> {
    actions
        .iter()
        .enumerate()
        .map(|(i, a)| Step {
            index: i + 1,
            x: a.x,
            y: a.y,
            color: a.color,
        })
        .collect()
}

/// 盤面を上の行から描画する。左に行番号、下に列番号
pub fn render_board(grid: &Grid) -> String {
    let mut out = String::new();
    for y in (0..H).rev() {
        out.push_str(&format!("{} ", y));
        for x in 0..W {
            let color = grid.get(x, y).unwrap_or(Color::Empty);
            out.push_str(color.icon());
        }
        out.push('\n');
    }
    out.push_str("  ");
    for x in 0..W {
        out.push_str(&format!("{} ", x));
    }
    out.push('\n');
    out
}
