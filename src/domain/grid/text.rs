// 盤面テキストの解釈

use super::cell::Color;
use super::grid::Grid;
use crate::constants::{H, W};

impl Grid {
    /// 盤面テキストから構築する。
    ///
    /// 1 行目が最上段。O/B/G/P 以外の文字や足りない行・列は Empty、
    /// H 行を超える行は無視する。重力は適用しない（書かれたまま配置する）
    pub fn from_text(text: &str) -> Self {
        let mut grid = Grid::new();
        for (i, line) in text.lines().take(H).enumerate() {
            let y = H - 1 - i;
            for (x, ch) in line.chars().take(W).enumerate() {
                // 範囲内なので失敗しない
                let _ = grid.set(x, y, Color::from_char(ch));
            }
        }
        grid
    }

    /// 盤面テキストへ変換（最上段から）
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity((W + 1) * H);
        for y in (0..H).rev() {
            for x in 0..W {
                s.push(self.cells()[y][x].color.to_char());
            }
            s.push('\n');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_is_top_row() {
        let g = Grid::from_text("OBGP\n");
        assert_eq!(g.get(0, H - 1), Some(Color::Orange));
        assert_eq!(g.get(1, H - 1), Some(Color::Blue));
        assert_eq!(g.get(2, H - 1), Some(Color::Green));
        assert_eq!(g.get(3, H - 1), Some(Color::Pink));
        assert_eq!(g.get(4, H - 1), Some(Color::Empty));
    }

    #[test]
    fn short_file_leaves_remaining_rows_empty() {
        let g = Grid::from_text("OO\nOO\n");
        for y in 0..H - 2 {
            for x in 0..W {
                assert_eq!(g.get(x, y), Some(Color::Empty));
            }
        }
        // 埋まった 2 行だけで 1 領域
        assert_eq!(g.count_clusters(), 1);
    }

    #[test]
    fn extra_lines_and_columns_are_ignored() {
        let mut text = String::new();
        for _ in 0..H + 3 {
            text.push_str("GGGGGGGGGG\n");
        }
        let g = Grid::from_text(&text);
        assert_eq!(g.count_clusters(), 1);
        assert_eq!(g.cells().iter().flatten().filter(|c| !c.is_empty()).count(), W * H);
    }

    #[test]
    fn to_text_matches_from_text() {
        let text = "OBGP...\n".repeat(H);
        let g = Grid::from_text(&text);
        assert_eq!(g.to_text(), text);
    }
}
