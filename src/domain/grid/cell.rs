// セル型定義（ドメイン層）

use serde::{Deserialize, Serialize};

use crate::constants::NUM_COLORS;

/// 塗り色。`Empty` は消去済み（空き）を表す番兵
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    Orange,
    Blue,
    Green,
    Pink,
    #[default]
    Empty,
}

impl Color {
    /// 塗り色（Empty を除く）
    pub const PAINTS: [Color; NUM_COLORS] = [Color::Orange, Color::Blue, Color::Green, Color::Pink];

    /// 塗り色のインデックス（Empty は None）
    pub fn index(self) -> Option<usize> {
        match self {
            Color::Orange => Some(0),
            Color::Blue => Some(1),
            Color::Green => Some(2),
            Color::Pink => Some(3),
            Color::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    /// 盤面ファイルの文字から変換（O/B/G/P 以外は Empty）
    pub fn from_char(ch: char) -> Self {
        match ch {
            'O' => Color::Orange,
            'B' => Color::Blue,
            'G' => Color::Green,
            'P' => Color::Pink,
            _ => Color::Empty,
        }
    }

    /// 盤面ファイル用の文字に変換
    pub fn to_char(self) -> char {
        match self {
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Pink => 'P',
            Color::Empty => '.',
        }
    }

    /// 表示用アイコン
    pub fn icon(self) -> &'static str {
        match self {
            Color::Orange => "🟧",
            Color::Blue => "🟦",
            Color::Green => "🟩",
            Color::Pink => "🟪",
            Color::Empty => "⬜",
        }
    }
}

/// 盤面の1マス
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub color: Color,
}

impl Cell {
    pub const EMPTY: Cell = Cell { color: Color::Empty };

    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn is_empty(self) -> bool {
        self.color.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_char_maps_paint_letters() {
        assert_eq!(Color::from_char('O'), Color::Orange);
        assert_eq!(Color::from_char('B'), Color::Blue);
        assert_eq!(Color::from_char('G'), Color::Green);
        assert_eq!(Color::from_char('P'), Color::Pink);
    }

    #[test]
    fn from_char_maps_unknown_to_empty() {
        assert_eq!(Color::from_char('.'), Color::Empty);
        assert_eq!(Color::from_char('o'), Color::Empty);
        assert_eq!(Color::from_char(' '), Color::Empty);
    }

    #[test]
    fn paint_indices_are_dense() {
        for (i, c) in Color::PAINTS.iter().enumerate() {
            assert_eq!(c.index(), Some(i));
            assert_eq!(Color::from_char(c.to_char()), *c);
        }
        assert_eq!(Color::Empty.index(), None);
    }

    #[test]
    fn default_cell_is_empty() {
        assert!(Cell::default().is_empty());
        assert_eq!(Cell::EMPTY, Cell::default());
    }
}
