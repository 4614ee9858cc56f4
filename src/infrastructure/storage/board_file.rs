// 盤面ファイルの読み込み

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::domain::grid::Grid;

/// 盤面ファイルを読み込む（I/O 失敗はそのまま呼び出し側へ）
pub fn load_board(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("盤面ファイルを読み込めません: {}", path.display()))?;
    Ok(Grid::from_text(&text))
}
