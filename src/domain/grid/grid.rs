// Grid 型 - 7×9 の盤面と手順履歴

use anyhow::{anyhow, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color};
use super::hash::fingerprint_cells;
use crate::constants::{H, W};

/// 1 手（クリック座標と消した色）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

/// 連結領域（色と代表座標）。盤面からその都度導出する
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub color: Color,
    pub x: usize,
    pub y: usize,
}

const DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[inline]
pub fn in_range(x: isize, y: isize) -> bool {
    x >= 0 && (x as usize) < W && y >= 0 && (y as usize) < H
}

/// 盤面。y=0 が最下段、cells[y][x]
///
/// 変更は `clear_region` のみで行い、その後は常に各列が下詰めになっている。
/// 分岐させる場合は `clone()` してから変更する（セルも履歴も共有しない）。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; W]; H],
    actions: Vec<Action>,
}

impl Grid {
    /// 空の盤面
    pub fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; W]; H],
            actions: Vec::new(),
        }
    }

    /// 全マスを一様ランダムな塗り色で埋める
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::new();
        for row in grid.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Cell::new(Color::PAINTS[rng.gen_range(0..Color::PAINTS.len())]);
            }
        }
        grid
    }

    /// セルの色を取得（範囲外は None）
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= W || y >= H {
            return None;
        }
        Some(self.cells[y][x].color)
    }

    /// 盤面構築用の直接設定（重力は適用しない）
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> Result<()> {
        if x >= W || y >= H {
            return Err(anyhow!("座標が範囲外: ({}, {})", x, y));
        }
        self.cells[y][x] = Cell::new(color);
        Ok(())
    }

    /// 盤面全体への直接アクセス（読み取り専用）
    pub fn cells(&self) -> &[[Cell; W]; H] {
        &self.cells
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// (x, y) を含む同色連結領域を消去し、重力を適用して 1 手を記録する。
    /// 範囲外や空きマスは何もしない
    pub fn clear_region(&mut self, x: isize, y: isize) {
        if !in_range(x, y) {
            return;
        }
        let (xu, yu) = (x as usize, y as usize);
        let target = self.cells[yu][xu].color;
        if target.is_empty() {
            return;
        }

        for (cx, cy) in self.connected_cells(xu, yu) {
            self.cells[cy][cx] = Cell::EMPTY;
        }
        self.apply_gravity();
        self.actions.push(Action {
            x: xu,
            y: yu,
            color: target,
        });
    }

    /// 各列の空きでないセルを順序を保って下に詰める
    pub fn apply_gravity(&mut self) {
        for x in 0..W {
            let mut write = 0usize;
            for y in 0..H {
                let cell = self.cells[y][x];
                if !cell.is_empty() {
                    self.cells[write][x] = cell;
                    write += 1;
                }
            }
            for y in write..H {
                self.cells[y][x] = Cell::EMPTY;
            }
        }
    }

    /// (sx, sy) から 4 近傍・同色で到達できるセル（明示スタック）
    pub fn connected_cells(&self, sx: usize, sy: usize) -> Vec<(usize, usize)> {
        let base = match self.get(sx, sy) {
            Some(c) if !c.is_empty() => c,
            _ => return vec![],
        };
        let mut vis = [[false; W]; H];
        let mut stack = vec![(sx, sy)];
        let mut out = Vec::new();
        vis[sy][sx] = true;
        while let Some((x, y)) = stack.pop() {
            out.push((x, y));
            for (dx, dy) in DIRS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if !in_range(nx, ny) {
                    continue;
                }
                let (nxu, nyu) = (nx as usize, ny as usize);
                if vis[nyu][nxu] || self.cells[nyu][nxu].color != base {
                    continue;
                }
                vis[nyu][nxu] = true;
                stack.push((nxu, nyu));
            }
        }
        out
    }

    /// 行優先の走査で全連結領域を列挙する（各セルはちょうど 1 つの領域に属する）
    pub fn clusters(&self) -> Vec<Cluster> {
        let mut vis = [[false; W]; H];
        let mut found = Vec::new();
        let mut stack = Vec::with_capacity(W * H);
        for y in 0..H {
            for x in 0..W {
                let color = self.cells[y][x].color;
                if color.is_empty() || vis[y][x] {
                    continue;
                }
                found.push(Cluster { color, x, y });
                vis[y][x] = true;
                stack.push((x, y));
                while let Some((cx, cy)) = stack.pop() {
                    for (dx, dy) in DIRS {
                        let nx = cx as isize + dx;
                        let ny = cy as isize + dy;
                        if !in_range(nx, ny) {
                            continue;
                        }
                        let (nxu, nyu) = (nx as usize, ny as usize);
                        if !vis[nyu][nxu] && self.cells[nyu][nxu].color == color {
                            vis[nyu][nxu] = true;
                            stack.push((nxu, nyu));
                        }
                    }
                }
            }
        }
        found
    }

    /// 残り領域数。0 は全消し（唯一の終了条件）
    pub fn count_clusters(&self) -> usize {
        self.clusters().len()
    }

    /// 全マスが空か
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().flatten().all(|c| c.is_empty())
    }

    /// 色配置のみの指紋（メモ化キー）
    pub fn fingerprint(&self) -> u64 {
        fingerprint_cells(&self.cells)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// 領域列に含まれる色の種類数
pub fn distinct_colors(clusters: &[Cluster]) -> usize {
    let mut seen = [false; crate::constants::NUM_COLORS];
    for cluster in clusters {
        if let Some(i) = cluster.color.index() {
            seen[i] = true;
        }
    }
    seen.iter().filter(|&&s| s).count()
}
