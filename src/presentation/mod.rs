// プレゼンテーション層 - 端末向けの描画

pub mod render;

pub use render::{render_board, steps, Step};
