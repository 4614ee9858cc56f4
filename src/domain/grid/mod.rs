// 盤面関連のドメイン層

pub mod cell;
pub mod grid;
pub mod hash;
pub mod text;

pub use cell::{Cell, Color};
pub use grid::{distinct_colors, in_range, Action, Cluster, Grid};
