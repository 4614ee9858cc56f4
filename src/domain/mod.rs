// ドメイン層 - 盤面と探索設定

pub mod grid;
pub mod search;
