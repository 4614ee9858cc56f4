// 盤面の指紋（FNV-1a 64bit）

use super::cell::Cell;
use crate::constants::{H, W};

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// 色配置のみから計算する正準ハッシュ（手順履歴は含めない）
#[inline(always)]
pub fn fingerprint_cells(cells: &[[Cell; W]; H]) -> u64 {
    let mut h = FNV_OFFSET;
    for row in cells.iter() {
        for cell in row.iter() {
            // Empty も 1 つの記号として混ぜる
            let code = match cell.color.index() {
                Some(i) => i as u64 + 1,
                None => 0,
            };
            h ^= code;
            h = h.wrapping_mul(FNV_PRIME);
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Color;

    #[test]
    fn empty_and_filled_differ() {
        let empty = [[Cell::EMPTY; W]; H];
        let mut one = empty;
        one[0][0] = Cell::new(Color::Orange);
        assert_ne!(fingerprint_cells(&empty), fingerprint_cells(&one));
    }

    #[test]
    fn position_matters() {
        let mut a = [[Cell::EMPTY; W]; H];
        let mut b = a;
        a[0][0] = Cell::new(Color::Blue);
        b[0][1] = Cell::new(Color::Blue);
        assert_ne!(fingerprint_cells(&a), fingerprint_cells(&b));
    }
}
