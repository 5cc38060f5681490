//! Square numbering and diagonal geometry.
//!
//! Only the playable (dark) squares are numbered: row-major, starting at 1.
//! Rows alternate their offset, so on even rows the playable squares sit on
//! the odd files of the full board and on odd rows on the even files. Diagonal
//! stepping works in those full-board coordinates.

use crate::types::Square;

/// The four diagonal directions as `(row delta, file delta)`.
pub const DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionLayout {
    width: u8,
    height: u8,
    rows: Vec<Vec<Square>>,
}

impl PositionLayout {
    pub fn new(width: u8, height: u8) -> Self {
        let rows = (0..height as usize)
            .map(|row| {
                (0..width as usize)
                    .map(|column| (row * width as usize + column + 1) as Square)
                    .collect()
            })
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }
    pub fn height(&self) -> u8 {
        self.height
    }
    pub fn position_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, sq: Square) -> bool {
        sq >= 1 && (sq as usize) <= self.position_count()
    }

    /// Square at `(row, column)`, both 0-based.
    pub fn square(&self, row: i16, column: i16) -> Option<Square> {
        if row < 0 || column < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(column as usize))
            .copied()
    }

    pub fn row_of(&self, sq: Square) -> i16 {
        (sq as i16 - 1) / self.width as i16
    }
    pub fn column_of(&self, sq: Square) -> i16 {
        (sq as i16 - 1) % self.width as i16
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// The square one diagonal step away from `sq`, if it is on the board.
    pub fn step(&self, sq: Square, (dr, df): (i8, i8)) -> Option<Square> {
        let row = self.row_of(sq);
        let file = file_of(row, self.column_of(sq));
        let (to_row, to_file) = (row + dr as i16, file + df as i16);
        if to_file < 0 || to_file >= 2 * self.width as i16 {
            return None;
        }
        // Playable squares keep `row + file` odd, so a diagonal step always
        // lands on one; only the column conversion is left.
        self.square(to_row, to_file / 2)
    }

    /// Squares along a diagonal from `sq` (exclusive) to the board edge.
    pub fn ray(&self, sq: Square, dir: (i8, i8)) -> Ray<'_> {
        Ray {
            layout: self,
            current: sq,
            dir,
        }
    }
}

/// File on the full board of the playable square at `(row, column)`.
fn file_of(row: i16, column: i16) -> i16 {
    2 * column + if row % 2 == 0 { 1 } else { 0 }
}

pub struct Ray<'a> {
    layout: &'a PositionLayout,
    current: Square,
    dir: (i8, i8),
}

impl Iterator for Ray<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.layout.step(self.current, self.dir)?;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_is_row_major_from_one() {
        let layout = PositionLayout::new(5, 10);
        assert_eq!(layout.square(0, 0), Some(1));
        assert_eq!(layout.square(1, 0), Some(6));
        assert_eq!(layout.square(9, 4), Some(50));
        assert_eq!(layout.square(10, 0), None);
        assert_eq!(layout.row_of(50), 9);
        assert_eq!(layout.column_of(7), 1);
    }

    #[test]
    fn test_diagonal_steps_follow_row_offsets() {
        let layout = PositionLayout::new(5, 10);
        // Even row: neighbours below are the same column and the next one.
        assert_eq!(layout.step(1, (1, -1)), Some(6));
        assert_eq!(layout.step(1, (1, 1)), Some(7));
        // Odd row: neighbours below are the previous column and the same one.
        assert_eq!(layout.step(7, (1, -1)), Some(11));
        assert_eq!(layout.step(7, (1, 1)), Some(12));
        // Edges.
        assert_eq!(layout.step(5, (1, 1)), None);
        assert_eq!(layout.step(6, (1, -1)), None);
        assert_eq!(layout.step(3, (-1, 1)), None);
    }

    #[test]
    fn test_ray_runs_to_the_edge() {
        let layout = PositionLayout::new(5, 10);
        let squares: Vec<Square> = layout.ray(1, (1, 1)).collect();
        assert_eq!(squares, vec![7, 12, 18, 23, 29, 34, 40, 45]);
    }

    #[test]
    fn test_largest_layouts_number_every_square() {
        let layout = PositionLayout::new(15, 17);
        assert_eq!(layout.square(16, 14), Some(255));
        assert_eq!(layout.row_of(255), 16);
        assert_eq!(layout.step(255, (-1, -1)), Some(240));

        let wide = PositionLayout::new(127, 2);
        assert_eq!(wide.step(1, (1, 1)), Some(129));
        assert_eq!(wide.step(254, (-1, 1)), Some(127));
        assert_eq!(wide.step(254, (-1, -1)), Some(126));
        assert_eq!(wide.step(127, (1, 1)), None);

        let tall = PositionLayout::new(1, 255);
        assert_eq!(tall.row_of(255), 254);
        assert_eq!(tall.step(255, (-1, -1)), Some(254));
        assert_eq!(tall.step(255, (-1, 1)), None);
    }
}
