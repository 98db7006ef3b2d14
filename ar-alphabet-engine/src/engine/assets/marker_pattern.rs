use super::Letter;

pub const GRID_SIZE: usize = 16;
pub const BORDER_CELLS: usize = 2;

pub type PatternGrid = [[u8; GRID_SIZE]; GRID_SIZE];

/// Builds a printable placeholder pattern for `letter`.
///
/// Real `.patt` files come from the AR.js marker trainer; this grid only
/// gives each letter a distinct card to print while those are missing.
pub fn preview_grid(letter: Letter) -> PatternGrid {
    let code = letter.as_char() as usize;
    let mut grid = [[0u8; GRID_SIZE]; GRID_SIZE];

    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = if is_border(row) || is_border(col) {
                1
            } else {
                ((code + row + col) % 2) as u8
            };
        }
    }

    grid
}

fn is_border(index: usize) -> bool {
    index < BORDER_CELLS || index >= GRID_SIZE - BORDER_CELLS
}

/// Renders a grid with `#` for set cells, one line per row.
pub fn render_ascii(grid: &PatternGrid) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|&cell| if cell == 1 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_solid() {
        let grid = preview_grid(Letter::from_char('A').expect("letter"));
        for i in 0..GRID_SIZE {
            assert_eq!(grid[0][i], 1);
            assert_eq!(grid[1][i], 1);
            assert_eq!(grid[GRID_SIZE - 1][i], 1);
            assert_eq!(grid[i][GRID_SIZE - 2], 1);
        }
    }

    #[test]
    fn interior_alternates_with_letter_parity() {
        // 'A' is 65 (odd), 'B' is 66 (even).
        let a = preview_grid(Letter::from_char('A').expect("letter"));
        let b = preview_grid(Letter::from_char('B').expect("letter"));
        assert_eq!(a[2][2], 1);
        assert_eq!(b[2][2], 0);
        assert_eq!(a[2][3], 0);
    }

    #[test]
    fn ascii_rendering_has_one_line_per_row() {
        let text = render_ascii(&preview_grid(Letter::from_char('C').expect("letter")));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GRID_SIZE);
        assert!(lines.iter().all(|l| l.chars().count() == GRID_SIZE));
        assert_eq!(lines[0], "################");
    }
}
