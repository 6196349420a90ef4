use crate::cell::Coord;

/// Screen placement of a square board inside a window.
///
/// Cells are square with side `min(width, height) / size`; the board is
/// centred and the leftover space on the longer axis becomes a margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub size: i32,
    pub cell_size: f32,
    pub margin_x: f32,
    pub margin_y: f32,
}

/// Pixel rectangle of one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoardLayout {
    pub fn fit(screen_width: f32, screen_height: f32, size: i32) -> Self {
        let size = size.max(1);
        let side = screen_width.min(screen_height).max(0.0);
        let cell_size = side / size as f32;
        BoardLayout {
            size,
            cell_size,
            margin_x: (screen_width - side) / 2.0,
            margin_y: (screen_height - side) / 2.0,
        }
    }

    pub fn board_side(&self) -> f32 {
        self.cell_size * self.size as f32
    }

    /// Cell under a pixel position, `None` inside the margins
    pub fn cell_at(&self, px: f32, py: f32) -> Option<Coord> {
        if self.cell_size <= 0.0 {
            return None;
        }
        let bx = px - self.margin_x;
        let by = py - self.margin_y;
        let side = self.board_side();
        if bx < 0.0 || by < 0.0 || bx >= side || by >= side {
            return None;
        }

        let x = ((bx / self.cell_size) as i32).min(self.size - 1);
        let y = ((by / self.cell_size) as i32).min(self.size - 1);
        Some(Coord::new(x, y))
    }

    /// Same as [`BoardLayout::cell_at`] for a pointer given as a fraction of
    /// the window (0..1 on each axis)
    pub fn cell_at_normalized(&self, nx: f32, ny: f32) -> Option<Coord> {
        let width = self.board_side() + 2.0 * self.margin_x;
        let height = self.board_side() + 2.0 * self.margin_y;
        self.cell_at(nx * width, ny * height)
    }

    /// Cell a click may edit: on the board and not one of the checkpoints
    pub fn editable_cell_at(&self, px: f32, py: f32) -> Option<Coord> {
        let coord = self.cell_at(px, py)?;
        let last = self.size - 1;
        if (coord.x == 0 && coord.y == 0) || (coord.x == last && coord.y == last) {
            return None;
        }
        Some(coord)
    }

    pub fn cell_rect(&self, coord: Coord) -> CellRect {
        CellRect {
            x: self.margin_x + coord.x as f32 * self.cell_size,
            y: self.margin_y + coord.y as f32 * self.cell_size,
            w: self.cell_size,
            h: self.cell_size,
        }
    }
}
