use crate::log;

use super::session_rng::SessionRng;
use super::types::{BoardSizing, Point};

/// Cell intensities mirror the five contribution-graph shades.
pub const MAX_INTENSITY: u8 = 4;
/// Cells at or above this intensity are walls when walls are enabled.
pub const WALL_MIN_INTENSITY: u8 = 3;
/// Decorative noise never reaches wall intensity on wall-enabled boards.
const DECORATIVE_MAX_INTENSITY: u8 = 2;

/// Space between cells, in pixels.
pub const CELL_PADDING: u32 = 1;

const MIN_GRID_DIM: usize = 10;

const MIN_WALL_RUNS: usize = 2;
const MAX_WALL_RUNS: usize = 6;
const MIN_WALL_RUN_LENGTH: usize = 3;
const MAX_WALL_RUN_LENGTH: usize = 5;
const WALL_PLACEMENT_ATTEMPTS: usize = 10;

/// The contribution grid. Cells are stored row-major: `cells[y * cols + x]`.
#[derive(Clone, Debug)]
pub struct Board {
    cols: usize,
    rows: usize,
    cell_size: u32,
    walls_enabled: bool,
    cells: Vec<u8>,
}

impl Board {
    /// Derives the grid from a pixel budget. Both dimensions come out even:
    /// `Fit` rounds the division down, `Fill` rounds it up.
    pub fn from_pixels(
        pixel_width: u32,
        pixel_height: u32,
        cell_size: u32,
        sizing: BoardSizing,
        walls_enabled: bool,
    ) -> Result<Self, String> {
        let stride = cell_size + CELL_PADDING;
        let (cols, rows) = match sizing {
            BoardSizing::Fit => {
                let cols = (pixel_width / stride) as usize;
                let rows = (pixel_height / stride) as usize;
                (cols - cols % 2, rows - rows % 2)
            }
            BoardSizing::Fill => {
                let cols = pixel_width.div_ceil(stride) as usize;
                let rows = pixel_height.div_ceil(stride) as usize;
                (cols + cols % 2, rows + rows % 2)
            }
        };

        if cols < MIN_GRID_DIM || rows < MIN_GRID_DIM {
            return Err(format!(
                "Board of {}x{} cells is below the {}x{} minimum; enlarge the canvas or shrink the cell size",
                cols, rows, MIN_GRID_DIM, MIN_GRID_DIM
            ));
        }

        Ok(Self {
            cols,
            rows,
            cell_size,
            walls_enabled,
            cells: vec![0; cols * rows],
        })
    }

    #[cfg(test)]
    pub fn with_dimensions(cols: usize, rows: usize, walls_enabled: bool) -> Self {
        Self {
            cols,
            rows,
            cell_size: 15,
            walls_enabled,
            cells: vec![0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn walls_enabled(&self) -> bool {
        self.walls_enabled
    }

    /// Zeroes the grid. With `decorative_noise` a sparse background pattern
    /// is sprinkled in, capped below wall intensity on wall-enabled boards.
    pub fn reset(&mut self, rng: &mut SessionRng, decorative_noise: bool) {
        self.cells.fill(0);

        if !decorative_noise {
            return;
        }

        for cell in &mut self.cells {
            let sample: f64 = rng.random();
            let mut intensity = 0;
            if sample > 0.8 {
                intensity = 1;
            }
            if sample > 0.9 {
                intensity = 2;
            }
            if sample > 0.95 {
                intensity = 3;
            }
            if sample > 0.98 {
                intensity = 4;
            }
            if self.walls_enabled {
                intensity = intensity.min(DECORATIVE_MAX_INTENSITY);
            }
            *cell = intensity;
        }
    }

    /// Best-effort placement of 2-6 straight wall runs of 3-5 cells each.
    /// Runs inside the safe zone around `start` or overlapping an existing
    /// wall are retried up to 10 times, then skipped. Returns the number of
    /// runs actually placed.
    pub fn generate_walls(
        &mut self,
        rng: &mut SessionRng,
        start: Point,
        safe_distance: usize,
    ) -> usize {
        let requested = rng.random_range(MIN_WALL_RUNS..=MAX_WALL_RUNS);
        let mut placed = 0;

        for _ in 0..requested {
            for _ in 0..WALL_PLACEMENT_ATTEMPTS {
                let length = rng.random_range(MIN_WALL_RUN_LENGTH..=MAX_WALL_RUN_LENGTH);
                let horizontal = rng.random_bool();

                let (span, lanes) = if horizontal {
                    (self.cols, self.rows)
                } else {
                    (self.rows, self.cols)
                };
                if span < length {
                    continue;
                }

                let offset = rng.random_range(0..=span - length);
                let lane = rng.random_range(0..lanes);
                let run: Vec<Point> = (offset..offset + length)
                    .map(|i| {
                        if horizontal {
                            Point::new(i, lane)
                        } else {
                            Point::new(lane, i)
                        }
                    })
                    .collect();

                let blocked = run.iter().any(|cell| {
                    cell.chebyshev_distance(&start) < safe_distance || self.is_wall(cell.x, cell.y)
                });
                if blocked {
                    continue;
                }

                for cell in &run {
                    self.cells[cell.y * self.cols + cell.x] =
                        rng.random_range(WALL_MIN_INTENSITY..=MAX_INTENSITY);
                }
                placed += 1;
                break;
            }
        }

        log!("Placed {} of {} wall runs", placed, requested);
        placed
    }

    pub fn is_valid_position(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        if !self.walls_enabled || !self.is_valid_position(x, y) {
            return false;
        }
        self.cells[y * self.cols + x] >= WALL_MIN_INTENSITY
    }

    pub fn intensity(&self, x: usize, y: usize) -> u8 {
        if !self.is_valid_position(x, y) {
            return 0;
        }
        self.cells[y * self.cols + x]
    }

    pub fn increase_intensity(&mut self, x: usize, y: usize) {
        if self.is_valid_position(x, y) {
            let index = y * self.cols + x;
            self.cells[index] = (self.cells[index] + 1).min(MAX_INTENSITY);
        }
    }

    /// Trail decay: the vacated cell snaps back to empty. Walls are immune.
    pub fn decrease_intensity(&mut self, x: usize, y: usize) {
        if self.is_valid_position(x, y) && !self.is_wall(x, y) {
            self.cells[y * self.cols + x] = 0;
        }
    }

    /// Grid to pixel transform, including the inter-cell padding.
    pub fn pixel_position(&self, x: usize, y: usize) -> (u32, u32) {
        let stride = self.cell_size + CELL_PADDING;
        (x as u32 * stride, y as u32 * stride)
    }

    /// Palette level per cell, row-major. Levels map straight onto the
    /// renderer's five-shade palette.
    pub fn levels(&self) -> &[u8] {
        &self.cells
    }

    #[cfg(test)]
    pub fn set_intensity(&mut self, x: usize, y: usize, intensity: u8) {
        self.cells[y * self.cols + x] = intensity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sizing_rounds_down_to_even() {
        // 500 / 16 = 31 -> 30; 350 / 16 = 21 -> 20.
        let board = Board::from_pixels(500, 350, 15, BoardSizing::Fit, false).unwrap();
        assert_eq!(board.cols(), 30);
        assert_eq!(board.rows(), 20);
    }

    #[test]
    fn test_fill_sizing_rounds_up_to_even() {
        // ceil(500 / 16) = 32; ceil(350 / 16) = 22.
        let board = Board::from_pixels(500, 350, 15, BoardSizing::Fill, false).unwrap();
        assert_eq!(board.cols(), 32);
        assert_eq!(board.rows(), 22);
    }

    #[test]
    fn test_fit_never_exceeds_pixel_budget() {
        let board = Board::from_pixels(500, 350, 15, BoardSizing::Fit, false).unwrap();
        let stride = (15 + CELL_PADDING) as usize;
        assert!(board.cols() * stride <= 500);
        assert!(board.rows() * stride <= 350);
    }

    #[test]
    fn test_fill_always_covers_pixel_budget() {
        let board = Board::from_pixels(500, 350, 15, BoardSizing::Fill, false).unwrap();
        let stride = (15 + CELL_PADDING) as usize;
        assert!(board.cols() * stride >= 500);
        assert!(board.rows() * stride >= 350);
    }

    #[test]
    fn test_too_small_canvas_is_rejected() {
        assert!(Board::from_pixels(100, 100, 15, BoardSizing::Fit, false).is_err());
    }

    #[test]
    fn test_increase_intensity_clamps_at_max() {
        let mut board = Board::with_dimensions(10, 10, false);
        for _ in 0..10 {
            board.increase_intensity(3, 3);
        }
        assert_eq!(board.intensity(3, 3), MAX_INTENSITY);
    }

    #[test]
    fn test_decrease_resets_non_wall_cell() {
        let mut board = Board::with_dimensions(10, 10, false);
        board.increase_intensity(2, 2);
        board.increase_intensity(2, 2);

        board.decrease_intensity(2, 2);

        assert_eq!(board.intensity(2, 2), 0);
    }

    #[test]
    fn test_decrease_leaves_wall_untouched() {
        let mut board = Board::with_dimensions(10, 10, true);
        board.set_intensity(4, 4, WALL_MIN_INTENSITY);

        board.decrease_intensity(4, 4);

        assert_eq!(board.intensity(4, 4), WALL_MIN_INTENSITY);
        assert!(board.is_wall(4, 4));
    }

    #[test]
    fn test_out_of_bounds_queries_are_total() {
        let board = Board::with_dimensions(10, 10, true);
        assert!(!board.is_valid_position(10, 0));
        assert!(!board.is_wall(10, 0));
        assert!(!board.is_wall(0, 10));
        assert_eq!(board.intensity(99, 99), 0);
    }

    #[test]
    fn test_wall_flag_requires_walls_enabled() {
        let mut board = Board::with_dimensions(10, 10, false);
        board.set_intensity(1, 1, MAX_INTENSITY);
        assert!(!board.walls_enabled());
        assert!(!board.is_wall(1, 1));
    }

    #[test]
    fn test_pixel_position_uses_padding() {
        let board = Board::with_dimensions(10, 10, false);
        assert_eq!(board.pixel_position(0, 0), (0, 0));
        assert_eq!(board.pixel_position(3, 2), (48, 32));
    }

    #[test]
    fn test_fuzz_reset_noise_stays_in_range() {
        for seed in 0..100u64 {
            let mut rng = SessionRng::new(seed);
            let mut board = Board::with_dimensions(20, 20, false);
            board.reset(&mut rng, true);

            assert!(board.levels().iter().all(|&v| v <= MAX_INTENSITY));
        }
    }

    #[test]
    fn test_fuzz_reset_noise_never_creates_walls() {
        for seed in 0..100u64 {
            let mut rng = SessionRng::new(seed);
            let mut board = Board::with_dimensions(20, 20, true);
            board.reset(&mut rng, true);

            for y in 0..20 {
                for x in 0..20 {
                    assert!(
                        !board.is_wall(x, y),
                        "Seed {}: decorative noise produced a wall at ({}, {})",
                        seed,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn test_reset_without_noise_zeroes_everything() {
        let mut rng = SessionRng::new(1);
        let mut board = Board::with_dimensions(12, 12, false);
        board.increase_intensity(5, 5);

        board.reset(&mut rng, false);

        assert!(board.levels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_fuzz_wall_generation_respects_safe_zone() {
        let start = Point::new(10, 10);
        let safe_distance = 5;

        for seed in 0..200u64 {
            let mut rng = SessionRng::new(seed);
            let mut board = Board::with_dimensions(20, 20, true);

            let placed = board.generate_walls(&mut rng, start, safe_distance);
            assert!(placed <= 6, "Seed {}: placed {} runs", seed, placed);

            for y in 0..20 {
                for x in 0..20 {
                    if board.is_wall(x, y) {
                        let cell = Point::new(x, y);
                        assert!(
                            cell.chebyshev_distance(&start) >= safe_distance,
                            "Seed {}: wall at ({}, {}) inside safe zone",
                            seed,
                            x,
                            y
                        );
                        let intensity = board.intensity(x, y);
                        assert!((WALL_MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity));
                    }
                }
            }
        }
    }
}
