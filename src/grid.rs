/// Spatial grid: bounds, the border wall, and the fixed obstacle set.

use std::collections::BTreeSet;

use rand::Rng;

use crate::entities::Cell;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    obstacles: BTreeSet<Cell>,
}

impl Grid {
    /// An open grid with only the border wall.
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            obstacles: BTreeSet::new(),
        }
    }

    /// Same grid with a fixed obstacle layout.  Cells outside the interior
    /// are dropped since the border already blocks them, and so is the
    /// centre, where the player starts.
    pub fn with_obstacles(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        let start = self.center();
        let obstacles: BTreeSet<Cell> = cells
            .into_iter()
            .filter(|&c| self.is_valid(c) && c != start)
            .collect();
        self.obstacles = obstacles;
        self
    }

    /// Sample random interior cells until `target` distinct obstacles exist,
    /// never covering `keep_clear`.  Caller guarantees `target` fits.
    pub fn generate(
        width: i32,
        height: i32,
        target: usize,
        keep_clear: Cell,
        rng: &mut impl Rng,
    ) -> Self {
        let mut grid = Grid::new(width, height);
        while grid.obstacles.len() < target {
            let cell = grid.random_interior(rng);
            if cell != keep_clear {
                grid.obstacles.insert(cell);
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn obstacles(&self) -> &BTreeSet<Cell> {
        &self.obstacles
    }

    /// Interior only: the border ring is permanently solid.
    pub fn is_valid(&self, cell: Cell) -> bool {
        cell.row > 0 && cell.row < self.height - 1 && cell.col > 0 && cell.col < self.width - 1
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Inside the border and not an obstacle.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.is_valid(cell) && !self.is_obstacle(cell)
    }

    pub fn random_interior(&self, rng: &mut impl Rng) -> Cell {
        Cell::new(
            rng.gen_range(1..=self.height - 2),
            rng.gen_range(1..=self.width - 2),
        )
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.height / 2, self.width / 2)
    }
}
