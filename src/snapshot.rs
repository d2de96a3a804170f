/// Render boundary: an owned, read-only picture of one frame.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::entities::{Cell, Effects};
use crate::world::World;

pub const BORDER: char = '+';
pub const OBSTACLE: char = '#';
pub const BULLET: char = '*';
pub const PLAYER: char = '@';
pub const WARNING: char = '!';
pub const DEATH_MARK: char = 'x';
pub const FLOOR: char = ' ';

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub pos: Cell,
    pub hp: u32,
    pub max_hp: u32,
    pub effects: Effects,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub obstacles: BTreeSet<Cell>,
    pub player: PlayerView,
    pub monsters: Vec<(Cell, char)>,
    pub bullets: Vec<Cell>,
    pub items: Vec<(Cell, char)>,
    pub strikes: Vec<(Cell, char)>,
    /// Only warnings on a visible (even) flash phase.
    pub warnings: Vec<Cell>,
    pub death_marks: Vec<Cell>,
    pub elapsed: Duration,
    pub score: u32,
    pub kills: u32,
    pub monster_count: usize,
    pub monster_cap: usize,
    pub item_count: usize,
    pub item_cap: usize,
}

impl Snapshot {
    pub fn capture(world: &World, elapsed: Duration) -> Self {
        Snapshot {
            width: world.grid.width(),
            height: world.grid.height(),
            obstacles: world.grid.obstacles().clone(),
            player: PlayerView {
                pos: world.player.pos,
                hp: world.player.hp,
                max_hp: world.player.max_hp,
                effects: world.player.effects(),
            },
            monsters: world.monsters.iter().map(|m| (m.pos, m.kind.glyph())).collect(),
            bullets: world.bullets.iter().map(|b| b.pos).collect(),
            items: world.items.iter().map(|it| (it.pos, it.kind.glyph())).collect(),
            strikes: world.strikes.iter().map(|s| (s.cell, s.glyph)).collect(),
            warnings: world
                .warnings
                .iter()
                .filter(|w| w.visible())
                .map(|w| w.cell)
                .collect(),
            death_marks: world.death_marks.iter().map(|d| d.cell).collect(),
            elapsed,
            score: world.stats.score,
            kills: world.stats.kills,
            monster_count: world.monsters.len(),
            monster_cap: world.tuning.monster_cap,
            item_count: world.items.len(),
            item_cap: world.tuning.item_cap,
        }
    }

    /// Lay every layer onto a `height × width` character grid.  Later layers
    /// win, except the sword trail which only paints bare floor.
    pub fn compose(&self) -> Vec<Vec<char>> {
        let (w, h) = (self.width.max(0) as usize, self.height.max(0) as usize);
        let mut grid = vec![vec![FLOOR; w]; h];

        for (r, row) in grid.iter_mut().enumerate() {
            for (c, ch) in row.iter_mut().enumerate() {
                if r == 0 || r + 1 == h || c == 0 || c + 1 == w {
                    *ch = BORDER;
                }
            }
        }

        let put = |grid: &mut Vec<Vec<char>>, cell: Cell, ch: char| {
            if cell.row > 0 && cell.row < self.height - 1 && cell.col > 0 && cell.col < self.width - 1 {
                grid[cell.row as usize][cell.col as usize] = ch;
            }
        };

        for &cell in &self.obstacles {
            put(&mut grid, cell, OBSTACLE);
        }
        for &(cell, ch) in &self.items {
            put(&mut grid, cell, ch);
        }
        for &cell in &self.bullets {
            put(&mut grid, cell, BULLET);
        }
        for &(cell, ch) in &self.monsters {
            put(&mut grid, cell, ch);
        }
        put(&mut grid, self.player.pos, PLAYER);
        for &(cell, ch) in &self.strikes {
            let bare = grid
                .get(cell.row as usize)
                .and_then(|row| row.get(cell.col as usize))
                .is_some_and(|&c| c == FLOOR);
            if bare {
                put(&mut grid, cell, ch);
            }
        }
        for &cell in &self.warnings {
            put(&mut grid, cell, WARNING);
        }
        for &cell in &self.death_marks {
            put(&mut grid, cell, DEATH_MARK);
        }
        grid
    }

    /// Names of the active effects, in display order.
    pub fn effect_names(&self) -> Vec<&'static str> {
        let fx = self.player.effects;
        [
            (fx.strength, "Strength"),
            (fx.magic, "Magic"),
            (fx.shield, "Defense"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}
