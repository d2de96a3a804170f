/// The `World` aggregate: sole owner of every live entity collection.
///
/// Subsystems never keep their own copies of entities.  Anything that removes
/// entries while walking a collection iterates a snapshot of ids
/// (`monster_ids`, `bullet_ids`) and mutates the live `Vec` by id, so an entry
/// removed mid-walk is simply skipped when its id no longer resolves.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::config::{ConfigError, Tuning};
use crate::entities::{
    Bullet, BulletId, BulletOwner, Cell, DeathMark, Item, LineTrace, Monster, MonsterId,
    MonsterKind, Player, SpawnWarning, StrikeMark, Trajectory,
};
use crate::grid::Grid;
use crate::snapshot::Snapshot;
use crate::spawn::SpawnDirector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub score: u32,
    pub kills: u32,
    /// Accepted ticks so far.
    pub frame: u64,
}

#[derive(Clone, Debug)]
pub struct World {
    pub tuning: Tuning,
    pub grid: Grid,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub bullets: Vec<Bullet>,
    pub items: Vec<Item>,
    pub warnings: Vec<SpawnWarning>,
    pub death_marks: Vec<DeathMark>,
    /// Sword trail of the current tick only.
    pub strikes: Vec<StrikeMark>,
    pub stats: Stats,
    pub director: SpawnDirector,
    next_id: u64,
}

// ── Construction ─────────────────────────────────────────────────────────────

impl World {
    /// Fresh game: player in the centre, obstacles scattered at random.
    pub fn new(tuning: Tuning, rng: &mut impl Rng) -> Result<World, ConfigError> {
        tuning.validate()?;
        let start = Grid::new(tuning.width, tuning.height).center();
        let grid = Grid::generate(
            tuning.width,
            tuning.height,
            tuning.obstacle_target(),
            start,
            rng,
        );
        info!(
            "new {}x{} world with {} obstacles",
            tuning.width,
            tuning.height,
            grid.obstacles().len()
        );
        Ok(World::from_grid(tuning, grid))
    }

    /// World over a fixed layout.  The player starts at `grid.center()`,
    /// which both grid constructors keep clear of obstacles.
    pub fn from_grid(tuning: Tuning, grid: Grid) -> World {
        debug_assert!(grid.is_open(grid.center()), "start cell blocked");
        let player = Player {
            pos: grid.center(),
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            attack: tuning.player_attack,
            weapon_length: tuning.weapon_length,
            base_weapon_length: tuning.weapon_length,
            strength_timer: 0,
            magic_timer: 0,
            shield_timer: 0,
            magic_cooldown: 0,
        };
        let director = SpawnDirector::new(&tuning);
        World {
            tuning,
            grid,
            player,
            monsters: Vec::new(),
            bullets: Vec::new(),
            items: Vec::new(),
            warnings: Vec::new(),
            death_marks: Vec::new(),
            strikes: Vec::new(),
            stats: Stats::default(),
            director,
            next_id: 0,
        }
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Build (but do not register) a monster of `kind` at `pos`.
    pub fn make_monster(&mut self, kind: MonsterKind, pos: Cell) -> Monster {
        let id = MonsterId(self.fresh_id());
        Monster::new(id, kind, pos, self.tuning.monster_lifespan)
    }

    /// Register a live monster directly, skipping the telegraph.
    pub fn add_monster(&mut self, kind: MonsterKind, pos: Cell) -> MonsterId {
        let monster = self.make_monster(kind, pos);
        let id = monster.id;
        self.monsters.push(monster);
        id
    }
}

// ── Placement queries ────────────────────────────────────────────────────────

impl World {
    /// Free for spawning: interior, not the player, not an obstacle, and not
    /// taken by a monster, item or pending spawn warning.
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.grid.is_valid(cell)
            && cell != self.player.pos
            && !self.grid.is_obstacle(cell)
            && self.monster_at(cell).is_none()
            && !self.items.iter().any(|it| it.pos == cell)
            && !self.warnings.iter().any(|w| w.cell == cell)
    }

    /// Up to `attempts` random interior samples; `None` when all are taken.
    pub fn random_empty_cell(&self, attempts: u32, rng: &mut impl Rng) -> Option<Cell> {
        (0..attempts)
            .map(|_| self.grid.random_interior(rng))
            .find(|&cell| self.is_empty_cell(cell))
    }
}

// ── Monsters ─────────────────────────────────────────────────────────────────

impl World {
    /// Ids of the live monsters in registry order.
    pub fn monster_ids(&self) -> Vec<MonsterId> {
        self.monsters.iter().map(|m| m.id).collect()
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    /// First monster (registry order) standing on `cell`.
    pub fn monster_at(&self, cell: Cell) -> Option<MonsterId> {
        self.monsters.iter().find(|m| m.pos == cell).map(|m| m.id)
    }

    /// Whether a monster other than `me` stands on `cell`.
    pub fn other_monster_at(&self, cell: Cell, me: MonsterId) -> bool {
        self.monsters.iter().any(|m| m.id != me && m.pos == cell)
    }

    /// Remove a monster and leave a death mark at its last cell.  `scored`
    /// kills count toward score and kill count; self-destructs do not.
    pub fn kill_monster(&mut self, id: MonsterId, scored: bool) -> Option<Monster> {
        let idx = self.monsters.iter().position(|m| m.id == id)?;
        let monster = self.monsters.remove(idx);
        self.death_marks.push(DeathMark {
            cell: monster.pos,
            timer: self.tuning.death_mark_duration,
        });
        if scored {
            self.stats.kills += 1;
            self.stats.score += monster.kind.score();
            debug!(
                "killed {:?} at {:?} (+{})",
                monster.kind,
                monster.pos,
                monster.kind.score()
            );
        }
        Some(monster)
    }

    /// Deal `damage` to a monster; kills it (scored) once hp drops to zero.
    /// Returns true if the monster died.
    pub fn strike_monster(&mut self, id: MonsterId, damage: i32) -> bool {
        let Some(monster) = self.monster_mut(id) else {
            return false;
        };
        monster.hp -= damage;
        if monster.hp <= 0 {
            self.kill_monster(id, true);
            true
        } else {
            false
        }
    }

    /// Nearest monster to `from` by Manhattan distance; ties go to the
    /// earliest registered.
    pub fn nearest_monster(&self, from: Cell) -> Option<&Monster> {
        self.monsters.iter().min_by_key(|m| m.pos.manhattan(from))
    }

    /// Contact damage from a monster to the player, shield permitting.
    pub fn hurt_player(&mut self, amount: i32) {
        let dealt = self.player.take_hit(amount);
        if dealt > 0 {
            debug!("player hit for {} ({} hp left)", dealt, self.player.hp);
        }
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

impl World {
    pub fn bullet_ids(&self) -> Vec<BulletId> {
        self.bullets.iter().map(|b| b.id).collect()
    }

    pub fn bullet_mut(&mut self, id: BulletId) -> Option<&mut Bullet> {
        self.bullets.iter_mut().find(|b| b.id == id)
    }

    pub fn bullet_at(&self, cell: Cell) -> Option<BulletId> {
        self.bullets.iter().find(|b| b.pos == cell).map(|b| b.id)
    }

    pub fn remove_bullet(&mut self, id: BulletId) -> Option<Bullet> {
        let idx = self.bullets.iter().position(|b| b.id == id)?;
        Some(self.bullets.remove(idx))
    }

    /// Launch a bullet at `from` aimed at where `target` is right now.
    pub fn fire_at(&mut self, from: Cell, target: Cell, damage: i32, owner: BulletOwner) -> BulletId {
        self.fire(from, Trajectory::Homing(LineTrace::towards(from, target)), damage, owner)
    }

    pub fn fire(
        &mut self,
        from: Cell,
        trajectory: Trajectory,
        damage: i32,
        owner: BulletOwner,
    ) -> BulletId {
        let id = BulletId(self.fresh_id());
        self.bullets.push(Bullet {
            id,
            pos: from,
            trajectory,
            damage,
            owner,
            move_counter: 0,
        });
        id
    }
}

// ── Markers & snapshot ───────────────────────────────────────────────────────

impl World {
    pub fn tick_death_marks(&mut self) {
        for mark in &mut self.death_marks {
            mark.timer = mark.timer.saturating_sub(1);
        }
        self.death_marks.retain(|mark| mark.timer > 0);
    }

    /// Everything the renderer needs for one frame.
    pub fn snapshot(&self, elapsed: Duration) -> Snapshot {
        Snapshot::capture(self, elapsed)
    }
}
