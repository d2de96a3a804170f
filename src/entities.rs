/// All game entity types: pure data plus their constant tables.

// ── Geometry ─────────────────────────────────────────────────────────────────

/// A grid cell, row-major (row 0 is the top border).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub fn offset(self, dr: i32, dc: i32) -> Self {
        Cell {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// 8-neighbourhood adjacency; a cell is not adjacent to itself.
    pub fn touches(self, other: Cell) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(dr, dc)` for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Glyph drawn along a melee strike in this direction.
    pub fn strike_glyph(self) -> char {
        match self {
            Direction::Up | Direction::Down => '|',
            Direction::Left | Direction::Right => '-',
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// One decoded input symbol.  "No key" is `Option::<Command>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Attack(Direction),
    Pause,
    Quit,
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub pos: Cell,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: i32,
    /// Melee reach in cells.
    pub weapon_length: i32,
    pub base_weapon_length: i32,
    pub strength_timer: u32,
    pub magic_timer: u32,
    pub shield_timer: u32,
    /// Ticks until the next auto-magic shot.
    pub magic_cooldown: u32,
}

impl Player {
    pub fn shielded(&self) -> bool {
        self.shield_timer > 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Apply incoming damage unless the shield is up.  Returns damage dealt.
    pub fn take_hit(&mut self, amount: i32) -> u32 {
        if self.shielded() || amount <= 0 {
            return 0;
        }
        let dealt = (amount as u32).min(self.hp);
        self.hp -= dealt;
        dealt
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn effects(&self) -> Effects {
        Effects {
            strength: self.strength_timer > 0,
            magic: self.magic_timer > 0,
            shield: self.shield_timer > 0,
        }
    }
}

/// Which timed buffs are currently running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    pub strength: bool,
    pub magic: bool,
    pub shield: bool,
}

// ── Monsters ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonsterId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterKind {
    /// Never moves; bites whoever stands next to it, then crumbles.
    Static,
    /// Walks between random waypoints.
    Wanderer,
    /// Walks straight at the player.
    Chaser,
    /// Wanders and shoots homing arrows.
    Ranged,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Static,
        MonsterKind::Wanderer,
        MonsterKind::Chaser,
        MonsterKind::Ranged,
    ];

    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Static => '^',
            MonsterKind::Wanderer => '%',
            MonsterKind::Chaser => '&',
            MonsterKind::Ranged => '$',
        }
    }

    pub fn max_hp(self) -> i32 {
        1
    }

    pub fn attack(self) -> i32 {
        match self {
            MonsterKind::Static => 10,
            MonsterKind::Wanderer => 12,
            MonsterKind::Chaser => 18,
            MonsterKind::Ranged => 10,
        }
    }

    /// Ticks between actions; `None` never acts.
    pub fn speed(self) -> Option<u32> {
        match self {
            MonsterKind::Static => None,
            MonsterKind::Wanderer => Some(25),
            MonsterKind::Chaser => Some(45),
            MonsterKind::Ranged => Some(40),
        }
    }

    /// Awarded to the player on a kill.
    pub fn score(self) -> u32 {
        match self {
            MonsterKind::Static => 10,
            MonsterKind::Wanderer => 20,
            MonsterKind::Chaser => 30,
            MonsterKind::Ranged => 40,
        }
    }

    pub fn spawn_weight(self) -> u32 {
        match self {
            MonsterKind::Static => 1,
            MonsterKind::Wanderer => 3,
            MonsterKind::Chaser => 2,
            MonsterKind::Ranged => 2,
        }
    }

    pub fn bullet_cooldown(self) -> Option<u32> {
        match self {
            MonsterKind::Ranged => Some(100),
            _ => None,
        }
    }

    /// Contact-type monsters are consumed when they collide with the player.
    pub fn is_contact(self) -> bool {
        !matches!(self, MonsterKind::Ranged)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub hp: i32,
    pub pos: Cell,
    /// Speed-gate counter.
    pub frames_since_action: u32,
    pub waypoint: Option<Cell>,
    pub bullet_timer: Option<u32>,
    pub age: u32,
    pub lifespan: u32,
}

impl Monster {
    pub fn new(id: MonsterId, kind: MonsterKind, pos: Cell, lifespan: u32) -> Self {
        Monster {
            id,
            kind,
            hp: kind.max_hp(),
            pos,
            frames_since_action: 0,
            waypoint: None,
            bullet_timer: kind.bullet_cooldown(),
            age: 0,
            lifespan,
        }
    }

    /// Advance the speed gate.  Returns true on the tick the monster acts.
    pub fn should_act(&mut self) -> bool {
        let Some(speed) = self.kind.speed() else {
            return false;
        };
        self.frames_since_action += 1;
        if self.frames_since_action >= speed {
            self.frames_since_action = 0;
            true
        } else {
            false
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Monster,
}

/// Bresenham accumulator aimed at a target captured at launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineTrace {
    pub dx: i32,
    pub dy: i32,
    pub sx: i32,
    pub sy: i32,
    pub err: i32,
}

impl LineTrace {
    pub fn towards(from: Cell, to: Cell) -> Self {
        let dx = (to.col - from.col).abs();
        let dy = (to.row - from.row).abs();
        LineTrace {
            dx,
            dy,
            sx: (to.col - from.col).signum(),
            sy: (to.row - from.row).signum(),
            err: dx - dy,
        }
    }

    /// One step along the line.  Keeps going past the original target.
    pub fn step(&mut self, from: Cell) -> Cell {
        let e2 = 2 * self.err;
        let mut next = from;
        if e2 > -self.dy {
            self.err -= self.dy;
            next.col += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            next.row += self.sy;
        }
        next
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trajectory {
    Straight { dr: i32, dc: i32 },
    Homing(LineTrace),
}

impl Trajectory {
    pub fn next_cell(&mut self, from: Cell) -> Cell {
        match self {
            Trajectory::Straight { dr, dc } => from.offset(*dr, *dc),
            Trajectory::Homing(trace) => trace.step(from),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub id: BulletId,
    pub pos: Cell,
    pub trajectory: Trajectory,
    pub damage: i32,
    pub owner: BulletOwner,
    /// Ticks since the last trajectory step.
    pub move_counter: u32,
}

// ── Items ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Heal,
    Strength,
    Magic,
    Shield,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Heal,
        ItemKind::Strength,
        ItemKind::Magic,
        ItemKind::Shield,
    ];

    pub fn glyph(self) -> char {
        match self {
            ItemKind::Heal => 'H',
            ItemKind::Strength => 'S',
            ItemKind::Magic => 'M',
            ItemKind::Shield => 'D',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Cell,
}

// ── Transient markers ────────────────────────────────────────────────────────

/// Flashing `!` that turns into `pending` once its last phase runs out.
///
/// Lifecycle: created at phase 0 with a full phase timer; each time the timer
/// reaches zero the phase advances.  After the final phase the warning is
/// resolved (materialized or discarded) and removed.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnWarning {
    pub cell: Cell,
    pub phase: u32,
    pub timer: u32,
    pub pending: Monster,
}

impl SpawnWarning {
    /// The `!` is drawn on even phases only.
    pub fn visible(&self) -> bool {
        self.phase % 2 == 0
    }
}

/// Cosmetic `x` left where a monster died; removed when `timer` hits zero.
#[derive(Clone, Debug, PartialEq)]
pub struct DeathMark {
    pub cell: Cell,
    pub timer: u32,
}

/// One cell of the sword trail, valid for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeMark {
    pub cell: Cell,
    pub glyph: char,
}
