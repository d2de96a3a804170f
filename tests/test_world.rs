use std::time::Duration;

use mouse_knight::config::{ConfigError, Tuning};
use mouse_knight::entities::*;
use mouse_knight::grid::Grid;
use mouse_knight::world::World;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn open_world() -> World {
    World::from_grid(Tuning::default(), Grid::new(40, 20))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Tuning ────────────────────────────────────────────────────────────────────

#[test]
fn default_tuning_is_valid() {
    assert_eq!(Tuning::default().validate(), Ok(()));
    assert_eq!(Tuning::default().obstacle_target(), 13); // floor(38*18*0.02)
}

#[test]
fn tuning_rejects_tiny_grid() {
    let t = Tuning { width: 2, ..Tuning::default() };
    assert_eq!(t.validate(), Err(ConfigError::GridTooSmall { width: 2, height: 20 }));
}

#[test]
fn tuning_rejects_full_density() {
    let t = Tuning { obstacle_density: 1.0, ..Tuning::default() };
    assert_eq!(t.validate(), Err(ConfigError::BadDensity(1.0)));
    assert!(World::new(t, &mut seeded_rng()).is_err());
}

#[test]
fn tuning_rejects_zero_bullet_step() {
    let t = Tuning { bullet_step_frames: 0, ..Tuning::default() };
    assert!(matches!(t.validate(), Err(ConfigError::ZeroInterval(_))));
}

#[test]
fn tuning_rejects_layout_with_no_spare_cell() {
    // 2x2 interior, 3 obstacles: only the player's cell would stay open
    let t = Tuning { width: 4, height: 4, obstacle_density: 0.75, ..Tuning::default() };
    assert_eq!(t.validate(), Err(ConfigError::Overcrowded { obstacles: 3, area: 4 }));
    let t = Tuning { width: 4, height: 4, obstacle_density: 0.5, ..Tuning::default() };
    assert_eq!(t.validate(), Ok(()));
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn border_is_never_valid() {
    let g = Grid::new(40, 20);
    assert!(!g.is_valid(Cell::new(0, 5)));
    assert!(!g.is_valid(Cell::new(19, 5)));
    assert!(!g.is_valid(Cell::new(5, 0)));
    assert!(!g.is_valid(Cell::new(5, 39)));
    assert!(g.is_valid(Cell::new(1, 1)));
    assert!(g.is_valid(Cell::new(18, 38)));
}

#[test]
fn with_obstacles_drops_border_cells() {
    let g = Grid::new(40, 20).with_obstacles([Cell::new(0, 0), Cell::new(4, 4)]);
    assert_eq!(g.obstacles().len(), 1);
    assert!(g.is_obstacle(Cell::new(4, 4)));
    assert!(!g.is_open(Cell::new(4, 4)));
}

#[test]
fn with_obstacles_keeps_start_clear() {
    let g = Grid::new(40, 20).with_obstacles([Cell::new(10, 20), Cell::new(10, 21)]);
    assert!(!g.is_obstacle(Cell::new(10, 20)));
    assert!(g.is_obstacle(Cell::new(10, 21)));
    let world = World::from_grid(Tuning::default(), g);
    assert!(world.grid.is_open(world.player.pos));
}

#[test]
fn generated_obstacles_hit_target_and_spare_start() {
    let world = World::new(Tuning::default(), &mut seeded_rng()).unwrap();
    assert_eq!(world.grid.obstacles().len(), 13);
    assert_eq!(world.player.pos, Cell::new(10, 20));
    assert!(!world.grid.is_obstacle(world.player.pos));
    assert!(world.grid.obstacles().iter().all(|&c| world.grid.is_valid(c)));
}

#[test]
fn dense_generation_still_terminates() {
    let t = Tuning { width: 6, height: 6, obstacle_density: 0.9, ..Tuning::default() };
    let world = World::new(t, &mut seeded_rng()).unwrap();
    assert_eq!(world.grid.obstacles().len(), 14); // floor(16*0.9)
    assert!(!world.grid.is_obstacle(world.player.pos));
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[test]
fn empty_cell_excludes_every_occupant() {
    let mut world = World::from_grid(
        Tuning::default(),
        Grid::new(40, 20).with_obstacles([Cell::new(2, 2)]),
    );
    world.add_monster(MonsterKind::Chaser, Cell::new(3, 3));
    world.items.push(Item { kind: ItemKind::Heal, pos: Cell::new(4, 4) });
    let pending = world.make_monster(MonsterKind::Wanderer, Cell::new(5, 5));
    world.warnings.push(SpawnWarning { cell: Cell::new(5, 5), phase: 0, timer: 20, pending });

    assert!(!world.is_empty_cell(Cell::new(0, 3)));
    assert!(!world.is_empty_cell(world.player.pos));
    assert!(!world.is_empty_cell(Cell::new(2, 2)));
    assert!(!world.is_empty_cell(Cell::new(3, 3)));
    assert!(!world.is_empty_cell(Cell::new(4, 4)));
    assert!(!world.is_empty_cell(Cell::new(5, 5)));
    assert!(world.is_empty_cell(Cell::new(6, 6)));
}

#[test]
fn random_empty_cell_gives_up_when_full() {
    // 3x3 grid: the only interior cell holds the player.
    let t = Tuning { width: 3, height: 3, ..Tuning::default() };
    let world = World::from_grid(t, Grid::new(3, 3));
    assert_eq!(world.random_empty_cell(100, &mut seeded_rng()), None);
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[test]
fn monster_at_returns_first_registered() {
    let mut world = open_world();
    let first = world.add_monster(MonsterKind::Wanderer, Cell::new(3, 3));
    let _second = world.add_monster(MonsterKind::Chaser, Cell::new(3, 3));
    assert_eq!(world.monster_at(Cell::new(3, 3)), Some(first));
    assert_eq!(world.monster_at(Cell::new(4, 4)), None);
}

#[test]
fn ids_are_unique() {
    let mut world = open_world();
    let a = world.add_monster(MonsterKind::Wanderer, Cell::new(3, 3));
    let b = world.add_monster(MonsterKind::Wanderer, Cell::new(3, 4));
    assert_ne!(a, b);
}

#[test]
fn unscored_kill_leaves_mark_only() {
    let mut world = open_world();
    let id = world.add_monster(MonsterKind::Chaser, Cell::new(3, 3));
    let dead = world.kill_monster(id, false).unwrap();
    assert_eq!(dead.pos, Cell::new(3, 3));
    assert!(world.monsters.is_empty());
    assert_eq!(world.death_marks, vec![DeathMark { cell: Cell::new(3, 3), timer: 25 }]);
    assert_eq!(world.stats.kills, 0);
    assert_eq!(world.stats.score, 0);
    assert!(world.kill_monster(id, true).is_none());
}

#[test]
fn scored_kill_counts() {
    let mut world = open_world();
    let id = world.add_monster(MonsterKind::Ranged, Cell::new(3, 3));
    world.kill_monster(id, true);
    assert_eq!(world.stats.kills, 1);
    assert_eq!(world.stats.score, 40);
}

#[test]
fn strike_monster_keeps_wounded_monsters() {
    let mut world = open_world();
    let id = world.add_monster(MonsterKind::Chaser, Cell::new(3, 3));
    world.monster_mut(id).unwrap().hp = 25;
    assert!(!world.strike_monster(id, 10));
    assert_eq!(world.monster(id).unwrap().hp, 15);
    assert!(world.death_marks.is_empty());
}

#[test]
fn nearest_monster_breaks_ties_by_registry_order() {
    let mut world = open_world(); // player at (10,20)
    world.add_monster(MonsterKind::Chaser, Cell::new(10, 30));
    let tied_first = world.add_monster(MonsterKind::Wanderer, Cell::new(10, 25));
    world.add_monster(MonsterKind::Ranged, Cell::new(5, 20));
    assert_eq!(world.nearest_monster(world.player.pos).map(|m| m.id), Some(tied_first));
}

#[test]
fn nearest_monster_none_when_empty() {
    let world = open_world();
    assert!(world.nearest_monster(world.player.pos).is_none());
}

#[test]
fn death_marks_expire() {
    let mut world = open_world();
    world.death_marks.push(DeathMark { cell: Cell::new(3, 3), timer: 2 });
    world.tick_death_marks();
    assert_eq!(world.death_marks.len(), 1);
    world.tick_death_marks();
    assert!(world.death_marks.is_empty());
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[test]
fn snapshot_carries_stats_and_caps() {
    let mut world = open_world();
    world.stats.score = 12;
    world.stats.kills = 3;
    world.player.shield_timer = 5;
    world.add_monster(MonsterKind::Chaser, Cell::new(3, 3));
    let snap = world.snapshot(Duration::from_secs(7));
    assert_eq!(snap.elapsed, Duration::from_secs(7));
    assert_eq!((snap.score, snap.kills), (12, 3));
    assert_eq!((snap.monster_count, snap.monster_cap), (1, 25));
    assert_eq!((snap.item_count, snap.item_cap), (0, 4));
    assert_eq!(snap.monsters, vec![(Cell::new(3, 3), '&')]);
    assert_eq!(snap.effect_names(), vec!["Defense"]);
}

#[test]
fn compose_layers_in_order() {
    let mut world = World::from_grid(
        Tuning::default(),
        Grid::new(40, 20).with_obstacles([Cell::new(2, 2)]),
    );
    world.items.push(Item { kind: ItemKind::Magic, pos: Cell::new(3, 3) });
    world.add_monster(MonsterKind::Wanderer, Cell::new(3, 3));
    world.items.push(Item { kind: ItemKind::Shield, pos: Cell::new(4, 4) });
    world.strikes.push(StrikeMark { cell: Cell::new(5, 5), glyph: '-' });
    world.strikes.push(StrikeMark { cell: Cell::new(4, 4), glyph: '-' });
    let hidden = world.make_monster(MonsterKind::Chaser, Cell::new(6, 6));
    world.warnings.push(SpawnWarning { cell: Cell::new(6, 6), phase: 1, timer: 20, pending: hidden });
    let shown = world.make_monster(MonsterKind::Chaser, Cell::new(7, 7));
    world.warnings.push(SpawnWarning { cell: Cell::new(7, 7), phase: 2, timer: 20, pending: shown });
    world.death_marks.push(DeathMark { cell: Cell::new(3, 3), timer: 5 });

    let grid = world.snapshot(Duration::ZERO).compose();
    assert_eq!(grid.len(), 20);
    assert_eq!(grid[0].len(), 40);
    assert_eq!(grid[0][0], '+');
    assert_eq!(grid[19][39], '+');
    assert_eq!(grid[2][2], '#');
    assert_eq!(grid[3][3], 'x'); // death mark over monster over item
    assert_eq!(grid[4][4], 'D'); // trail never hides an item
    assert_eq!(grid[5][5], '-');
    assert_eq!(grid[6][6], ' ');
    assert_eq!(grid[7][7], '!');
    assert_eq!(grid[10][20], '@');
}
