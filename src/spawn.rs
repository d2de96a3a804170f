/// Spawn director: telegraphed monster waves and periodic item drops.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Item, ItemKind, MonsterKind, SpawnWarning};
use crate::world::World;

/// Countdown state for both spawners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnDirector {
    pub monster_timer: u32,
    pub item_timer: u32,
}

impl SpawnDirector {
    pub fn new(tuning: &Tuning) -> Self {
        SpawnDirector {
            monster_timer: tuning.monster_base_interval,
            item_timer: tuning.item_spawn_interval,
        }
    }
}

/// Monsters per wave at a given score.
pub fn wave_size(score: u32) -> usize {
    if score > 600 {
        3
    } else if score > 300 {
        2
    } else {
        1
    }
}

/// Ticks until the next wave: shrinks by one per 200 points, floored.
pub fn wave_interval(tuning: &Tuning, score: u32) -> u32 {
    tuning
        .monster_base_interval
        .saturating_sub(score / 200)
        .max(tuning.monster_min_interval)
}

/// Weighted pick over the four archetypes.
pub fn pick_monster_kind(rng: &mut impl Rng) -> Option<MonsterKind> {
    MonsterKind::ALL
        .choose_weighted(rng, |kind| kind.spawn_weight())
        .ok()
        .copied()
}

/// Run all spawners for one tick.  Pending warnings are advanced before the
/// wave timer, so a warning placed now first counts down on the next tick.
pub fn run(world: &mut World, rng: &mut impl Rng) {
    advance_warnings(world);
    spawn_wave(world, rng);
    spawn_item(world, rng);
}

/// Count down the wave timer; on expiry place a batch of telegraphs.
pub fn spawn_wave(world: &mut World, rng: &mut impl Rng) {
    world.director.monster_timer = world.director.monster_timer.saturating_sub(1);
    if world.director.monster_timer > 0 {
        return;
    }

    let cap = world.tuning.monster_cap;
    let live = world.monsters.len();
    if live < cap {
        let batch = wave_size(world.stats.score).min(cap - live);
        for _ in 0..batch {
            telegraph_monster(world, rng);
        }
    }
    world.director.monster_timer = wave_interval(&world.tuning, world.stats.score);
}

/// Choose a kind and a free cell and put up a warning holding the monster.
/// Silently does nothing when no free cell turns up.
pub fn telegraph_monster(world: &mut World, rng: &mut impl Rng) -> bool {
    let Some(kind) = pick_monster_kind(rng) else {
        return false;
    };
    let Some(cell) = world.random_empty_cell(world.tuning.placement_attempts, rng) else {
        return false;
    };
    let pending = world.make_monster(kind, cell);
    world.warnings.push(SpawnWarning {
        cell,
        phase: 0,
        timer: world.tuning.warning_phase_frames,
        pending,
    });
    debug!("telegraphed {:?} at {:?}", kind, cell);
    true
}

/// Tick every warning.  After its last phase a warning either materializes
/// its monster (cell free and under the cap) or is dropped; it is removed
/// either way.
pub fn advance_warnings(world: &mut World) {
    let phases = world.tuning.warning_phases;
    let phase_frames = world.tuning.warning_phase_frames;
    let mut due = Vec::new();

    for (idx, warning) in world.warnings.iter_mut().enumerate() {
        warning.timer = warning.timer.saturating_sub(1);
        if warning.timer > 0 {
            continue;
        }
        warning.phase += 1;
        if warning.phase < phases {
            warning.timer = phase_frames;
        } else {
            due.push(idx);
        }
    }

    // Remove back to front so earlier indices stay valid, then resolve in
    // registry order.
    let mut ripe: Vec<SpawnWarning> = due
        .into_iter()
        .rev()
        .map(|idx| world.warnings.remove(idx))
        .collect();
    ripe.reverse();

    for warning in ripe {
        let cell = warning.cell;
        let blocked = cell == world.player.pos
            || world.grid.is_obstacle(cell)
            || world.monster_at(cell).is_some()
            || world.items.iter().any(|it| it.pos == cell);
        if !blocked && world.monsters.len() < world.tuning.monster_cap {
            debug!("{:?} emerges at {:?}", warning.pending.kind, cell);
            world.monsters.push(warning.pending);
        } else {
            debug!("spawn at {:?} fizzled", cell);
        }
    }
}

/// Fixed-interval item drop.  The timer re-arms whether or not an item fits.
pub fn spawn_item(world: &mut World, rng: &mut impl Rng) {
    world.director.item_timer = world.director.item_timer.saturating_sub(1);
    if world.director.item_timer > 0 {
        return;
    }
    world.director.item_timer = world.tuning.item_spawn_interval;
    if world.items.len() >= world.tuning.item_cap {
        return;
    }
    let Some(&kind) = ItemKind::ALL.choose(rng) else {
        return;
    };
    if let Some(pos) = world.random_empty_cell(world.tuning.placement_attempts, rng) {
        debug!("dropped {:?} at {:?}", kind, pos);
        world.items.push(Item { kind, pos });
    }
}
