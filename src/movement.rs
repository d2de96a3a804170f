/// Monster behaviour: lifespan, ranged fire, and per-kind movement.
///
/// All randomness comes through the injected `rng`.

use log::trace;
use rand::Rng;

use crate::entities::{BulletOwner, Cell, MonsterId, MonsterKind};
use crate::world::World;

/// Advance every live monster by one tick, in registry order.
pub fn update_monsters(world: &mut World, rng: &mut impl Rng) {
    for id in world.monster_ids() {
        let player_pos = world.player.pos;
        let lifespan_over;
        let mut volley = None;
        let acts;
        let kind;
        {
            let Some(m) = world.monster_mut(id) else {
                continue;
            };
            m.age += 1;
            lifespan_over = m.age >= m.lifespan;
            if !lifespan_over {
                // Ranged reload ticks every frame, independent of the speed gate.
                if let (Some(timer), Some(cooldown)) = (m.bullet_timer.as_mut(), m.kind.bullet_cooldown()) {
                    *timer = timer.saturating_sub(1);
                    if *timer == 0 {
                        volley = Some((m.pos, m.kind.attack()));
                        *timer = cooldown;
                    }
                }
            }
            acts = !lifespan_over && m.should_act();
            kind = m.kind;
        }

        if lifespan_over {
            trace!("{:?} {:?} expired", kind, id);
            world.kill_monster(id, false);
            continue;
        }
        if let Some((from, damage)) = volley {
            world.fire_at(from, player_pos, damage, BulletOwner::Monster);
        }
        if !acts {
            continue;
        }
        match kind {
            MonsterKind::Wanderer | MonsterKind::Ranged => wander_step(world, id, rng),
            MonsterKind::Chaser => chase_step(world, id),
            MonsterKind::Static => {}
        }
    }
}

/// Per-axis sign of `to - from`.
fn signs(from: Cell, to: Cell) -> (i32, i32) {
    ((to.row - from.row).signum(), (to.col - from.col).signum())
}

/// Any interior, non-obstacle cell; `None` after `attempts` misses.
pub fn pick_waypoint(world: &World, rng: &mut impl Rng) -> Option<Cell> {
    (0..world.tuning.waypoint_attempts)
        .map(|_| world.grid.random_interior(rng))
        .find(|&cell| !world.grid.is_obstacle(cell))
}

/// One wanderer action: head for the waypoint, re-picking it once reached or
/// when the way is blocked.
pub fn wander_step(world: &mut World, id: MonsterId, rng: &mut impl Rng) {
    let Some(m) = world.monster(id) else {
        return;
    };
    let (pos, kind) = (m.pos, m.kind);

    let waypoint = match m.waypoint {
        Some(target) if target != pos => Some(target),
        _ => pick_waypoint(world, rng),
    };
    if let Some(m) = world.monster_mut(id) {
        m.waypoint = waypoint;
    }
    let Some(target) = waypoint else {
        return;
    };

    let (mut dr, mut dc) = signs(pos, target);
    if dr != 0 && dc != 0 {
        if rng.gen_bool(0.5) {
            dc = 0;
        } else {
            dr = 0;
        }
    }
    let next = pos.offset(dr, dc);

    if !world.grid.is_open(next) || world.other_monster_at(next, id) {
        forget_waypoint(world, id);
    } else if next == world.player.pos {
        world.hurt_player(kind.attack());
        if kind.is_contact() {
            world.kill_monster(id, false);
        } else {
            forget_waypoint(world, id);
        }
    } else if let Some(m) = world.monster_mut(id) {
        m.pos = next;
    }
}

fn forget_waypoint(world: &mut World, id: MonsterId) {
    if let Some(m) = world.monster_mut(id) {
        m.waypoint = None;
    }
}

/// One chaser action: step toward the player along the row axis first,
/// sidestepping on the other axis when the direct step is walled off.
pub fn chase_step(world: &mut World, id: MonsterId) {
    let Some(m) = world.monster(id) else {
        return;
    };
    let (pos, kind) = (m.pos, m.kind);
    let player_pos = world.player.pos;

    let (dr, mut dc) = signs(pos, player_pos);
    if dr != 0 && dc != 0 {
        dc = 0;
    }
    let mut next = pos.offset(dr, dc);
    if !world.grid.is_open(next) {
        let (toward_r, toward_c) = signs(pos, player_pos);
        let sidestep = if dr != 0 {
            pos.offset(0, toward_c)
        } else {
            pos.offset(toward_r, 0)
        };
        next = if world.grid.is_open(sidestep) { sidestep } else { pos };
    }

    if next == pos || world.other_monster_at(next, id) {
        return;
    }
    if next == player_pos {
        world.hurt_player(kind.attack());
        world.kill_monster(id, false);
    } else if let Some(m) = world.monster_mut(id) {
        m.pos = next;
    }
}
