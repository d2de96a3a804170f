/// Interaction rules: player moves and sword strikes, contact damage,
/// bullet flight and impact, item pickup, and timed buffs.

use log::debug;

use crate::entities::{
    BulletId, BulletOwner, Cell, Command, Direction, ItemKind, MonsterKind, StrikeMark,
};
use crate::world::World;

// ── Player input ─────────────────────────────────────────────────────────────

/// Apply a movement or attack command.  The previous sword trail is always
/// cleared first.  Pause/quit are handled by the scheduler and ignored here.
pub fn apply_player_action(world: &mut World, command: Command) {
    world.strikes.clear();
    match command {
        Command::Move(dir) => move_player(world, dir),
        Command::Attack(dir) => melee_attack(world, dir),
        Command::Pause | Command::Quit => {}
    }
}

/// Step the player one cell.  Walking into a monster is a bump: contact-type
/// monsters hurt the player and are consumed, and the player stays put.
pub fn move_player(world: &mut World, dir: Direction) {
    let (dr, dc) = dir.delta();
    let target = world.player.pos.offset(dr, dc);
    if !world.grid.is_open(target) {
        return;
    }

    if let Some(id) = world.monster_at(target) {
        let kind = world.monster(id).map(|m| m.kind);
        if let Some(kind) = kind.filter(|k| k.is_contact()) {
            world.hurt_player(kind.attack());
            world.kill_monster(id, false);
        }
        return;
    }

    if let Some(idx) = world.items.iter().position(|it| it.pos == target) {
        let item = world.items.remove(idx);
        apply_item(world, item.kind);
    }
    world.player.pos = target;
}

/// Swing the sword up to `weapon_length` cells.  The first monster on the
/// ray takes the hit; before that, bullets on the ray are swatted away.
/// Every cell passed over gets a trail mark, the first obstacle included.
pub fn melee_attack(world: &mut World, dir: Direction) {
    let (dr, dc) = dir.delta();
    let glyph = dir.strike_glyph();
    let origin = world.player.pos;
    let mut spent = false;

    for step in 1..=world.player.weapon_length {
        let cell = origin.offset(dr * step, dc * step);
        if !world.grid.is_valid(cell) {
            break;
        }
        world.strikes.push(StrikeMark { cell, glyph });
        if world.grid.is_obstacle(cell) {
            break;
        }
        if spent {
            continue;
        }
        if let Some(id) = world.monster_at(cell) {
            world.strike_monster(id, world.player.attack);
            spent = true;
        } else if let Some(bullet) = world.bullet_at(cell) {
            world.remove_bullet(bullet);
        }
    }
}

pub fn apply_item(world: &mut World, kind: ItemKind) {
    let tuning = &world.tuning;
    let player = &mut world.player;
    match kind {
        ItemKind::Heal => player.heal(tuning.heal_amount),
        ItemKind::Strength => {
            player.weapon_length = tuning.strength_weapon_length;
            player.strength_timer = tuning.strength_duration;
        }
        ItemKind::Magic => {
            player.magic_cooldown = 0;
            player.magic_timer = tuning.magic_duration;
        }
        ItemKind::Shield => player.shield_timer = tuning.shield_duration,
    }
    debug!("picked up {:?}", kind);
}

// ── Buffs ────────────────────────────────────────────────────────────────────

/// Count down strength, magic and shield; magic also drives auto-fire.
pub fn update_player_buffs(world: &mut World) {
    let player = &mut world.player;
    if player.strength_timer > 0 {
        player.strength_timer -= 1;
        if player.strength_timer == 0 {
            player.weapon_length = player.base_weapon_length;
        }
    }
    if player.magic_timer > 0 {
        player.magic_timer -= 1;
        auto_magic_shoot(world);
    }
    let player = &mut world.player;
    if player.shield_timer > 0 {
        player.shield_timer -= 1;
    }
}

/// Fire a homing bolt at the nearest monster once the cooldown has run out.
/// With nothing to shoot at, try again after a short retry delay.
pub fn auto_magic_shoot(world: &mut World) {
    if world.player.magic_timer == 0 {
        return;
    }
    if world.player.magic_cooldown > 0 {
        world.player.magic_cooldown -= 1;
        return;
    }
    let target = world.nearest_monster(world.player.pos).map(|m| m.pos);
    match target {
        Some(target) => {
            let (from, damage) = (world.player.pos, world.player.attack);
            world.fire_at(from, target, damage, BulletOwner::Player);
            world.player.magic_cooldown = world.tuning.magic_shoot_interval;
        }
        None => world.player.magic_cooldown = world.tuning.magic_retry_interval,
    }
}

// ── Contact ──────────────────────────────────────────────────────────────────

/// Static monsters bite once the player stands next to them, then crumble.
pub fn static_monster_attack(world: &mut World) {
    for id in world.monster_ids() {
        let Some(m) = world.monster(id) else {
            continue;
        };
        if m.kind != MonsterKind::Static || !m.pos.touches(world.player.pos) {
            continue;
        }
        let damage = m.kind.attack();
        world.hurt_player(damage);
        world.kill_monster(id, false);
    }
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Move each bullet whose pacing counter fires and resolve what it lands on.
pub fn update_bullets(world: &mut World) {
    let step_frames = world.tuning.bullet_step_frames;
    for id in world.bullet_ids() {
        let Some(bullet) = world.bullet_mut(id) else {
            continue;
        };
        bullet.move_counter += 1;
        if bullet.move_counter < step_frames {
            continue;
        }
        bullet.move_counter = 0;
        let from = bullet.pos;
        let next = bullet.trajectory.next_cell(from);
        let (owner, damage) = (bullet.owner, bullet.damage);

        if !world.grid.is_open(next) {
            world.remove_bullet(id);
            continue;
        }
        match owner {
            BulletOwner::Player => {
                if let Some(target) = world.monster_at(next) {
                    world.strike_monster(target, damage);
                    world.remove_bullet(id);
                } else {
                    advance(world, id, next);
                }
            }
            BulletOwner::Monster => {
                if next == world.player.pos {
                    world.hurt_player(damage);
                    world.remove_bullet(id);
                } else if world.monster_at(next).is_some() {
                    world.remove_bullet(id);
                } else {
                    advance(world, id, next);
                }
            }
        }
    }
}

fn advance(world: &mut World, id: BulletId, to: Cell) {
    if let Some(bullet) = world.bullet_mut(id) {
        bullet.pos = to;
    }
}
