/// One accepted simulation tick.
///
/// The call order below is the consistency mechanism: player input resolves
/// before monsters move, monsters before bullets, bullets before spawning.
/// All randomness comes through `rng` so callers control determinism.

use rand::Rng;

use crate::combat::{apply_player_action, static_monster_attack, update_bullets, update_player_buffs};
use crate::entities::Command;
use crate::movement::update_monsters;
use crate::spawn;
use crate::world::World;

pub fn tick(world: &mut World, input: Option<Command>, rng: &mut impl Rng) {
    // ── 1. Player ────────────────────────────────────────────────────────────
    match input {
        Some(command) => apply_player_action(world, command),
        None => world.strikes.clear(),
    }
    update_player_buffs(world);

    // ── 2. Monsters ──────────────────────────────────────────────────────────
    update_monsters(world, rng);
    static_monster_attack(world);

    // ── 3. Projectiles & markers ─────────────────────────────────────────────
    update_bullets(world);
    world.tick_death_marks();

    // ── 4. Spawning ──────────────────────────────────────────────────────────
    spawn::run(world, rng);

    world.stats.frame += 1;
}
