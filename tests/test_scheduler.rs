use std::time::{Duration, Instant};

use mouse_knight::config::{Tuning, FRAME_INTERVAL};
use mouse_knight::entities::*;
use mouse_knight::grid::Grid;
use mouse_knight::scheduler::*;
use mouse_knight::world::World;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn open_world() -> World {
    World::from_grid(Tuning::default(), Grid::new(40, 20))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Pacing ────────────────────────────────────────────────────────────────────

#[test]
fn idle_until_frame_interval() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    assert_eq!(s.step(&mut w, None, t0 + ms(5), &mut rng), Step::Idle);
    assert_eq!(w.stats.frame, 0);
    assert_eq!(s.step(&mut w, None, t0 + ms(12), &mut rng), Step::Ticked);
    assert_eq!(w.stats.frame, 1);
    // the interval restarts from the accepted tick
    assert_eq!(s.step(&mut w, None, t0 + ms(20), &mut rng), Step::Idle);
    assert_eq!(s.step(&mut w, None, t0 + ms(24), &mut rng), Step::Ticked);
}

#[test]
fn key_press_forces_a_tick() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    let step = s.step(&mut w, Some(Command::Move(Direction::Up)), t0 + ms(1), &mut rng);
    assert_eq!(step, Step::Ticked);
    assert_eq!(w.player.pos, Cell::new(9, 20));
    assert_eq!(w.stats.frame, 1);
}

// ── Quit & death ──────────────────────────────────────────────────────────────

#[test]
fn quit_ends_without_death() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    assert_eq!(
        s.step(&mut w, Some(Command::Quit), t0 + ms(1), &mut rng),
        Step::Over { dead: false }
    );
    assert_eq!(s.state(), RunState::GameOver { dead: false });
    assert_eq!(w.stats.frame, 0);
    // terminal state sticks
    assert_eq!(s.step(&mut w, None, t0 + ms(100), &mut rng), Step::Over { dead: false });
    assert_eq!(w.stats.frame, 0);
}

#[test]
fn death_ends_the_run_and_freezes_the_clock() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();
    w.player.hp = 5;
    w.add_monster(MonsterKind::Static, Cell::new(11, 21));

    assert_eq!(s.step(&mut w, None, t0 + ms(12), &mut rng), Step::Over { dead: true });
    assert_eq!(w.player.hp, 0);
    assert_eq!(s.state(), RunState::GameOver { dead: true });
    assert_eq!(s.elapsed(t0 + Duration::from_secs(10)), ms(12));
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn paused_ignores_input_except_quit() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    assert_eq!(s.step(&mut w, Some(Command::Pause), t0 + ms(1), &mut rng), Step::Paused);
    assert_eq!(s.state(), RunState::Paused);
    assert_eq!(
        s.step(&mut w, Some(Command::Move(Direction::Up)), t0 + ms(50), &mut rng),
        Step::Paused
    );
    assert_eq!(s.step(&mut w, None, t0 + ms(100), &mut rng), Step::Paused);
    assert_eq!(w.player.pos, Cell::new(10, 20));
    assert_eq!(w.stats.frame, 0);
    assert_eq!(
        s.step(&mut w, Some(Command::Quit), t0 + ms(150), &mut rng),
        Step::Over { dead: false }
    );
}

#[test]
fn instant_resume_changes_nothing() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let at = t0 + ms(700);
    let before = s.elapsed(at);
    s.pause(at);
    s.resume(at);
    assert_eq!(s.state(), RunState::Running);
    assert_eq!(s.elapsed(at), before);
}

#[test]
fn resume_without_pause_is_a_no_op() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    s.resume(t0 + Duration::from_secs(3));
    assert_eq!(s.state(), RunState::Running);
    assert_eq!(s.elapsed(t0 + Duration::from_secs(3)), Duration::from_secs(3));
}

#[test]
fn elapsed_stops_while_paused() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    s.pause(t0 + Duration::from_secs(1));
    assert_eq!(s.elapsed(t0 + Duration::from_secs(9)), Duration::from_secs(1));
}

#[test]
fn paused_time_earns_no_score() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    s.step(&mut w, Some(Command::Pause), t0 + Duration::from_secs(1), &mut rng);
    s.resume(t0 + Duration::from_secs(5));
    let at = t0 + ms(5500);
    assert_eq!(s.step(&mut w, None, at, &mut rng), Step::Ticked);
    assert_eq!(w.stats.score, 1);
    assert_eq!(s.elapsed(at), ms(1500));
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[test]
fn score_accrues_whole_seconds_with_carry() {
    let t0 = Instant::now();
    let mut s = Scheduler::new(t0, FRAME_INTERVAL);
    let mut w = open_world();
    let mut rng = seeded_rng();

    s.step(&mut w, None, t0 + ms(900), &mut rng);
    assert_eq!(w.stats.score, 0);
    s.step(&mut w, None, t0 + ms(1500), &mut rng);
    assert_eq!(w.stats.score, 1);
    s.step(&mut w, None, t0 + ms(2000), &mut rng);
    assert_eq!(w.stats.score, 2);
    s.step(&mut w, None, t0 + ms(4999), &mut rng);
    assert_eq!(w.stats.score, 4);
}
