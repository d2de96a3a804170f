/// Rendering layer: all terminal output lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates a
/// `Snapshot` into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use mouse_knight::entities::{ItemKind, MonsterKind};
use mouse_knight::snapshot::{self as glyphs, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Yellow;
const C_HOSTILE: Color = Color::Red;
const C_ITEM: Color = Color::Green;
const C_HUD_VALUE: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

fn glyph_color(ch: char) -> Option<Color> {
    if ch == glyphs::PLAYER {
        return Some(C_PLAYER);
    }
    if ch == glyphs::WARNING || MonsterKind::ALL.iter().any(|k| k.glyph() == ch) {
        return Some(C_HOSTILE);
    }
    if ItemKind::ALL.iter().any(|k| k.glyph() == ch) {
        return Some(C_ITEM);
    }
    None
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Render one complete frame: two header lines, then the map with a space
/// between cells.  Lines are painted in place so the terminal never scrolls.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    draw_header(out, snap)?;

    for (i, row) in snap.compose().iter().enumerate() {
        out.queue(cursor::MoveTo(0, 2 + i as u16))?;
        for (c, &ch) in row.iter().enumerate() {
            if c > 0 {
                out.queue(Print(' '))?;
            }
            match glyph_color(ch) {
                Some(color) => {
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(ch))?;
                    out.queue(style::ResetColor)?;
                }
                None => {
                    out.queue(Print(ch))?;
                }
            }
        }
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
    out.flush()?;
    Ok(())
}

fn draw_header<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    out.queue(Print("HP: "))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("{}/{}", snap.player.hp, snap.player.max_hp)))?;
    out.queue(style::ResetColor)?;

    for (label, value) in [
        ("Time", format!("{} s", snap.elapsed.as_secs())),
        ("Score", snap.score.to_string()),
        ("Kills", snap.kills.to_string()),
    ] {
        out.queue(Print(format!("  {}: ", label)))?;
        out.queue(style::SetForegroundColor(C_HUD_VALUE))?;
        out.queue(Print(value))?;
        out.queue(style::ResetColor)?;
    }
    out.queue(Print(format!(
        "  Monsters: {}/{}  Items: {}/{}",
        snap.monster_count, snap.monster_cap, snap.item_count, snap.item_cap
    )))?;
    out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print("Status: "))?;
    let effects = snap.effect_names();
    if effects.is_empty() {
        out.queue(Print("None"))?;
    } else {
        out.queue(style::SetForegroundColor(C_HUD_VALUE))?;
        out.queue(Print(effects.join(", ")))?;
        out.queue(style::ResetColor)?;
    }
    out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_lines<W: Write>(out: &mut W, lines: &[(String, Option<Color>)]) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(0, i as u16))?;
        if let Some(color) = color {
            out.queue(style::SetForegroundColor(*color))?;
        }
        out.queue(Print(text))?;
        out.queue(style::ResetColor)?;
    }
    out.flush()?;
    Ok(())
}

pub fn start_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    let monster_lines = [
        (MonsterKind::Static, "Thorn Beast: hurts you when you get next to it, keep your distance."),
        (MonsterKind::Wanderer, "Giant Spider: wanders randomly, don't run into it."),
        (MonsterKind::Chaser, "Zombie: follows your scent, slow but persistent."),
        (MonsterKind::Ranged, "Skeleton: shoots arrows, dodge them or swat them with your sword."),
    ];
    let item_lines = [
        (ItemKind::Heal, "Healing Potion: restore some HP."),
        (ItemKind::Strength, "Strength Potion: your sword becomes super long for a short time."),
        (ItemKind::Shield, "Defense Potion: briefly ignore incoming damage."),
        (ItemKind::Magic, "Magic Potion: auto-cast shots at nearby enemies."),
    ];

    let mut lines: Vec<(String, Option<Color>)> = vec![
        ("============== MOUSE KNIGHT'S SURVIVAL ADVENTURE ==============".into(), Some(Color::Cyan)),
        ("Move: WASD   Attack: IJKL   Pause: P   Quit: Q".into(), Some(C_HINT)),
        (String::new(), None),
        ("Survive in this strange land. Slash the monsters, grab helpful items, and stay alive as long as you can.".into(), None),
        (String::new(), None),
        ("Entities:".into(), None),
        (format!("  {}  You: the brave mouse knight.", glyphs::PLAYER), Some(C_PLAYER)),
    ];
    for (kind, text) in monster_lines {
        lines.push((format!("  {}  {}", kind.glyph(), text), Some(C_HOSTILE)));
    }
    lines.push((String::new(), None));
    lines.push(("Magic Items:".into(), None));
    for (kind, text) in item_lines {
        lines.push((format!("  {}  {}", kind.glyph(), text), Some(C_ITEM)));
    }
    lines.push((String::new(), None));
    lines.push(("Press any key to start...".into(), Some(C_HINT)));
    draw_lines(out, &lines)
}

pub fn pause_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    draw_lines(
        out,
        &[
            ("========= PAUSED =========".into(), Some(Color::Cyan)),
            ("Press any key to continue...".into(), Some(C_HINT)),
        ],
    )
}

pub fn countdown_screen<W: Write>(out: &mut W, secs: u32) -> std::io::Result<()> {
    draw_lines(out, &[(format!("Continuing in {}...", secs), Some(Color::Cyan))])
}

pub fn game_over_screen<W: Write>(out: &mut W, snap: &Snapshot) -> std::io::Result<()> {
    draw_lines(
        out,
        &[
            ("Game Over!".into(), Some(C_HOSTILE)),
            (
                format!(
                    "Time: {} s    Kills: {}    Final Score: {}",
                    snap.elapsed.as_secs(),
                    snap.kills,
                    snap.score
                ),
                Some(C_HUD_VALUE),
            ),
            (String::new(), None),
            ("Press any key to continue...".into(), Some(C_HINT)),
        ],
    )
}
