//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates world
//! coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use asteroid_blaster::config::Playfield;
use asteroid_blaster::entities::{AsteroidVariant, Entity, EntityKind, GameStatus};
use asteroid_blaster::Game;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_ROCK1: Color = Color::DarkYellow;
const C_ROCK2: Color = Color::Grey;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

/// Terminal area the playfield is drawn into.
#[derive(Clone, Copy, Debug)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    /// Map a world position to a cell strictly inside the border, or `None`
    /// when it is off the visible playfield.
    fn cell(&self, pf: &Playfield, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || x >= pf.width || y < 0.0 || y >= pf.height {
            return None;
        }
        let cols = self.width.saturating_sub(2) as f32;
        let rows = self.height.saturating_sub(4) as f32;
        let col = 1 + (x / pf.width * cols) as u16;
        let row = 2 + (y / pf.height * rows) as u16;
        Some((
            col.min(self.width.saturating_sub(2)),
            row.min(self.height.saturating_sub(3)),
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whatever state the game is in.
pub fn render<W: Write>(out: &mut W, game: &Game, screen: Screen) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match game.status {
        GameStatus::Menu => draw_menu(out, screen)?,
        GameStatus::Playing => draw_playfield(out, game, screen)?,
        GameStatus::GameOver => {
            draw_playfield(out, game, screen)?;
            draw_overlay(
                out,
                screen,
                "GAME  OVER",
                Color::Red,
                game.session.score,
                "R - Retry   M - Menu   Q - Quit",
            )?;
        }
        GameStatus::Win => {
            draw_playfield(out, game, screen)?;
            draw_overlay(
                out,
                screen,
                "YOU  WIN!",
                Color::Green,
                game.session.score,
                "P - Play Again   M - Menu   Q - Quit",
            )?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("ASTEROID  BLASTER", Color::Cyan),
        ("", Color::Reset),
        ("ENTER / SPACE : Start Game", Color::Green),
        ("Q : Quit", Color::DarkGrey),
        ("", Color::Reset),
        ("← → / A D : Move   SPACE : Shoot", Color::DarkGrey),
    ];
    draw_centered(out, screen, lines)
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, game: &Game, screen: Screen) -> std::io::Result<()> {
    let pf = &game.config.playfield;
    draw_border(out, screen)?;
    draw_hud(out, game)?;

    for asteroid in game.session.pool.obstacles.values() {
        draw_asteroid(out, screen, pf, asteroid)?;
    }
    for projectile in game.session.pool.projectiles.values() {
        if let Some((col, row)) = screen.cell(pf, projectile.x, projectile.y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_PROJECTILE))?;
            out.queue(Print("║"))?;
        }
    }
    draw_player(out, screen, pf, &game.session.player.body)?;

    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

fn draw_border<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    let w = screen.width as usize;
    let h = screen.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:<6}", game.session.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format!("Time: {}", game.elapsed_secs())))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    screen: Screen,
    pf: &Playfield,
    ship: &Entity,
) -> std::io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let Some((col, row)) = screen.cell(pf, ship.x, ship.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < screen.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_asteroid<W: Write>(
    out: &mut W,
    screen: Screen,
    pf: &Playfield,
    asteroid: &Entity,
) -> std::io::Result<()> {
    let Some((col, row)) = screen.cell(pf, asteroid.x, asteroid.y) else {
        return Ok(());
    };
    // Two frames per variant, picked from the tumble angle
    let upright = asteroid.angle.rem_euclid(90.0) < 45.0;
    let (sprite, color) = match asteroid.kind {
        EntityKind::Asteroid(AsteroidVariant::Rock1) => (if upright { "(@)" } else { "(o)" }, C_ROCK1),
        EntityKind::Asteroid(AsteroidVariant::Rock2) => (if upright { "{#}" } else { "{%}" }, C_ROCK2),
        _ => return Ok(()),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    screen: Screen,
    title: &str,
    color: Color,
    score: u32,
    hint: &str,
) -> std::io::Result<()> {
    let banner = format!("║    {:<12}    ║", title);
    let score_line = format!("Final Score: {:>6}", score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", color),
        (banner.as_str(), color),
        ("╚════════════════════╝", color),
        (score_line.as_str(), Color::Yellow),
        (hint, Color::White),
    ];
    draw_centered(out, screen, lines)
}

fn draw_centered<W: Write>(
    out: &mut W,
    screen: Screen,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = screen.width / 2;
    let start_row = (screen.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
