/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and immutable views of the
/// session, simulation snapshot or leaderboard.  No game logic is
/// performed; this module only translates state into terminal commands.
/// World coordinates (1360×1200 pixels) are scaled into the bordered
/// play area.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use neon_invaders::constants::LEADERBOARD_TOP;
use neon_invaders::entities::{Bullet, Difficulty, Enemy, Heart, SessionState};
use neon_invaders::leaderboard::Leaderboard;
use neon_invaders::session::Session;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Magenta;
const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Red;
const C_BOSS: Color = Color::Yellow;
const C_BOSS_HEALTH: Color = Color::Magenta;
const C_BULLET: Color = Color::Green;
const C_HEART: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;

/// Terminal dimensions in cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn current() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    /// Map a world point to a cell inside the border, or `None` if it is
    /// off the play area.
    fn cell(&self, state: &SessionState, x: f64, y: f64) -> Option<(u16, u16)> {
        let inner_w = f64::from(self.width.saturating_sub(2));
        let inner_h = f64::from(self.height.saturating_sub(4));
        if x < 0.0 || y < 0.0 || x >= state.width || y >= state.height {
            return None;
        }
        let col = 1 + (x / state.width * inner_w) as u16;
        let row = 2 + (y / state.height * inner_h) as u16;
        Some((col, row))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of the playing screen.
pub fn render_game<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SessionState,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, view, state)?;

    for heart in &state.hearts {
        draw_heart(out, view, state, heart)?;
    }
    for enemy in &state.enemies {
        draw_enemy(out, view, state, enemy)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, view, state, bullet)?;
    }

    draw_player(out, view, state)?;
    draw_controls_hint(out, view)?;

    finish(out, view)
}

pub fn render_menu<W: Write>(
    out: &mut W,
    view: Viewport,
    session: &Session,
    leaderboard: &Leaderboard,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut row = (view.height / 2).saturating_sub(9);
    draw_centered(out, view, row, "★  NEON  INVADERS  ★", C_TITLE)?;
    draw_centered(out, view, row + 1, "═══════════════════════════════════════", C_BORDER)?;
    draw_centered(out, view, row + 3, "[ENTER]  ★ START GAME ★", Color::White)?;

    row += 5;
    let shown = if session.show_all_scores() {
        leaderboard.all()
    } else {
        leaderboard.top(LEADERBOARD_TOP)
    };
    let title = if shown.len() <= LEADERBOARD_TOP {
        "★ TOP 10 SCORES ★".to_string()
    } else {
        format!("★ ALL {} SCORES ★", shown.len())
    };
    draw_centered(out, view, row, &title, Color::Yellow)?;
    row += 1;

    if shown.is_empty() {
        draw_centered(out, view, row, "No scores yet. Be the first!", C_HINT)?;
        row += 1;
    }
    // Keep the footer visible when "view all" overflows the terminal.
    let max_rows = view.height.saturating_sub(row + 4) as usize;
    for (rank, entry) in shown.iter().enumerate().take(max_rows) {
        let line = format!(
            "#{:<3} {:<20} {:>10}",
            rank + 1,
            entry.name,
            group_thousands(entry.score)
        );
        let color = match rank {
            0 => Color::Yellow,
            1 => Color::White,
            2 => Color::DarkYellow,
            _ => Color::Grey,
        };
        draw_centered(out, view, row, &line, color)?;
        row += 1;
    }

    row += 1;
    if leaderboard.len() > LEADERBOARD_TOP {
        let toggle = if session.show_all_scores() {
            "[V] ▲ SHOW TOP 10".to_string()
        } else {
            format!("[V] ▼ VIEW ALL {} SCORES", leaderboard.len())
        };
        draw_centered(out, view, row, &toggle, Color::White)?;
        row += 1;
    }
    if let Some(last) = session.last_player() {
        let line = format!("Last player: {} - Score: {}", last.name, last.score);
        draw_centered(out, view, row, &line, C_HINT)?;
    }

    let footer = "ENTER : Start   V : Scores   Q : Quit";
    draw_centered(out, view, view.height.saturating_sub(1), footer, C_HINT)?;
    finish(out, view)
}

pub fn render_difficulty<W: Write>(
    out: &mut W,
    view: Viewport,
    session: &Session,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let top = (view.height / 2).saturating_sub(5);
    draw_centered(out, view, top, "CHOOSE YOUR DIFFICULTY", C_TITLE)?;
    draw_centered(out, view, top + 1, "═════════════════════════", C_BORDER)?;

    for (i, difficulty) in Difficulty::all().enumerate() {
        let marker = if difficulty == session.difficulty() { "▶" } else { " " };
        let line = format!(
            "{marker} [{}] {:<5} {:<10}",
            difficulty.level(),
            "*".repeat(difficulty.level() as usize),
            difficulty.label()
        );
        draw_centered(out, view, top + 3 + i as u16, &line, difficulty_color(difficulty))?;
    }

    draw_centered(out, view, top + 9, "[ESC]  BACK TO MENU", C_HINT)?;
    finish(out, view)
}

pub fn render_game_over<W: Write>(
    out: &mut W,
    view: Viewport,
    session: &Session,
    message: Option<&str>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let top = (view.height / 2).saturating_sub(4);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
    ];
    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, view, top + i as u16, msg, *color)?;
    }

    let score_line = format!("Final Score: {}", group_thousands(session.final_score()));
    draw_centered(out, view, top + 4, &score_line, Color::Yellow)?;

    let name_line = format!("Name: {:<20}_", session.name_input());
    draw_centered(out, view, top + 6, &name_line, Color::White)?;

    if let Some(message) = message {
        draw_centered(out, view, top + 7, message, Color::Red)?;
    }

    draw_centered(out, view, top + 9, "ENTER : Submit score   ESC : Main menu", C_HINT)?;
    finish(out, view)
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, state: &SessionState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("SCORE: {:>8}", group_thousands(state.score))))?;

    let level = format!("[ {} ]", state.difficulty.label());
    let lx = (view.width / 2).saturating_sub(level.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(difficulty_color(state.difficulty)))?;
    out.queue(Print(&level))?;

    let lives_text = format!("LIVES: {}", "♥".repeat(state.lives as usize));
    let rx = view
        .width
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: Viewport, state: &SessionState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols), anchored on the player's top-centre:
    //   ▲
    //  /█\
    let p = &state.player;
    let Some((col, row)) = view.cell(state, p.x + p.width / 2.0, p.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < view.height.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
        out.queue(Print("/█\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SessionState,
    enemy: &Enemy,
) -> std::io::Result<()> {
    // Still entirely above the top edge.
    if enemy.y + enemy.height <= 0.0 {
        return Ok(());
    }
    let Some((col, row)) = view.cell(state, enemy.x + enemy.width / 2.0, enemy.y.max(0.0)) else {
        return Ok(());
    };
    let play_bottom = view.height.saturating_sub(2);

    if enemy.is_boss {
        //   ╔═▼═╗
        //   ╚═══╝
        //   HP 5
        let lx = col.saturating_sub(2).max(1);
        out.queue(style::SetForegroundColor(C_BOSS))?;
        out.queue(cursor::MoveTo(lx, row))?;
        out.queue(Print("╔═▼═╗"))?;
        if row + 1 < play_bottom {
            out.queue(cursor::MoveTo(lx, row + 1))?;
            out.queue(Print("╚═══╝"))?;
        }
        if row + 2 < play_bottom {
            out.queue(style::SetForegroundColor(C_BOSS_HEALTH))?;
            out.queue(cursor::MoveTo(lx, row + 2))?;
            out.queue(Print(format!("HP {}", enemy.health.unwrap_or(0))))?;
        }
    } else {
        out.queue(style::SetForegroundColor(C_ENEMY))?;
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
        out.queue(Print("«▼»"))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SessionState,
    bullet: &Bullet,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(state, bullet.x + bullet.width / 2.0, bullet.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

fn draw_heart<W: Write>(
    out: &mut W,
    view: Viewport,
    state: &SessionState,
    heart: &Heart,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(state, heart.x + heart.width / 2.0, heart.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_HEART))?;
        out.queue(Print("♥"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↓ / S : Double enemy speed   SPACE : Shoot   ESC : Quit",
    ))?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Park the cursor in a harmless spot and flush.
fn finish<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty.level() {
        1 => Color::Green,
        2 => Color::Cyan,
        3 => Color::Yellow,
        4 => Color::DarkYellow,
        _ => Color::Red,
    }
}

/// `12345` → `"12,345"`.
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::group_thousands;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
