//! Input surface: crossterm events in, game actions out.
//!
//! Mouse motion drives the pointer, the left button fires, the right button
//! holds a context menu open (pausing play) and terminal focus stands in for
//! the pointer entering or leaving the play surface.  The keyboard is a
//! fallback for terminals that do not report mouse motion.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::compute::SimulationLoop;
use crate::display::{CELL_H, CELL_W};
use crate::entities::{Arena, Pointer};
use crate::render::{Canvas, Rgba, Sound};

/// Pointer distance covered by one arrow-key press.
pub const NUDGE: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    MovePointer { x: f64, y: f64 },
    Nudge { dx: f64, dy: f64 },
    Fire,
    Bonus,
    OpenMenu,
    CloseMenu,
    Leave,
    Enter,
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Map one terminal event to an action, if it means anything to the game.
pub fn translate(event: &Event) -> Option<Action> {
    match event {
        Event::Mouse(MouseEvent { kind, column, row, .. }) => {
            let (x, y) = (*column as f64 * CELL_W, *row as f64 * CELL_H);
            match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    Some(Action::MovePointer { x, y })
                }
                MouseEventKind::Down(MouseButton::Left) => Some(Action::Fire),
                MouseEventKind::Down(MouseButton::Middle) => Some(Action::Bonus),
                MouseEventKind::Down(MouseButton::Right) => Some(Action::OpenMenu),
                MouseEventKind::Up(MouseButton::Right) => Some(Action::CloseMenu),
                _ => None,
            }
        }
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            if *kind == KeyEventKind::Release {
                return None;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Action::Quit)
                }
                KeyCode::Char(' ') => Some(Action::Fire),
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    Some(Action::Nudge { dx: -NUDGE, dy: 0.0 })
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    Some(Action::Nudge { dx: NUDGE, dy: 0.0 })
                }
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                    Some(Action::Nudge { dx: 0.0, dy: -NUDGE })
                }
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                    Some(Action::Nudge { dx: 0.0, dy: NUDGE })
                }
                _ => None,
            }
        }
        Event::FocusLost => Some(Action::Leave),
        Event::FocusGained => Some(Action::Enter),
        Event::Resize(cols, rows) => Some(Action::Resize { cols: *cols, rows: *rows }),
        _ => None,
    }
}

// ── Overlays ─────────────────────────────────────────────────────────────────

pub const MENU_ITEMS: [&str; 3] = ["Settings", "Upgrade", "Leaderboard"];

/// Context menu and pause banner drawn above the game.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    pub menu: Option<Pointer>,
    pub paused_banner: bool,
    /// Set when the overlay changed and a paused frame needs redrawing.
    pub dirty: bool,
}

impl Overlay {
    pub fn open_menu(&mut self, at: Pointer) {
        self.menu = Some(at);
        self.dirty = true;
    }

    pub fn hide_menu(&mut self) {
        if self.menu.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas, arena: &Arena) {
        if let Some(at) = self.menu {
            let x = (at.x + 40.0).min(arena.width - 140.0).max(0.0);
            let y = (at.y - 60.0).max(0.0);
            for (i, item) in MENU_ITEMS.iter().enumerate() {
                let label = format!(" {item:<12}");
                canvas.draw_text(x, y + i as f64 * CELL_H, &label, Rgba::WHITE);
            }
        }
        if self.paused_banner {
            let text = "PAUSED";
            let x = arena.width / 2.0 - text.len() as f64 * CELL_W / 2.0;
            canvas.draw_text(x, arena.height / 2.0, text, Rgba::WHITE);
        }
    }
}

/// What the host loop should do after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one action.  Resizes are left to the host, which owns the surface.
pub fn apply(
    action: Action,
    sim: &mut SimulationLoop,
    overlay: &mut Overlay,
    sound: &mut dyn Sound,
    cheats: bool,
) -> Flow {
    match action {
        Action::MovePointer { x, y } => sim.state.move_pointer(x, y),
        Action::Nudge { dx, dy } => sim.state.nudge_pointer(dx, dy),
        Action::Fire => {
            if !sim.is_paused() {
                sim.state.fire(sound);
            }
        }
        Action::Bonus => {
            if cheats && !sim.is_paused() {
                sim.state.grant_bonus();
            }
        }
        Action::OpenMenu => {
            sim.pause();
            overlay.open_menu(sim.state.pointer);
        }
        Action::CloseMenu => {
            overlay.hide_menu();
            if !overlay.paused_banner {
                sim.resume();
            }
        }
        Action::Leave => {
            overlay.hide_menu();
            overlay.paused_banner = true;
            overlay.dirty = true;
            sim.pause();
        }
        Action::Enter => {
            overlay.paused_banner = false;
            overlay.dirty = true;
            sim.resume();
        }
        Action::Resize { .. } => {}
        Action::Quit => return Flow::Quit,
    }
    Flow::Continue
}
