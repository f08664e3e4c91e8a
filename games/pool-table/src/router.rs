//! Pointer and host-event disambiguation.

use glam::Vec2;
use pool_engine::{CanvasSize, InputEvent};

use crate::config::{Rect, TableConfig};
use crate::mapper;
use crate::phase::GamePhase;

/// Custom event kinds sent by the host page.
pub mod custom_events {
    pub const RERACK: u32 = 1;
    pub const RESTART: u32 = 2;
}

/// What an input event asks the game to do. Pointer points stay in canvas
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    BeginAim(Vec2),
    Release(Vec2),
    Rerack,
    Hover { over_continue: bool, over_restart: bool },
    Continue,
    Restart,
}

pub struct InputRouter {
    grab_radius: f32,
    rerack_button: Rect,
    continue_button: Rect,
    restart_button: Rect,
}

impl InputRouter {
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            grab_radius: config.grab_radius(),
            rerack_button: config.rerack_button,
            continue_button: config.continue_button,
            restart_button: config.restart_button,
        }
    }

    /// Translate one input event into commands.
    ///
    /// `cue` is the cue ball's table-space position, if the table exists.
    /// Pointer-down runs the cue grab test and the rerack hit test
    /// independently; both may fire.
    pub fn route(&self, event: &InputEvent, phase: GamePhase, cue: Option<Vec2>, canvas: CanvasSize) -> Vec<Command> {
        let mut commands = Vec::new();
        match *event {
            InputEvent::PointerDown { x, y } => {
                let p = Vec2::new(x, y);
                if phase == GamePhase::Idle {
                    if let Some(cue) = cue {
                        let cue_px = mapper::table_to_canvas(cue, canvas);
                        if p.distance(cue_px) < self.grab_radius {
                            commands.push(Command::BeginAim(p));
                        }
                    }
                }
                if self.rerack_button.contains(mapper::canvas_to_table(p, canvas)) {
                    commands.push(Command::Rerack);
                }
            }
            InputEvent::PointerUp { x, y } => {
                if matches!(phase, GamePhase::Aiming { .. }) {
                    commands.push(Command::Release(Vec2::new(x, y)));
                }
            }
            InputEvent::PointerMove { x, y } => {
                if phase == GamePhase::ModalOpen {
                    let t = mapper::canvas_to_table(Vec2::new(x, y), canvas);
                    commands.push(Command::Hover {
                        over_continue: self.continue_button.contains(t),
                        over_restart: self.restart_button.contains(t),
                    });
                }
            }
            InputEvent::Click { x, y } => {
                if phase == GamePhase::ModalOpen {
                    let t = mapper::canvas_to_table(Vec2::new(x, y), canvas);
                    if self.continue_button.contains(t) {
                        commands.push(Command::Continue);
                    } else if self.restart_button.contains(t) {
                        commands.push(Command::Restart);
                    }
                }
            }
            InputEvent::Custom { kind, .. } => match kind {
                custom_events::RERACK => commands.push(Command::Rerack),
                custom_events::RESTART => commands.push(Command::Restart),
                _ => {}
            },
        }
        commands
    }
}
