//! Game phase state machine.
//!
//! Transitions never touch the engine directly; each returns the effects the
//! caller must apply (animation signals, impulses, a full reset).

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    Idle,
    /// Cue ball grabbed; `start` is the pointer position of the grab.
    Aiming { start: Vec2 },
    /// End-of-rack choice pending.
    ModalOpen,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEffect {
    /// Zero the cue ball's velocity.
    StopCue,
    /// Fire the cue-stick visibility trigger.
    ShowCueStick,
    CueHover(bool),
    /// Impulse for the cue ball.
    Shoot(Vec2),
    ModalVisible(bool),
    ContinueHover(bool),
    RestartHover(bool),
    /// Tear down and rebuild the whole table.
    ResetGame,
}

pub struct PhaseMachine {
    phase: GamePhase,
    shot_scale: f32,
}

impl PhaseMachine {
    pub fn new(shot_scale: f32) -> Self {
        Self {
            phase: GamePhase::Idle,
            shot_scale,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn set_shot_scale(&mut self, shot_scale: f32) {
        self.shot_scale = shot_scale;
    }

    /// `Idle → Aiming`. Ignored in any other phase.
    pub fn begin_aim(&mut self, point: Vec2) -> Vec<PhaseEffect> {
        if self.phase != GamePhase::Idle {
            return Vec::new();
        }
        self.phase = GamePhase::Aiming { start: point };
        vec![
            PhaseEffect::StopCue,
            PhaseEffect::ShowCueStick,
            PhaseEffect::CueHover(true),
        ]
    }

    /// `Aiming → Idle`, shooting the cue ball away from the release point.
    /// A no-op when no aim is in progress.
    pub fn release(&mut self, point: Vec2) -> Vec<PhaseEffect> {
        let GamePhase::Aiming { start } = self.phase else {
            return Vec::new();
        };
        self.phase = GamePhase::Idle;
        let impulse = (start - point) * self.shot_scale;
        log::debug!("Shot from {:?} to {:?}, impulse {:?}", start, point, impulse);
        vec![PhaseEffect::CueHover(false), PhaseEffect::Shoot(impulse)]
    }

    /// Enter `ModalOpen` after the terminal ball drops. An aim in progress is
    /// abandoned. Already open: nothing happens.
    pub fn open_modal(&mut self) -> Vec<PhaseEffect> {
        let effects = match self.phase {
            GamePhase::ModalOpen => return Vec::new(),
            GamePhase::Aiming { .. } => vec![PhaseEffect::CueHover(false), PhaseEffect::ModalVisible(true)],
            GamePhase::Idle => vec![PhaseEffect::ModalVisible(true)],
        };
        self.phase = GamePhase::ModalOpen;
        effects
    }

    /// Hover feedback over the modal buttons. Only meaningful while open.
    pub fn hover(&mut self, over_continue: bool, over_restart: bool) -> Vec<PhaseEffect> {
        if self.phase != GamePhase::ModalOpen {
            return Vec::new();
        }
        vec![
            PhaseEffect::ContinueHover(over_continue),
            PhaseEffect::RestartHover(over_restart),
        ]
    }

    /// `ModalOpen → Idle` keeping the table as it is.
    pub fn continue_play(&mut self) -> Vec<PhaseEffect> {
        if self.phase != GamePhase::ModalOpen {
            return Vec::new();
        }
        self.phase = GamePhase::Idle;
        Self::close_modal()
    }

    /// Back to `Idle` from any phase with every signal cleared and a full
    /// reset requested.
    pub fn restart(&mut self) -> Vec<PhaseEffect> {
        self.phase = GamePhase::Idle;
        let mut effects = Self::close_modal();
        effects.push(PhaseEffect::CueHover(false));
        effects.push(PhaseEffect::ResetGame);
        effects
    }

    fn close_modal() -> Vec<PhaseEffect> {
        vec![
            PhaseEffect::ModalVisible(false),
            PhaseEffect::ContinueHover(false),
            PhaseEffect::RestartHover(false),
        ]
    }
}
