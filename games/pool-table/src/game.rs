//! Pool table game: Rapier2D physics driving a Rive-authored table.
//!
//! The world is built lazily, on the first frame where the animation layer is
//! ready and the canvas has a size, because ball start positions come from the
//! animation asset. Until then every hook is a no-op.

use glam::Vec2;
use pool_engine::{EngineContext, Game, GameConfig, GameEvent, InputQueue};

use crate::balls::BallId;
use crate::config::TableConfig;
use crate::phase::{GamePhase, PhaseEffect, PhaseMachine};
use crate::resolver::{resolve, ResolveEvent};
use crate::router::{Command, InputRouter};
use crate::sync::{sync_positions, AnimationBindings};
use crate::tray::SunkTray;
use crate::world::PoolWorld;

/// Game event kinds to the host page.
pub mod game_events {
    /// a = rank, b/c = tray slot.
    pub const BALL_SUNK: f32 = 1.0;
    pub const CUE_SCRATCHED: f32 = 2.0;
    pub const MODAL_OPENED: f32 = 3.0;
    /// a/b = impulse.
    pub const SHOT: f32 = 4.0;
    pub const RERACKED: f32 = 5.0;
    pub const RESTARTED: f32 = 6.0;
    /// a = object balls still on the table. Emitted every frame.
    pub const BALLS_REMAINING: f32 = 7.0;
}

pub struct PoolGame {
    config: TableConfig,
    phase: PhaseMachine,
    router: InputRouter,
    tray: SunkTray,
    bindings: Option<AnimationBindings>,
    world: Option<PoolWorld>,
}

impl PoolGame {
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self {
            phase: PhaseMachine::new(config.shot_scale),
            router: InputRouter::from_config(&config),
            tray: SunkTray::new(config.tray_origin(), config.tray_spacing),
            bindings: None,
            world: None,
            config,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    pub fn tray(&self) -> &SunkTray {
        &self.tray
    }

    pub fn world(&self) -> Option<&PoolWorld> {
        self.world.as_ref()
    }

    /// Resolve bindings once the surface is ready, then build the world once
    /// the canvas is sized too.
    fn ensure_world(&mut self, ctx: &mut EngineContext) {
        if self.world.is_some() || !ctx.surface.is_ready() {
            return;
        }
        if self.bindings.is_none() {
            self.bindings = Some(AnimationBindings::resolve(ctx.surface.as_mut()));
        }
        if !ctx.canvas.is_sized() {
            return;
        }
        let start = match &self.bindings {
            Some(bindings) => bindings.start_positions(ctx.surface.as_ref()),
            None => [None; 16],
        };
        self.world = Some(PoolWorld::build(ctx, &self.config, &start));
    }

    fn cue_position(&self, ctx: &EngineContext) -> Option<Vec2> {
        self.world.as_ref()?.position(ctx, BallId::Cue)
    }

    fn execute(&mut self, ctx: &mut EngineContext, command: Command) {
        let effects = match command {
            Command::BeginAim(p) => self.phase.begin_aim(p),
            Command::Release(p) => self.phase.release(p),
            Command::Hover {
                over_continue,
                over_restart,
            } => self.phase.hover(over_continue, over_restart),
            Command::Continue => self.phase.continue_play(),
            Command::Restart => self.phase.restart(),
            Command::Rerack => {
                self.rerack(ctx);
                Vec::new()
            }
        };
        self.apply(ctx, &effects);
    }

    fn apply(&mut self, ctx: &mut EngineContext, effects: &[PhaseEffect]) {
        for &effect in effects {
            match effect {
                PhaseEffect::StopCue => {
                    if let Some(id) = self.world.as_ref().and_then(|w| w.entity(BallId::Cue)) {
                        ctx.set_velocity(id, Vec2::ZERO);
                    }
                }
                PhaseEffect::Shoot(impulse) => {
                    if let Some(id) = self.world.as_ref().and_then(|w| w.entity(BallId::Cue)) {
                        ctx.apply_impulse(id, impulse);
                        ctx.emit_event(GameEvent::new(game_events::SHOT, impulse.x, impulse.y, 0.0));
                    }
                }
                PhaseEffect::ResetGame => self.rebuild(ctx),
                signal => {
                    if let Some(bindings) = &self.bindings {
                        bindings.signal(ctx.surface.as_mut(), signal);
                    }
                }
            }
        }
    }

    fn rerack(&mut self, ctx: &mut EngineContext) {
        if let Some(world) = &self.world {
            self.tray.rerack(ctx, world);
            ctx.emit_event(GameEvent::new(game_events::RERACKED, 0.0, 0.0, 0.0));
        }
    }

    /// Tear every body down and rebuild the table from the construction-time
    /// rack. Unlike rerack this also picks up the current settings.
    fn rebuild(&mut self, ctx: &mut EngineContext) {
        let Some(mut world) = self.world.take() else {
            return;
        };
        let rack = *world.rack();
        world.teardown(ctx);
        self.world = Some(PoolWorld::from_rack(ctx, &self.config, rack));
        self.tray = SunkTray::new(self.config.tray_origin(), self.config.tray_spacing);
        ctx.emit_event(GameEvent::new(game_events::RESTARTED, 0.0, 0.0, 0.0));
        log::info!("Game restarted");
    }

    fn balls_remaining(&self) -> usize {
        15 - self.tray.len()
    }
}

impl Default for PoolGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PoolGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            gravity: Vec2::ZERO, // top-down table
            ..GameConfig::default()
        }
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("Pool table waiting for animation layer");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.ensure_world(ctx);
        if self.world.is_none() {
            return;
        }

        for event in input.iter() {
            let cue = self.cue_position(ctx);
            let commands = self.router.route(event, self.phase.phase(), cue, ctx.canvas);
            for command in commands {
                self.execute(ctx, command);
            }
        }
    }

    fn post_step(&mut self, ctx: &mut EngineContext) {
        let Some(world) = &self.world else {
            return;
        };
        let terminal = BallId::Rank(self.config.terminal_rank);
        let events = resolve(ctx, world, &mut self.tray, world.geometry(), terminal);
        self.tray.pin_all(ctx, world);

        for event in events {
            match event {
                ResolveEvent::Sunk { ball, slot } => {
                    ctx.emit_event(GameEvent::new(game_events::BALL_SUNK, ball.rank() as f32, slot.x, slot.y));
                }
                ResolveEvent::CueScratched => {
                    ctx.emit_event(GameEvent::new(game_events::CUE_SCRATCHED, 0.0, 0.0, 0.0));
                }
                ResolveEvent::LastBallSunk => {
                    let effects = self.phase.open_modal();
                    if !effects.is_empty() {
                        ctx.emit_event(GameEvent::new(game_events::MODAL_OPENED, 0.0, 0.0, 0.0));
                    }
                    self.apply(ctx, &effects);
                }
            }
        }

        ctx.emit_event(GameEvent::new(
            game_events::BALLS_REMAINING,
            self.balls_remaining() as f32,
            0.0,
            0.0,
        ));
    }

    fn present(&mut self, ctx: &mut EngineContext) {
        if let (Some(world), Some(bindings)) = (&self.world, &self.bindings) {
            sync_positions(ctx, world, bindings);
        }
    }

    fn load_settings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let config = TableConfig::from_json(json)?;
        self.phase.set_shot_scale(config.shot_scale);
        self.router = InputRouter::from_config(&config);
        if self.tray.is_empty() {
            self.tray = SunkTray::new(config.tray_origin(), config.tray_spacing);
        }
        self.config = config;
        log::info!("Table settings loaded");
        Ok(())
    }
}
