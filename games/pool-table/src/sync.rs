//! Bindings to the animation layer and the per-frame position sync.

use glam::Vec2;
use pool_engine::{AnimationSurface, BoolInput, EngineContext, NumberInput, TriggerInput};

use crate::balls::{BallId, ALL_BALLS};
use crate::mapper;
use crate::phase::PhaseEffect;
use crate::world::PoolWorld;

pub const CUE_STICK_MACHINE: &str = "CueStick";
pub const MODAL_MACHINE: &str = "8BallModal";

/// Every handle the game uses on the animation layer, resolved once.
/// Absent handles disable the feature that depends on them.
#[derive(Debug, Clone, Default)]
pub struct AnimationBindings {
    balls: [Option<(NumberInput, NumberInput)>; 16],
    cue_hover: Option<BoolInput>,
    cue_visibility: Option<TriggerInput>,
    modal_visible: Option<BoolInput>,
    continue_hover: Option<BoolInput>,
    restart_hover: Option<BoolInput>,
}

impl AnimationBindings {
    pub fn resolve(surface: &mut dyn AnimationSurface) -> Self {
        let mut bindings = Self::default();
        let mut missing = Vec::new();
        for ball in ALL_BALLS {
            let x = surface.resolve_number(&ball.x_channel());
            let y = surface.resolve_number(&ball.y_channel());
            match (x, y) {
                (Some(x), Some(y)) => bindings.balls[ball.index()] = Some((x, y)),
                _ => missing.push(ball.channel_prefix()),
            }
        }
        if !missing.is_empty() {
            log::warn!("No X/Y channels for {}; those balls will not be synced", missing.join(", "));
        }

        bindings.cue_hover = surface.resolve_bool(CUE_STICK_MACHINE, "CueHover");
        bindings.cue_visibility = surface.resolve_trigger(CUE_STICK_MACHINE, "CueStickVisibility");
        bindings.modal_visible = surface.resolve_bool(MODAL_MACHINE, "8BallModalVisible");
        bindings.continue_hover = surface.resolve_bool(MODAL_MACHINE, "ContinueHover");
        bindings.restart_hover = surface.resolve_bool(MODAL_MACHINE, "RestartHover");

        log::info!("Animation bindings resolved: {}/16 balls", bindings.bound_count());
        bindings
    }

    pub fn channels(&self, ball: BallId) -> Option<(NumberInput, NumberInput)> {
        self.balls[ball.index()]
    }

    pub fn bound_count(&self) -> usize {
        self.balls.iter().filter(|b| b.is_some()).count()
    }

    /// Logical-space start position of every bound ball, as authored in the
    /// animation asset.
    pub fn start_positions(&self, surface: &dyn AnimationSurface) -> [Option<Vec2>; 16] {
        let mut out = [None; 16];
        for (slot, channels) in out.iter_mut().zip(self.balls.iter()) {
            *slot = channels.and_then(|(x, y)| Some(Vec2::new(surface.number(x)?, surface.number(y)?)));
        }
        out
    }

    /// Write a signal effect to the animation layer. Effects that are not
    /// animation signals are ignored.
    pub fn signal(&self, surface: &mut dyn AnimationSurface, effect: PhaseEffect) {
        match effect {
            PhaseEffect::ShowCueStick => {
                if let Some(t) = self.cue_visibility {
                    surface.fire(t);
                }
            }
            PhaseEffect::CueHover(on) => set(surface, self.cue_hover, on),
            PhaseEffect::ModalVisible(on) => {
                if on && self.modal_visible.is_none() {
                    log::warn!("Modal visibility input missing on {}", MODAL_MACHINE);
                }
                set(surface, self.modal_visible, on);
            }
            PhaseEffect::ContinueHover(on) => set(surface, self.continue_hover, on),
            PhaseEffect::RestartHover(on) => set(surface, self.restart_hover, on),
            PhaseEffect::StopCue | PhaseEffect::Shoot(_) | PhaseEffect::ResetGame => {}
        }
    }
}

fn set(surface: &mut dyn AnimationSurface, input: Option<BoolInput>, value: bool) {
    if let Some(input) = input {
        surface.set_bool(input, value);
    }
}

/// Push every bound ball's physics position into its X/Y channels, mapped to
/// logical space with the live canvas size. Skipped while the surface is not
/// ready or the canvas has no size.
pub fn sync_positions(ctx: &mut EngineContext, world: &PoolWorld, bindings: &AnimationBindings) {
    let canvas = ctx.canvas;
    if !ctx.surface.is_ready() || !canvas.is_sized() {
        return;
    }
    for (ball, id) in world.balls() {
        let Some((x, y)) = bindings.channels(ball) else {
            continue;
        };
        let Some(pos) = ctx.position(id) else {
            continue;
        };
        let logical = mapper::to_logical(pos, canvas);
        ctx.surface.set_number(x, logical.x);
        ctx.surface.set_number(y, logical.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use pool_engine::MemorySurface;

    fn full_surface() -> MemorySurface {
        let mut s = MemorySurface::new();
        for ball in ALL_BALLS {
            let x = -300.0 + ball.index() as f32 * 10.0;
            s = s.with_number(&ball.x_channel(), x).with_number(&ball.y_channel(), -20.0);
        }
        s.with_bool(CUE_STICK_MACHINE, "CueHover")
            .with_trigger(CUE_STICK_MACHINE, "CueStickVisibility")
            .with_bool(MODAL_MACHINE, "8BallModalVisible")
            .with_bool(MODAL_MACHINE, "ContinueHover")
            .with_bool(MODAL_MACHINE, "RestartHover")
    }

    #[test]
    fn resolves_every_channel() {
        let mut s = full_surface();
        let b = AnimationBindings::resolve(&mut s);
        assert_eq!(b.bound_count(), 16);
        assert!(b.cue_hover.is_some());
        assert!(b.cue_visibility.is_some());
        assert!(b.modal_visible.is_some());

        let starts = b.start_positions(&s);
        assert_eq!(starts[0], Some(Vec2::new(-300.0, -20.0)));
        assert_eq!(starts[15], Some(Vec2::new(-150.0, -20.0)));
    }

    #[test]
    fn missing_channels_degrade_per_ball() {
        let mut s = MemorySurface::new()
            .with_number("CueBallX", 1.0)
            .with_number("CueBallY", 2.0)
            .with_number("8BallX", 3.0);
        let b = AnimationBindings::resolve(&mut s);
        assert_eq!(b.bound_count(), 1);
        assert!(b.channels(BallId::Rank(8)).is_none());
        let starts = b.start_positions(&s);
        assert_eq!(starts[0], Some(Vec2::new(1.0, 2.0)));
        assert!(starts[8].is_none());
    }

    #[test]
    fn signals_reach_their_inputs() {
        let mut s = full_surface();
        let b = AnimationBindings::resolve(&mut s);
        b.signal(&mut s, PhaseEffect::ShowCueStick);
        b.signal(&mut s, PhaseEffect::CueHover(true));
        b.signal(&mut s, PhaseEffect::ModalVisible(true));
        b.signal(&mut s, PhaseEffect::RestartHover(true));

        assert_eq!(s.fire_count(CUE_STICK_MACHINE, "CueStickVisibility"), 1);
        assert_eq!(s.bool_value(CUE_STICK_MACHINE, "CueHover"), Some(true));
        assert_eq!(s.bool_value(MODAL_MACHINE, "8BallModalVisible"), Some(true));
        assert_eq!(s.bool_value(MODAL_MACHINE, "RestartHover"), Some(true));
        assert_eq!(s.bool_value(MODAL_MACHINE, "ContinueHover"), Some(false));
    }

    #[test]
    fn sync_writes_logical_positions() {
        let mut s = full_surface();
        let bindings = AnimationBindings::resolve(&mut s);
        let starts = bindings.start_positions(&s);

        let mut ctx = EngineContext::new();
        ctx.set_canvas(640.0, 416.0);
        ctx.set_surface(Box::new(s));
        let world = PoolWorld::build(&mut ctx, &TableConfig::default(), &starts);

        let cue = world.entity(BallId::Cue).unwrap();
        ctx.set_position(cue, Vec2::new(50.0, -25.0));
        sync_positions(&mut ctx, &world, &bindings);

        let cue_x = bindings.channels(BallId::Cue).unwrap().0;
        let x = ctx.surface.number(cue_x).unwrap();
        assert!((x - 100.0).abs() < 1e-3);
    }

    #[test]
    fn sync_writes_only_bound_balls() {
        let mut s = MemorySurface::new()
            .with_number("CueBallX", 1.0)
            .with_number("CueBallY", 2.0)
            .with_number("8BallX", 3.0);
        let bindings = AnimationBindings::resolve(&mut s);
        let starts = bindings.start_positions(&s);
        let eight_x = s.resolve_number("8BallX").unwrap();

        let mut ctx = EngineContext::new();
        ctx.set_canvas(640.0, 416.0);
        ctx.set_surface(Box::new(s));
        let world = PoolWorld::build(&mut ctx, &TableConfig::default(), &starts);

        let cue = world.entity(BallId::Cue).unwrap();
        let eight = world.entity(BallId::Rank(8)).unwrap();
        ctx.set_position(cue, Vec2::new(50.0, -25.0));
        ctx.set_position(eight, Vec2::new(-20.0, 10.0));
        sync_positions(&mut ctx, &world, &bindings);

        let (cue_x, cue_y) = bindings.channels(BallId::Cue).unwrap();
        assert!((ctx.surface.number(cue_x).unwrap() - 100.0).abs() < 1e-3);
        assert!((ctx.surface.number(cue_y).unwrap() + 50.0).abs() < 1e-3);
        assert_eq!(ctx.surface.number(eight_x), Some(3.0));
    }

    #[test]
    fn sync_skips_when_not_ready_or_unsized() {
        let mut s = full_surface();
        let bindings = AnimationBindings::resolve(&mut s);
        s.set_ready(false);

        let mut ctx = EngineContext::new();
        ctx.set_canvas(1280.0, 832.0);
        let world = PoolWorld::build(&mut ctx, &TableConfig::default(), &[None; 16]);
        let cue_x = bindings.channels(BallId::Cue).unwrap().0;

        ctx.set_surface(Box::new(s));
        sync_positions(&mut ctx, &world, &bindings);
        assert_eq!(ctx.surface.number(cue_x), Some(-300.0));

        let mut ready = full_surface();
        AnimationBindings::resolve(&mut ready);
        ctx.set_surface(Box::new(ready));
        ctx.set_canvas(0.0, 0.0);
        sync_positions(&mut ctx, &world, &bindings);
        assert_eq!(ctx.surface.number(cue_x), Some(-300.0));
    }
}
