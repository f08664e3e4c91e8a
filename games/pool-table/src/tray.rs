//! Sunk-ball registry and tray placement.
//!
//! Each object ball that drops gets the next slot of a single row:
//! `origin + (sink_index * spacing, 0)`. Slots depend only on sink order, so
//! the same sequence always produces the same coordinates.

use glam::Vec2;
use pool_engine::EngineContext;

use crate::balls::{BallId, ALL_BALLS};
use crate::world::PoolWorld;

pub struct SunkTray {
    /// Sink order; each ball at most once.
    order: Vec<(BallId, Vec2)>,
    origin: Vec2,
    spacing: f32,
}

impl SunkTray {
    pub fn new(origin: Vec2, spacing: f32) -> Self {
        Self {
            order: Vec::with_capacity(15),
            origin,
            spacing,
        }
    }

    /// Register a sink and return its slot. `None` for the cue ball or a
    /// ball that is already in the tray.
    pub fn sink(&mut self, ball: BallId) -> Option<Vec2> {
        if ball.is_cue() || self.is_sunk(ball) {
            return None;
        }
        let slot = self.origin + Vec2::new(self.order.len() as f32 * self.spacing, 0.0);
        self.order.push((ball, slot));
        Some(slot)
    }

    /// Register a sink and freeze the ball's body in its slot.
    pub fn sink_body(&mut self, ctx: &mut EngineContext, world: &PoolWorld, ball: BallId) -> Option<Vec2> {
        let slot = self.sink(ball)?;
        if let Some(id) = world.entity(ball) {
            ctx.set_velocity(id, Vec2::ZERO);
            ctx.stop_spin(id);
            ctx.set_position(id, slot);
            ctx.set_static(id, true);
        }
        Some(slot)
    }

    pub fn is_sunk(&self, ball: BallId) -> bool {
        self.order.iter().any(|(b, _)| *b == ball)
    }

    pub fn slot_of(&self, ball: BallId) -> Option<Vec2> {
        self.order.iter().find(|(b, _)| *b == ball).map(|(_, slot)| *slot)
    }

    /// Sunk balls in sink order.
    pub fn order(&self) -> impl Iterator<Item = BallId> + '_ {
        self.order.iter().map(|(b, _)| *b)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Hold every sunk ball exactly on its slot, motionless.
    pub fn pin_all(&self, ctx: &mut EngineContext, world: &PoolWorld) {
        for (ball, slot) in &self.order {
            if let Some(id) = world.entity(*ball) {
                ctx.set_position(id, *slot);
                ctx.set_velocity(id, Vec2::ZERO);
                ctx.stop_spin(id);
            }
        }
    }

    /// Empty the tray and put every ball back on its construction-time spot,
    /// motionless and dynamic.
    pub fn rerack(&mut self, ctx: &mut EngineContext, world: &PoolWorld) {
        self.order.clear();
        for ball in ALL_BALLS {
            if let Some(id) = world.entity(ball) {
                ctx.set_static(id, false);
                ctx.set_position(id, world.rack_position(ball));
                ctx.set_velocity(id, Vec2::ZERO);
                ctx.reset_rotation(id);
            }
        }
        log::info!("Reracked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::mapper;

    fn tray() -> SunkTray {
        let cfg = TableConfig::default();
        SunkTray::new(cfg.tray_origin(), cfg.tray_spacing)
    }

    fn table() -> (EngineContext, PoolWorld) {
        let mut ctx = EngineContext::new();
        ctx.set_canvas(mapper::LOGICAL_W, mapper::LOGICAL_H);
        let world = PoolWorld::build(&mut ctx, &TableConfig::default(), &[None; 16]);
        (ctx, world)
    }

    #[test]
    fn slots_follow_sink_order() {
        let mut t = tray();
        assert_eq!(t.sink(BallId::Rank(3)), Some(Vec2::new(-500.0, 275.0)));
        assert_eq!(t.sink(BallId::Rank(11)), Some(Vec2::new(-450.0, 275.0)));
        assert_eq!(t.sink(BallId::Rank(1)), Some(Vec2::new(-400.0, 275.0)));
        let order: Vec<_> = t.order().collect();
        assert_eq!(order, vec![BallId::Rank(3), BallId::Rank(11), BallId::Rank(1)]);
    }

    #[test]
    fn duplicates_and_cue_are_rejected() {
        let mut t = tray();
        assert!(t.sink(BallId::Cue).is_none());
        assert!(t.sink(BallId::Rank(5)).is_some());
        assert!(t.sink(BallId::Rank(5)).is_none());
        assert!(t.sink(BallId::Cue).is_none());
        assert_eq!(t.len(), 1);
        assert!(!t.is_sunk(BallId::Cue));
    }

    #[test]
    fn same_order_same_slots_across_runs() {
        let sequence = [7u8, 2, 15, 8, 4];
        let run = || {
            let mut t = tray();
            sequence
                .iter()
                .map(|&n| t.sink(BallId::Rank(n)).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn registry_never_shrinks_or_duplicates() {
        // Deterministic pseudo-random stream of pocket entries, cue included.
        let mut t = tray();
        let mut seed: u32 = 12345;
        let mut last_len = 0;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let ball = ALL_BALLS[(seed >> 16) as usize % 16];
            t.sink(ball);
            assert!(t.len() >= last_len);
            last_len = t.len();
            let order: Vec<_> = t.order().collect();
            for (i, a) in order.iter().enumerate() {
                assert!(!a.is_cue());
                assert!(!order[i + 1..].contains(a));
            }
        }
        assert_eq!(t.len(), 15);
    }

    #[test]
    fn sink_body_freezes_ball_in_slot() {
        let (mut ctx, world) = table();
        let mut t = tray();
        let id = world.entity(BallId::Rank(4)).unwrap();
        ctx.set_velocity(id, Vec2::new(300.0, -40.0));

        let slot = t.sink_body(&mut ctx, &world, BallId::Rank(4)).unwrap();
        assert_eq!(ctx.position(id), Some(slot));
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
        assert!(ctx.is_static(id));
    }

    #[test]
    fn pin_all_holds_sunk_balls() {
        let (mut ctx, world) = table();
        let mut t = tray();
        t.sink_body(&mut ctx, &world, BallId::Rank(9));
        let id = world.entity(BallId::Rank(9)).unwrap();

        for _ in 0..30 {
            ctx.step_physics();
            t.pin_all(&mut ctx, &world);
        }
        assert_eq!(ctx.position(id), t.slot_of(BallId::Rank(9)));
        assert_eq!(ctx.velocity(id), Vec2::ZERO);
    }

    #[test]
    fn rerack_twice_equals_once() {
        let (mut ctx, world) = table();
        let mut t = tray();
        for n in [1u8, 2, 3] {
            t.sink_body(&mut ctx, &world, BallId::Rank(n));
        }
        let cue = world.entity(BallId::Cue).unwrap();
        ctx.set_velocity(cue, Vec2::new(500.0, 0.0));
        for _ in 0..10 {
            ctx.step_physics();
        }

        t.rerack(&mut ctx, &world);
        let once: Vec<_> = world
            .balls()
            .map(|(_, id)| (ctx.position(id), ctx.velocity(id), ctx.is_static(id)))
            .collect();
        t.rerack(&mut ctx, &world);
        let twice: Vec<_> = world
            .balls()
            .map(|(_, id)| (ctx.position(id), ctx.velocity(id), ctx.is_static(id)))
            .collect();

        assert_eq!(once, twice);
        assert!(t.is_empty());
        for (ball, id) in world.balls() {
            assert_eq!(ctx.position(id), Some(world.rack_position(ball)));
            assert_eq!(ctx.velocity(id), Vec2::ZERO);
            assert!(!ctx.is_static(id));
        }
    }
}
