//! Post-step pocket detection and boundary clamping.

use glam::Vec2;
use pool_engine::EngineContext;

use crate::balls::BallId;
use crate::table::TableGeometry;
use crate::tray::SunkTray;
use crate::world::PoolWorld;

/// Outcome of one resolver pass, in ball order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolveEvent {
    /// The cue ball entered a pocket and was put back on the table.
    CueScratched,
    /// An object ball entered a pocket and now rests in its tray slot.
    Sunk { ball: BallId, slot: Vec2 },
    /// The terminal ball was sunk; follows its `Sunk` event.
    LastBallSunk,
}

/// Test every live ball against the pockets, then against the bounds.
///
/// A pocketed cue ball is recentered with zero velocity. A pocketed object
/// ball goes to the tray and is frozen there. Balls already in the tray are
/// skipped entirely.
pub fn resolve(
    ctx: &mut EngineContext,
    world: &PoolWorld,
    tray: &mut SunkTray,
    geometry: &TableGeometry,
    terminal: BallId,
) -> Vec<ResolveEvent> {
    let mut events = Vec::new();

    for (ball, id) in world.balls() {
        if tray.is_sunk(ball) {
            continue;
        }
        let Some(pos) = ctx.position(id) else {
            continue;
        };

        if geometry.pocket_hit(pos).is_some() {
            if ball.is_cue() {
                ctx.set_position(id, geometry.center());
                ctx.set_velocity(id, Vec2::ZERO);
                ctx.stop_spin(id);
                log::debug!("Cue ball scratched at ({:.1}, {:.1})", pos.x, pos.y);
                events.push(ResolveEvent::CueScratched);
            } else if let Some(slot) = tray.sink_body(ctx, world, ball) {
                log::info!("{:?} sunk into slot ({}, {})", ball, slot.x, slot.y);
                events.push(ResolveEvent::Sunk { ball, slot });
                if ball == terminal {
                    events.push(ResolveEvent::LastBallSunk);
                }
            }
            continue;
        }

        let vel = ctx.velocity(id);
        let clamped = geometry.clamp_velocity(pos, vel);
        if clamped != vel {
            ctx.set_velocity(id, clamped);
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::mapper;

    struct Fixture {
        ctx: EngineContext,
        world: PoolWorld,
        tray: SunkTray,
        geometry: TableGeometry,
    }

    fn fixture() -> Fixture {
        let config = TableConfig::default();
        let mut ctx = EngineContext::new();
        ctx.set_canvas(mapper::LOGICAL_W, mapper::LOGICAL_H);
        let world = PoolWorld::build(&mut ctx, &config, &[None; 16]);
        let geometry = world.geometry().clone();
        Fixture {
            ctx,
            world,
            tray: SunkTray::new(config.tray_origin(), config.tray_spacing),
            geometry,
        }
    }

    impl Fixture {
        fn run(&mut self) -> Vec<ResolveEvent> {
            resolve(&mut self.ctx, &self.world, &mut self.tray, &self.geometry, BallId::Rank(8))
        }

        fn place(&mut self, ball: BallId, pos: Vec2) {
            let id = self.world.entity(ball).unwrap();
            self.ctx.set_position(id, pos);
        }
    }

    #[test]
    fn quiet_table_produces_no_events() {
        let mut f = fixture();
        assert!(f.run().is_empty());
        assert!(f.tray.is_empty());
    }

    #[test]
    fn object_ball_in_pocket_goes_to_tray() {
        let mut f = fixture();
        let pocket = f.geometry.pockets[2];
        f.place(BallId::Rank(3), pocket + Vec2::new(-10.0, 12.0));

        let events = f.run();
        let slot = f.tray.slot_of(BallId::Rank(3)).unwrap();
        assert_eq!(events, vec![ResolveEvent::Sunk { ball: BallId::Rank(3), slot }]);

        let id = f.world.entity(BallId::Rank(3)).unwrap();
        assert!(f.ctx.is_static(id));
        assert_eq!(f.ctx.position(id), Some(slot));
    }

    #[test]
    fn eight_ball_signals_last_ball_once() {
        let mut f = fixture();
        f.place(BallId::Rank(8), f.geometry.pockets[4]);

        let events = f.run();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ResolveEvent::LastBallSunk);
        assert!(f.tray.is_sunk(BallId::Rank(8)));

        // Frozen in the tray: later passes do not report it again.
        for _ in 0..5 {
            f.ctx.step_physics();
            assert!(f.run().is_empty());
        }
    }

    #[test]
    fn scratched_cue_is_recentered_not_sunk() {
        let mut f = fixture();
        let id = f.world.entity(BallId::Cue).unwrap();
        f.place(BallId::Cue, f.geometry.pockets[0] + Vec2::new(5.0, 5.0));
        f.ctx.set_velocity(id, Vec2::new(-200.0, -200.0));

        assert_eq!(f.run(), vec![ResolveEvent::CueScratched]);
        assert_eq!(f.ctx.position(id), Some(f.geometry.center()));
        assert_eq!(f.ctx.velocity(id), Vec2::ZERO);
        assert!(!f.ctx.is_static(id));
        assert!(!f.tray.is_sunk(BallId::Cue));
    }

    #[test]
    fn outward_velocity_is_clamped_at_the_rail() {
        let mut f = fixture();
        let id = f.world.entity(BallId::Rank(12)).unwrap();
        let b = f.geometry.bounds;
        // Against the right rail, away from the corner pockets.
        let at_rail = Vec2::new(b.x_max - 5.0, b.center().y);
        f.place(BallId::Rank(12), at_rail);
        f.ctx.set_velocity(id, Vec2::new(400.0, 60.0));

        assert!(f.run().is_empty());
        assert_eq!(f.ctx.velocity(id), Vec2::new(0.0, 60.0));
        assert_eq!(f.ctx.position(id), Some(at_rail));
    }

    #[test]
    fn sinks_in_one_pass_follow_ball_order() {
        let mut f = fixture();
        f.place(BallId::Rank(9), f.geometry.pockets[3]);
        f.place(BallId::Rank(2), f.geometry.pockets[5]);

        let events = f.run();
        let sunk: Vec<_> = f.tray.order().collect();
        assert_eq!(sunk, vec![BallId::Rank(2), BallId::Rank(9)]);
        assert_eq!(events.len(), 2);
    }
}
