//! The table's rigid bodies: sixteen balls and four cushions.

use glam::Vec2;
use pool_engine::{BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId};

use crate::balls::{rack_positions, BallId, ALL_BALLS};
use crate::config::TableConfig;
use crate::mapper;
use crate::table::TableGeometry;

/// Owns the entity ids of every body on the table plus the construction-time
/// rack snapshot. Bodies themselves live in the engine's physics world.
pub struct PoolWorld {
    balls: Vec<(BallId, EntityId)>,
    walls: Vec<EntityId>,
    rack: [Vec2; 16],
    geometry: TableGeometry,
}

impl PoolWorld {
    /// Spawn cushions and balls.
    ///
    /// `start` holds each ball's logical-space position as reported by the
    /// animation layer, indexed like [`ALL_BALLS`]. Balls without a reported
    /// position take their slot in a standard rack.
    pub fn build(ctx: &mut EngineContext, config: &TableConfig, start: &[Option<Vec2>; 16]) -> Self {
        let canvas = ctx.canvas;
        let fallback = fallback_layout(&TableGeometry::from_config(config));

        let mut rack = [Vec2::ZERO; 16];
        for (i, slot) in rack.iter_mut().enumerate() {
            *slot = match start[i] {
                Some(logical) if canvas.is_sized() => mapper::to_presentation(logical, canvas),
                _ => fallback[i],
            };
        }
        log::info!(
            "Rack layout: {} of 16 positions from animation layer",
            start.iter().filter(|p| p.is_some()).count()
        );
        Self::from_rack(ctx, config, rack)
    }

    /// Spawn cushions and balls with the balls at `rack` (table space).
    /// Restart uses this to rebuild from the construction-time layout.
    pub fn from_rack(ctx: &mut EngineContext, config: &TableConfig, rack: [Vec2; 16]) -> Self {
        let geometry = TableGeometry::from_config(config);
        let wall_material = ColliderMaterial {
            restitution: config.wall_restitution,
            friction: config.ball_friction,
            density: 1.0,
        };
        let mut walls = Vec::with_capacity(4);
        for wall in geometry.walls() {
            let id = ctx.next_id();
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: wall.half_width,
                half_height: wall.half_height,
            })
            .with_position(wall.center);
            walls.push(ctx.spawn_with_body(Entity::new(id).with_tag("cushion"), desc, wall_material));
        }

        let ball_material = ColliderMaterial {
            restitution: config.ball_restitution,
            friction: config.ball_friction,
            density: config.ball_density,
        };
        let damping = config.linear_damping();
        let mut balls = Vec::with_capacity(ALL_BALLS.len());
        for ball in ALL_BALLS {
            let id = ctx.next_id();
            let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: config.ball_radius })
                .with_position(rack[ball.index()])
                .with_linear_damping(damping)
                .with_angular_damping(damping)
                .with_ccd(true);
            ctx.spawn_with_body(Entity::new(id).with_tag(ball.tag()), desc, ball_material);
            balls.push((ball, id));
        }

        log::info!("Table built: {} balls, {} cushions", balls.len(), walls.len());

        Self {
            balls,
            walls,
            rack,
            geometry,
        }
    }

    /// Despawn every body this world owns.
    pub fn teardown(&mut self, ctx: &mut EngineContext) {
        for (_, id) in self.balls.drain(..) {
            ctx.despawn(id);
        }
        for id in self.walls.drain(..) {
            ctx.despawn(id);
        }
    }

    pub fn entity(&self, ball: BallId) -> Option<EntityId> {
        self.balls.iter().find(|(b, _)| *b == ball).map(|(_, id)| *id)
    }

    pub fn balls(&self) -> impl Iterator<Item = (BallId, EntityId)> + '_ {
        self.balls.iter().copied()
    }

    /// Current physics position of a ball.
    pub fn position(&self, ctx: &EngineContext, ball: BallId) -> Option<Vec2> {
        self.entity(ball).and_then(|id| ctx.position(id))
    }

    /// Construction-time position of a ball.
    pub fn rack_position(&self, ball: BallId) -> Vec2 {
        self.rack[ball.index()]
    }

    pub fn rack(&self) -> &[Vec2; 16] {
        &self.rack
    }

    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }
}

/// Cue ball on the head spot, object balls racked on the foot spot.
fn fallback_layout(geometry: &TableGeometry) -> [Vec2; 16] {
    let b = geometry.bounds;
    let center_y = b.center().y;
    let head = Vec2::new(b.x_min + b.width() * 0.25, center_y);
    let apex = Vec2::new(b.x_min + b.width() * 0.65, center_y);

    let mut layout = [head; 16];
    let racked = rack_positions(apex, geometry.ball_radius);
    layout[1..].copy_from_slice(&racked);
    layout
}
