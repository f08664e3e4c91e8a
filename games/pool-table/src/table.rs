//! Immutable table geometry: playable bounds, cushions, pocket zones.

use glam::Vec2;

use crate::config::{TableBounds, TableConfig};

/// A static cushion body: center plus half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

/// Table geometry, fixed at world construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGeometry {
    pub bounds: TableBounds,
    pub pockets: [Vec2; 6],
    pub hitbox_radius: f32,
    pub ball_radius: f32,
    pub wall_thickness: f32,
}

impl TableGeometry {
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            bounds: config.bounds,
            pockets: config.pocket_centers(),
            hitbox_radius: config.pocket_hitbox_radius,
            ball_radius: config.ball_radius,
            wall_thickness: config.wall_thickness,
        }
    }

    /// Where a scratched cue ball is put back.
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Index of the first pocket whose hitbox contains `pos`.
    /// Pockets are tested in their fixed order; the first match wins.
    pub fn pocket_hit(&self, pos: Vec2) -> Option<usize> {
        let r_sq = self.hitbox_radius * self.hitbox_radius;
        self.pockets
            .iter()
            .position(|pocket| pos.distance_squared(*pocket) < r_sq)
    }

    /// Zero any velocity component that pushes a ball further past a
    /// boundary it already touches. Position is left untouched.
    pub fn clamp_velocity(&self, pos: Vec2, vel: Vec2) -> Vec2 {
        let r = self.ball_radius;
        let b = &self.bounds;
        let mut out = vel;
        if pos.x < b.x_min + r && out.x < 0.0 {
            out.x = 0.0;
        }
        if pos.x > b.x_max - r && out.x > 0.0 {
            out.x = 0.0;
        }
        if pos.y < b.y_min + r && out.y < 0.0 {
            out.y = 0.0;
        }
        if pos.y > b.y_max - r && out.y > 0.0 {
            out.y = 0.0;
        }
        out
    }

    /// The four cushions, laid just outside the bounds: top, bottom, left, right.
    pub fn walls(&self) -> [Wall; 4] {
        let b = &self.bounds;
        let t = self.wall_thickness;
        let center = b.center();
        [
            Wall {
                center: Vec2::new(center.x, b.y_min - t / 2.0),
                half_width: b.width() / 2.0,
                half_height: t / 2.0,
            },
            Wall {
                center: Vec2::new(center.x, b.y_max + t / 2.0),
                half_width: b.width() / 2.0,
                half_height: t / 2.0,
            },
            Wall {
                center: Vec2::new(b.x_min - t / 2.0, center.y),
                half_width: t / 2.0,
                half_height: b.height() / 2.0,
            },
            Wall {
                center: Vec2::new(b.x_max + t / 2.0, center.y),
                half_width: t / 2.0,
                half_height: b.height() / 2.0,
            },
        ]
    }
}
