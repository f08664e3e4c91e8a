//! Table tunables.
//!
//! Defaults reproduce the shipped table; hosts may override any subset by
//! passing a JSON document to `game_load_settings`. Coordinates are table
//! space (origin at the canvas center).

use glam::Vec2;
use serde::Deserialize;

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Playable rectangle in physics space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TableBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl TableBounds {
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x_min + self.x_max) * 0.5, (self.y_min + self.y_max) * 0.5)
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub ball_radius: f32,
    pub ball_restitution: f32,
    pub ball_friction: f32,
    /// Fraction of velocity lost per 1/60 s tick.
    pub air_friction: f32,
    pub ball_density: f32,
    pub wall_thickness: f32,
    pub wall_restitution: f32,
    pub bounds: TableBounds,
    /// Pocket centers, checked in this order.
    pub pockets: [[f32; 2]; 6],
    pub pocket_hitbox_radius: f32,
    /// Grab radius as a multiple of the ball radius.
    pub grab_factor: f32,
    /// Impulse per pixel of pull-back.
    pub shot_scale: f32,
    /// Slot of the first sunk ball.
    pub tray_origin: [f32; 2],
    /// Horizontal distance between consecutive tray slots.
    pub tray_spacing: f32,
    pub rerack_button: Rect,
    pub continue_button: Rect,
    pub restart_button: Rect,
    /// Rank whose sinking ends the rack.
    pub terminal_rank: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ball_radius: 18.0,
            ball_restitution: 0.9,
            ball_friction: 0.005,
            air_friction: 0.04,
            ball_density: 0.001,
            wall_thickness: 20.0,
            wall_restitution: 0.9,
            bounds: TableBounds {
                x_min: -440.0,
                x_max: 140.0,
                y_min: -158.0,
                y_max: 104.0,
            },
            pockets: [
                [-440.0, -165.0], // top left
                [-150.0, -165.0], // top middle
                [140.0, -165.0],  // top right
                [-440.0, 115.0],  // bottom left
                [-150.0, 115.0],  // bottom middle
                [140.0, 115.0],   // bottom right
            ],
            pocket_hitbox_radius: 40.0,
            grab_factor: 1.5,
            shot_scale: 8.0,
            tray_origin: [-500.0, 275.0],
            tray_spacing: 50.0,
            rerack_button: Rect::new(300.0, 245.0, 120.0, 60.0),
            continue_button: Rect::new(-168.0, 0.0, 200.0, 43.0),
            restart_button: Rect::new(-390.0, 0.0, 200.0, 43.0),
            terminal_rank: 8,
        }
    }
}

impl TableConfig {
    /// Parse a config from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn grab_radius(&self) -> f32 {
        self.ball_radius * self.grab_factor
    }

    pub fn pocket_centers(&self) -> [Vec2; 6] {
        self.pockets.map(|[x, y]| Vec2::new(x, y))
    }

    pub fn tray_origin(&self) -> Vec2 {
        Vec2::new(self.tray_origin[0], self.tray_origin[1])
    }

    /// Rapier linear damping equivalent to losing `air_friction` of the
    /// velocity every 1/60 s.
    pub fn linear_damping(&self) -> f32 {
        let keep = (1.0 - self.air_friction).max(f32::EPSILON);
        60.0 * (1.0 / keep - 1.0)
    }
}
