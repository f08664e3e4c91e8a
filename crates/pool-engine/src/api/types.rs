use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// Current pixel size of the presentation canvas.
/// Zero in either dimension means the host has not sized it yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are usable for coordinate mapping.
    pub fn is_sized(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsized_canvas() {
        assert!(!CanvasSize::default().is_sized());
        assert!(!CanvasSize::new(800.0, 0.0).is_sized());
        assert!(CanvasSize::new(800.0, 600.0).is_sized());
    }

    #[test]
    fn game_event_is_four_floats() {
        let ev = GameEvent::new(1.0, 2.0, 3.0, 4.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&ev));
        assert_eq!(floats.len(), GameEvent::FLOATS);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }
}
