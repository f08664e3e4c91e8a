use glam::Vec2;

use crate::api::types::{CanvasSize, EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsBody, PhysicsWorld};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::surface::{AnimationSurface, NullSurface};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Physics timestep in seconds (default: 1/60). One step runs per frame.
    pub fixed_dt: f32,
    /// Width of the animation asset's authored space.
    pub world_width: f32,
    /// Height of the animation asset's authored space.
    pub world_height: f32,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for physics simulation. Default: zero (top-down table).
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1280.0,
            world_height: 832.0,
            max_events: 32,
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
///
/// Per frame the runner calls `update` (input), steps physics, calls
/// `post_step`, and separately calls `present` from its own frame callback.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state. The animation surface may not be ready yet.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Consume input for this frame. Runs before the physics step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// React to the physics step that just ran (constraints, detection).
    fn post_step(&mut self, _ctx: &mut EngineContext) {}

    /// Push simulation state out to the animation surface.
    fn present(&mut self, _ctx: &mut EngineContext) {}

    /// Apply host-provided settings (JSON). Default: ignore.
    fn load_settings(&mut self, _json: &str) -> Result<(), serde_json::Error> {
        Ok(())
    }
}

/// Mutable access to engine state, passed to every `Game` hook.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    pub physics: PhysicsWorld,
    /// The animation layer. A [`NullSurface`] until the host attaches one.
    pub surface: Box<dyn AnimationSurface>,
    /// Live presentation canvas size.
    pub canvas: CanvasSize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose physics world follows the given config.
    pub fn with_config(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::new(),
            events: Vec::with_capacity(config.max_events),
            physics,
            surface: Box::new(NullSurface),
            canvas: CanvasSize::default(),
            next_id: 1,
        }
    }

    /// Replace the animation surface.
    pub fn set_surface(&mut self, surface: Box<dyn AnimationSurface>) {
        self.surface = surface;
    }

    /// Record a new canvas size reported by the host.
    pub fn set_canvas(&mut self, width: f32, height: f32) {
        log::debug!("Canvas resized to {}x{}", width, height);
        self.canvas = CanvasSize::new(width, height);
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    fn body(&self, id: EntityId) -> Option<PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }

    /// Current position of an entity, if it exists.
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.scene.get(id).map(|e| e.pos)
    }

    /// Apply an instantaneous impulse to an entity's physics body.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.apply_impulse(&body, impulse);
        }
    }

    /// Set the linear velocity of an entity's physics body.
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.body(id) {
            self.physics.set_velocity(&body, vel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map(|body| self.physics.velocity(&body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport an entity and its body.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos = pos;
            if let Some(body) = &entity.body {
                self.physics.set_position(body, pos);
            }
        }
    }

    /// Freeze (`true`) or release (`false`) an entity's body.
    pub fn set_static(&mut self, id: EntityId, is_static: bool) {
        if let Some(body) = self.body(id) {
            self.physics.set_static(&body, is_static);
        }
    }

    pub fn is_static(&self, id: EntityId) -> bool {
        self.body(id)
            .map(|body| self.physics.is_static(&body))
            .unwrap_or(false)
    }

    /// Zero angle and angular velocity.
    pub fn reset_rotation(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.rotation = 0.0;
            if let Some(body) = &entity.body {
                self.physics.reset_rotation(body);
            }
        }
    }

    /// Zero angular velocity only.
    pub fn stop_spin(&mut self, id: EntityId) {
        if let Some(body) = self.body(id) {
            self.physics.stop_spin(&body);
        }
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner between `Game::update()` and `Game::post_step()`.
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
