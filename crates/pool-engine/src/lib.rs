pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod surface;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, CanvasSize};
pub use components::entity::Entity;
pub use core::scene::Scene;
pub use core::frame::{FrameScheduler, FrameTick, FrameCallback};
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial,
};
pub use input::queue::{InputEvent, InputQueue};
pub use surface::{
    AnimationSurface, MemorySurface, NullSurface,
    NumberInput, BoolInput, TriggerInput,
};
