pub mod frame;
pub mod physics;
pub mod scene;
