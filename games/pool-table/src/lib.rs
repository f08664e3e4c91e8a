use wasm_bindgen::prelude::*;
use pool_engine::*;

pub mod balls;
pub mod config;
pub mod game;
pub mod mapper;
pub mod phase;
pub mod resolver;
pub mod router;
pub mod sync;
pub mod table;
pub mod tray;
pub mod world;

pub use game::PoolGame;

pool_web::export_game!(PoolGame, "pool-table");
