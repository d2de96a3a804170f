pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod grid;
pub mod movement;
pub mod scheduler;
pub mod snapshot;
pub mod spawn;
pub mod world;
