pub mod config;
pub mod engine;
pub mod export;
pub mod menubar;
pub mod player;
pub mod renderer;
pub mod scenes;
pub mod types;
