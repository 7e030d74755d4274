pub mod config;
pub mod engine;
pub mod skill;
pub mod util;
