// config module — TOML configuration types and discovery

pub mod loader;
pub mod types;
