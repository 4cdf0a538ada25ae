// src/moderation/mod.rs

pub mod engine;
pub mod principal;

pub use engine::ModerationEngine;
pub use principal::{Principal, Role};
