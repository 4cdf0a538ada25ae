// src/models/mod.rs

pub mod comment;
pub mod game;
pub mod user;
