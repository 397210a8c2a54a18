//! Core value types shared by every system

pub mod color;
pub mod vec2;

pub use vec2::Vec2;
