#![doc = include_str!("../readme.md")]

pub mod core;
pub mod generation;
pub mod simulation;
