pub mod commands;
pub mod engine;
pub mod move_effects;
pub mod rng;
pub mod state;
pub mod stats;

#[cfg(test)]
mod tests;
