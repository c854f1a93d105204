// pokecalc schema - static data shared by the battle engine.
// This crate holds the type chart, the move table and the small enums that
// describe them. Nothing here is mutated at runtime.

// Re-export the main types
pub use move_types::*;
pub use moves::*;
pub use pokemon_types::*;

pub mod move_types;
pub mod moves;
pub mod pokemon_types;
