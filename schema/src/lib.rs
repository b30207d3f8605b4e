// Pokemon Legacy Schema - Shared reference data definitions
// This crate contains the plain records read from the species, move and item
// data files. The battle engine consumes them read-only.

// Re-export the main types
pub use item_data::*;
pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod item_data;
pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
