pub mod crafting;
mod crafting_inventory;
mod error;
mod grid;

pub use crafting_inventory::CraftingInventory;
pub use error::{InventoryError, RecipeError};
pub use grid::{CraftingGrid, GridInventory, SlotKind};
