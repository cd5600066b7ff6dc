use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Invalid slot")]
    InvalidSlot,
    #[error("Slot {0} only displays items")]
    DisplaySlot(usize),
    #[error("Match was staged on a {expected_rows}x{expected_columns} grid, inventory is {rows}x{columns}")]
    GridMismatch {
        expected_rows: usize,
        expected_columns: usize,
        rows: usize,
        columns: usize,
    },
    #[error("Slot {0} no longer holds the items the match consumes")]
    InsufficientItems(usize),
}

/// Defects in how a recipe was written. These surface when the recipe is
/// built, never while matching.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Pattern has no rows")]
    EmptyPattern,
    #[error("Pattern row {0} is empty")]
    EmptyRow(usize),
    #[error("Pattern row {row} is {found} wide, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Pattern uses '{0}' which has no ingredient")]
    MissingKey(char),
    #[error("Ingredient '{0}' is never used in the pattern")]
    UnusedKey(char),
    #[error("Recipe has no ingredients")]
    NoIngredients,
    #[error("{len} items don't fill a {rows}x{columns} grid")]
    GridSizeMismatch {
        rows: usize,
        columns: usize,
        len: usize,
    },
    #[error("Recipe has no result")]
    MissingResult,
    #[error("Recipe result contains an empty stack")]
    EmptyResult,
    #[error("Unsupported recipe: {0}")]
    Unsupported(&'static str),
    #[error("Unknown item {0}")]
    UnknownItem(String),
    #[error("Unknown item tag {0}")]
    UnknownTag(String),
    #[error("Recipe {id}: {source}")]
    Invalid {
        id: String,
        #[source]
        source: Box<RecipeError>,
    },
}
