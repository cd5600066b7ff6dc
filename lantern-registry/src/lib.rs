use std::path::PathBuf;

use thiserror::Error;

mod recipe;
mod tags;

pub use recipe::{
    load_recipes_from_dir, CraftingType, FireworkCrafting, IngredientSlot, IngredientType,
    RecipeBody, RecipeData, RecipeResult, RecipeType, ShapedCrafting, ShapelessCrafting,
    SpecialCraftingType, VANILLA_RECIPES,
};
pub use tags::{get_tag_values, resolve_item_tag, TagType, ITEM_TAGS};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unable to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid recipe {id}: {source}")]
    InvalidRecipe {
        id: String,
        source: serde_json::Error,
    },
}
