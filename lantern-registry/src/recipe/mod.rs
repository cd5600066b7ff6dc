mod read;
mod recipe_formats;

pub use read::{
    ingredients::IngredientSlot, ingredients::IngredientType, CraftingType, FireworkCrafting,
    RecipeBody, RecipeData, RecipeResult, RecipeType, SpecialCraftingType,
};
pub use recipe_formats::{ShapedCrafting, ShapelessCrafting};

use crate::RegistryError;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::LazyLock;

/// Recipes shipped with the server, keyed by recipe id in file order.
pub static VANILLA_RECIPES: LazyLock<IndexMap<String, RecipeData>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../../assets/recipes.json"))
        .expect("Could not parse recipes.json registry.")
});

/// Reads every `*.json` file in `dir`, the file stem becomes the recipe id.
///
/// Files are returned sorted by id so registration order does not depend on
/// the file system.
pub fn load_recipes_from_dir(dir: &Path) -> Result<Vec<(String, RecipeData)>, RegistryError> {
    let io_error = |source| RegistryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = vec![];
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut recipes = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            log::warn!("Skipping recipe file with a non UTF-8 name: {path:?}");
            continue;
        };
        let id = id.to_string();
        let content = std::fs::read_to_string(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let recipe = serde_json::from_str::<RecipeData>(&content)
            .map_err(|source| RegistryError::InvalidRecipe {
                id: id.clone(),
                source,
            })?;
        recipes.push((id, recipe));
    }
    log::debug!("Loaded {} recipe files from {dir:?}", recipes.len());
    Ok(recipes)
}
