mod group;
mod loader;
mod matcher;
mod pattern;
mod recipe;
mod registry;
mod result;
mod shaped;
mod shapeless;
mod single;
pub mod special;

pub use group::{Admission, RecipeGroup};
pub use loader::{load_data_recipes, recipe_from_data, vanilla_recipes};
pub use matcher::{
    DynamicReplacement, GridTransform, IngredientMatcher, ItemPredicate, ItemPredicateFn,
    MatchedTransform, RepeatableIngredientMatcher, Validator,
};
pub use pattern::{RecipePattern, EMPTY_CELL};
pub use recipe::{
    Recipe, RecipeBuilder, RecipeId, RecipeInfo, RecipeKind, RecipeOutput, RecipeTrait,
    ResultFn, DEFAULT_GROUP_PRIORITY, DEFAULT_SHAPED_PRIORITY, DEFAULT_SHAPELESS_PRIORITY,
};
pub use registry::{RecipeRegistry, DEFAULT_PARALLEL_THRESHOLD};
pub use result::MatchResult;
pub use shaped::ShapedRecipe;
pub use shapeless::ShapelessRecipe;
pub use single::{ShapelessSingleRecipe, SingleIngredient};
