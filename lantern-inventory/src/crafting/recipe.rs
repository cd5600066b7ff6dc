use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use derive_more::{Display, From};
use lantern_core::{Actor, ItemStack};

use super::group::{Admission, RecipeGroup};
use super::shaped::ShapedRecipe;
use super::shapeless::ShapelessRecipe;
use super::single::{ShapelessSingleRecipe, SingleIngredient};
use super::{IngredientMatcher, MatchResult, RecipePattern, RepeatableIngredientMatcher};
use crate::grid::assert_consistent;
use crate::{CraftingGrid, GridInventory, RecipeError};

pub const DEFAULT_SHAPED_PRIORITY: i64 = 1_000;
pub const DEFAULT_SHAPELESS_PRIORITY: i64 = 500;
pub const DEFAULT_GROUP_PRIORITY: i64 = 0;

#[derive(Debug, Display, From, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

pub type ResultFn = Arc<dyn Fn(Option<&Actor>, &CraftingGrid) -> ItemStack + Send + Sync>;

/// What a recipe produces: either a fixed list or a single stack computed from
/// the staged grid.
#[derive(Clone)]
pub enum RecipeOutput {
    Fixed(Vec<ItemStack>),
    Computed(ResultFn),
}

impl RecipeOutput {
    pub fn computed(
        result: impl Fn(Option<&Actor>, &CraftingGrid) -> ItemStack + Send + Sync + 'static,
    ) -> Self {
        RecipeOutput::Computed(Arc::new(result))
    }

    pub fn compute(&self, actor: Option<&Actor>, grid: &CraftingGrid) -> Vec<ItemStack> {
        match self {
            RecipeOutput::Fixed(items) => items.clone(),
            RecipeOutput::Computed(result) => vec![result(actor, grid)],
        }
    }

    fn validate(&self) -> Result<(), RecipeError> {
        match self {
            RecipeOutput::Fixed(items) if items.is_empty() => Err(RecipeError::MissingResult),
            RecipeOutput::Fixed(items) if items.iter().any(ItemStack::is_empty) => {
                Err(RecipeError::EmptyResult)
            }
            _ => Ok(()),
        }
    }
}

impl Debug for RecipeOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeOutput::Fixed(items) => f.debug_tuple("Fixed").field(items).finish(),
            RecipeOutput::Computed(_) => f.write_str("Computed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeKind {
    Shaped,
    Shapeless,
    ShapelessSingle,
    Group,
}

/// Properties every recipe variant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeInfo {
    pub id: RecipeId,
    pub priority: i64,
    pub vanilla: bool,
}

pub trait RecipeTrait: Send + Sync {
    fn info(&self) -> &RecipeInfo;

    fn kind(&self) -> RecipeKind;

    /// Tries the recipe against `inventory`. `this` is the handle the recipe is
    /// registered under and ends up in the [`MatchResult`].
    ///
    /// Callers go through [`Recipe::matches`], which checks the inventory's
    /// dimensions first.
    fn match_grid(&self, this: &Recipe, inventory: &dyn GridInventory) -> Option<MatchResult>;

    fn id(&self) -> &RecipeId {
        &self.info().id
    }

    /// Higher priorities are tried first.
    fn priority(&self) -> i64 {
        self.info().priority
    }

    fn is_vanilla(&self) -> bool {
        self.info().vanilla
    }

    fn as_group(&self) -> Option<&RecipeGroup> {
        None
    }
}

/// Shared handle to a registered recipe. Two handles are equal when they point
/// at the same recipe.
#[derive(Clone)]
pub struct Recipe(Arc<dyn RecipeTrait>);

impl Recipe {
    /// Panics if `inventory` reports a size other than `rows * columns`.
    pub fn matches(&self, inventory: &dyn GridInventory) -> Option<MatchResult> {
        assert_consistent(inventory);
        self.0.match_grid(self, inventory)
    }
}

impl<T: RecipeTrait + 'static> From<T> for Recipe {
    fn from(recipe: T) -> Self {
        Recipe(Arc::new(recipe))
    }
}

impl Deref for Recipe {
    type Target = dyn RecipeTrait;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Recipe {}

impl Debug for Recipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recipe")
            .field("id", self.id())
            .field("kind", &self.kind())
            .field("priority", &self.priority())
            .finish()
    }
}

/// Builds recipes, rejecting malformed ones up front.
///
/// ```ignore
/// let recipe = RecipeBuilder::new("torch")
///     .output(ItemStack::new(4, TORCH))
///     .shaped(&["C", "S"], keys)?;
/// ```
pub struct RecipeBuilder {
    id: RecipeId,
    priority: Option<i64>,
    vanilla: bool,
    output: Option<RecipeOutput>,
}

impl RecipeBuilder {
    pub fn new(id: impl Into<RecipeId>) -> Self {
        Self {
            id: id.into(),
            priority: None,
            vanilla: false,
            output: None,
        }
    }

    /// Overrides the variant's default priority.
    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn vanilla(mut self, vanilla: bool) -> Self {
        self.vanilla = vanilla;
        self
    }

    #[must_use]
    pub fn output(self, output: ItemStack) -> Self {
        self.outputs(vec![output])
    }

    #[must_use]
    pub fn outputs(mut self, outputs: Vec<ItemStack>) -> Self {
        self.output = Some(RecipeOutput::Fixed(outputs));
        self
    }

    #[must_use]
    pub fn computed_output(
        mut self,
        result: impl Fn(Option<&Actor>, &CraftingGrid) -> ItemStack + Send + Sync + 'static,
    ) -> Self {
        self.output = Some(RecipeOutput::computed(result));
        self
    }

    pub fn shaped<S: AsRef<str>>(
        self,
        pattern: &[S],
        keys: HashMap<char, IngredientMatcher>,
    ) -> Result<Recipe, RecipeError> {
        let pattern = RecipePattern::new(pattern, keys)?;
        let (info, output) = self.finish(DEFAULT_SHAPED_PRIORITY)?;
        Ok(ShapedRecipe::new(info, pattern, output).into())
    }

    /// A pattern plus ingredients that may sit anywhere outside it. Nothing
    /// matches these yet, so they are refused instead of half-matched.
    pub fn shaped_with_tail<S: AsRef<str>>(
        self,
        pattern: &[S],
        keys: HashMap<char, IngredientMatcher>,
        tail: Vec<IngredientMatcher>,
    ) -> Result<Recipe, RecipeError> {
        RecipePattern::new(pattern, keys)?;
        self.finish(DEFAULT_SHAPED_PRIORITY)?;
        log::warn!(
            "Recipe {} has a pattern with {} free ingredients, which is not supported",
            self.id,
            tail.len()
        );
        Err(RecipeError::Unsupported("shaped recipe with a shapeless tail"))
    }

    pub fn shapeless(
        self,
        ingredients: Vec<IngredientMatcher>,
        repeatables: Vec<RepeatableIngredientMatcher>,
    ) -> Result<Recipe, RecipeError> {
        if ingredients.is_empty() && repeatables.is_empty() {
            return Err(RecipeError::NoIngredients);
        }
        let (info, output) = self.finish(DEFAULT_SHAPELESS_PRIORITY)?;
        Ok(ShapelessRecipe::new(info, ingredients, repeatables, output).into())
    }

    pub fn shapeless_single(
        self,
        ingredient: impl Into<SingleIngredient>,
    ) -> Result<Recipe, RecipeError> {
        let (info, output) = self.finish(DEFAULT_SHAPELESS_PRIORITY)?;
        Ok(ShapelessSingleRecipe::new(info, ingredient.into(), output).into())
    }

    /// Groups carry no result of their own, any output set on the builder is
    /// ignored.
    pub fn group(
        self,
        admission: impl Fn(&dyn GridInventory) -> bool + Send + Sync + 'static,
        recipes: impl IntoIterator<Item = Recipe>,
    ) -> RecipeGroup {
        let info = RecipeInfo {
            id: self.id,
            priority: self.priority.unwrap_or(DEFAULT_GROUP_PRIORITY),
            vanilla: self.vanilla,
        };
        let admission: Admission = Arc::new(admission);
        RecipeGroup::new(info, admission, recipes)
    }

    fn finish(&self, default_priority: i64) -> Result<(RecipeInfo, RecipeOutput), RecipeError> {
        let output = self.output.clone().ok_or(RecipeError::MissingResult)?;
        output.validate()?;
        let info = RecipeInfo {
            id: self.id.clone(),
            priority: self.priority.unwrap_or(default_priority),
            vanilla: self.vanilla,
        };
        Ok((info, output))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use lantern_core::ItemStack;

    use super::{RecipeBuilder, RecipeKind, DEFAULT_SHAPED_PRIORITY, DEFAULT_SHAPELESS_PRIORITY};
    use crate::crafting::IngredientMatcher;
    use crate::RecipeError;

    const STICK: u16 = 9;
    const COAL: u16 = 10;
    const TORCH: u16 = 12;

    fn torch_keys() -> HashMap<char, IngredientMatcher> {
        HashMap::from([
            ('C', IngredientMatcher::id(COAL)),
            ('S', IngredientMatcher::id(STICK)),
        ])
    }

    #[test]
    fn shaped_outranks_shapeless_by_default() {
        let shaped = RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shaped(&["C", "S"], torch_keys())
            .unwrap();
        let shapeless = RecipeBuilder::new("torch_shapeless")
            .output(ItemStack::new(1, TORCH))
            .shapeless(
                vec![IngredientMatcher::id(COAL), IngredientMatcher::id(STICK)],
                vec![],
            )
            .unwrap();
        assert_eq!(shaped.kind(), RecipeKind::Shaped);
        assert_eq!(shaped.priority(), DEFAULT_SHAPED_PRIORITY);
        assert_eq!(shapeless.priority(), DEFAULT_SHAPELESS_PRIORITY);
        assert!(shaped.priority() > shapeless.priority());
    }

    #[test]
    fn rejects_missing_or_empty_results() {
        let missing = RecipeBuilder::new("torch").shaped(&["C", "S"], torch_keys());
        assert_eq!(missing.unwrap_err(), RecipeError::MissingResult);

        let none = RecipeBuilder::new("torch")
            .outputs(vec![])
            .shaped(&["C", "S"], torch_keys());
        assert_eq!(none.unwrap_err(), RecipeError::MissingResult);

        let air = RecipeBuilder::new("torch")
            .output(ItemStack::default())
            .shaped(&["C", "S"], torch_keys());
        assert_eq!(air.unwrap_err(), RecipeError::EmptyResult);
    }

    #[test]
    fn rejects_shapeless_without_ingredients() {
        let recipe = RecipeBuilder::new("nothing")
            .output(ItemStack::new(1, TORCH))
            .shapeless(vec![], vec![]);
        assert_eq!(recipe.unwrap_err(), RecipeError::NoIngredients);
    }

    #[test]
    fn shapeless_tail_is_unsupported() {
        let recipe = RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shaped_with_tail(&["C", "S"], torch_keys(), vec![IngredientMatcher::id(COAL)]);
        assert!(matches!(recipe, Err(RecipeError::Unsupported(_))));
    }

    #[test]
    fn handles_compare_by_identity() {
        let build = || {
            RecipeBuilder::new("torch")
                .output(ItemStack::new(4, TORCH))
                .shaped(&["C", "S"], torch_keys())
                .unwrap()
        };
        let first = build();
        let second = build();
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
        assert_eq!(first.id(), second.id());
    }
}
