use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use super::{MatchResult, Recipe, RecipeBuilder, RecipeGroup, RecipeId};
use crate::grid::assert_consistent;
use crate::GridInventory;

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Every recipe a server knows about. Lookups walk the recipes by priority and
/// return the first match.
///
/// Recipes passed to [`RecipeRegistry::with_recipes`] form the baseline that
/// [`RecipeRegistry::reset`] goes back to.
pub struct RecipeRegistry {
    root: RecipeGroup,
    parallel: bool,
    parallel_threshold: usize,
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::with_recipes([])
    }
}

impl RecipeRegistry {
    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let root = RecipeBuilder::new("root").group(|_| true, recipes);
        log::debug!("Recipe registry created with {} recipes", root.len());
        Self {
            root,
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Look up recipes on the rayon pool once there are at least `threshold`
    /// of them. Priority order is still respected.
    #[must_use]
    pub fn parallel(mut self, parallel: bool, threshold: usize) -> Self {
        self.parallel = parallel;
        self.parallel_threshold = threshold;
        self
    }

    pub fn register(&self, recipe: Recipe) -> bool {
        self.root.add(recipe)
    }

    pub fn unregister(&self, id: &RecipeId) -> bool {
        self.root.remove_by_id(id)
    }

    pub fn remove(&self, recipe: &Recipe) -> bool {
        self.root.remove(recipe)
    }

    pub fn reset(&self) {
        self.root.reset();
    }

    pub fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.root.get(id)
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.root.recipes()
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn find_match<I: GridInventory + Sync>(&self, inventory: &I) -> Option<MatchResult> {
        assert_consistent(inventory);
        let recipes = self.root.snapshot();
        let result = if self.parallel && recipes.len() >= self.parallel_threshold {
            let recipes: Vec<&Recipe> = recipes.values().collect();
            recipes
                .par_iter()
                .find_map_first(|recipe| recipe.matches(inventory))
        } else {
            recipes.values().find_map(|recipe| recipe.matches(inventory))
        };
        if result.is_none() {
            log::trace!("None of {} recipes match", recipes.len());
        }
        result
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use lantern_core::ItemStack;

    use super::RecipeRegistry;
    use crate::crafting::{IngredientMatcher, Recipe, RecipeBuilder};
    use crate::CraftingGrid;

    const STICK: u16 = 9;
    const COAL: u16 = 10;
    const TORCH: u16 = 12;
    const WOOL: u16 = 49;

    fn shaped_torch() -> Recipe {
        RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shaped(
                &["C", "S"],
                HashMap::from([
                    ('C', IngredientMatcher::id(COAL)),
                    ('S', IngredientMatcher::id(STICK)),
                ]),
            )
            .unwrap()
    }

    fn shapeless_torch() -> Recipe {
        RecipeBuilder::new("loose_torch")
            .output(ItemStack::new(1, TORCH))
            .shapeless(
                vec![IngredientMatcher::id(COAL), IngredientMatcher::id(STICK)],
                vec![],
            )
            .unwrap()
    }

    fn torch_grid() -> CraftingGrid {
        let mut grid = CraftingGrid::new(3, 3);
        grid.set(1, Some(ItemStack::new(1, COAL)));
        grid.set(4, Some(ItemStack::new(1, STICK)));
        grid
    }

    #[test]
    fn shaped_wins_over_shapeless() {
        // Registered shapeless first, the shaped default priority still wins.
        let registry = RecipeRegistry::with_recipes([shapeless_torch(), shaped_torch()]);
        let result = registry.find_match(&torch_grid()).unwrap();
        assert_eq!(result.recipe().id().as_str(), "torch");

        let mut swapped = CraftingGrid::new(3, 3);
        swapped.set(1, Some(ItemStack::new(1, STICK)));
        swapped.set(4, Some(ItemStack::new(1, COAL)));
        let result = registry.find_match(&swapped).unwrap();
        assert_eq!(result.recipe().id().as_str(), "loose_torch");
    }

    #[test]
    fn parallel_lookup_keeps_priority() {
        let filler = (0..100).map(|i| {
            RecipeBuilder::new(format!("wool_{i}"))
                .output(ItemStack::new(1, WOOL))
                .shapeless_single(IngredientMatcher::item(ItemStack::new(1, WOOL).with_meta(i)))
                .unwrap()
        });
        let registry = RecipeRegistry::with_recipes(
            filler.chain([shapeless_torch(), shaped_torch()]),
        )
        .parallel(true, 1);
        for _ in 0..10 {
            let result = registry.find_match(&torch_grid()).unwrap();
            assert_eq!(result.recipe().id().as_str(), "torch");
        }
    }

    #[test]
    fn register_unregister_reset() {
        let registry = RecipeRegistry::with_recipes([shaped_torch()]);
        assert_eq!(registry.len(), 1);

        assert!(registry.register(shapeless_torch()));
        assert!(registry.unregister(&"torch".into()));
        assert!(!registry.unregister(&"torch".into()));
        assert_eq!(
            registry.find_match(&torch_grid()).unwrap().recipe().id().as_str(),
            "loose_torch"
        );

        registry.reset();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&"torch".into()).is_some());
        assert!(registry.get(&"loose_torch".into()).is_none());
    }

    #[test]
    fn empty_registry() {
        let registry = RecipeRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.find_match(&torch_grid()).is_none());
    }

    #[test]
    #[should_panic]
    fn inconsistent_inventory_panics() {
        struct Broken;
        impl crate::GridInventory for Broken {
            fn rows(&self) -> usize {
                3
            }
            fn columns(&self) -> usize {
                3
            }
            fn size(&self) -> usize {
                4
            }
            fn item_at(&self, _slot: usize) -> Option<&ItemStack> {
                None
            }
        }
        RecipeRegistry::with_recipes([shaped_torch()]).find_match(&Broken);
    }
}
