use lantern_core::ItemStack;

use super::result::Staging;
use super::{
    IngredientMatcher, MatchResult, Recipe, RecipeInfo, RecipeKind, RecipeOutput, RecipeTrait,
    RepeatableIngredientMatcher,
};
use crate::{GridInventory, SlotKind};

#[derive(Debug, Clone)]
pub enum SingleIngredient {
    /// Exactly one stack in the whole grid.
    Plain(IngredientMatcher),
    /// One or more stacks, all accepted by the same matcher.
    Repeatable(RepeatableIngredientMatcher),
}

impl SingleIngredient {
    pub fn matcher(&self) -> &IngredientMatcher {
        match self {
            SingleIngredient::Plain(matcher) => matcher,
            SingleIngredient::Repeatable(repeatable) => repeatable.matcher(),
        }
    }
}

impl From<IngredientMatcher> for SingleIngredient {
    fn from(matcher: IngredientMatcher) -> Self {
        SingleIngredient::Plain(matcher)
    }
}

impl From<RepeatableIngredientMatcher> for SingleIngredient {
    fn from(matcher: RepeatableIngredientMatcher) -> Self {
        SingleIngredient::Repeatable(matcher)
    }
}

pub struct ShapelessSingleRecipe {
    info: RecipeInfo,
    ingredient: SingleIngredient,
    output: RecipeOutput,
}

impl ShapelessSingleRecipe {
    pub fn new(info: RecipeInfo, ingredient: SingleIngredient, output: RecipeOutput) -> Self {
        Self {
            info,
            ingredient,
            output,
        }
    }

    pub fn ingredient(&self) -> &SingleIngredient {
        &self.ingredient
    }
}

impl RecipeTrait for ShapelessSingleRecipe {
    fn info(&self) -> &RecipeInfo {
        &self.info
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::ShapelessSingle
    }

    fn match_grid(&self, this: &Recipe, inventory: &dyn GridInventory) -> Option<MatchResult> {
        let matcher = self.ingredient.matcher();
        let mut staging = Staging::new(inventory);
        let mut matched: Vec<ItemStack> = vec![];

        for slot in 0..inventory.size() {
            if inventory.slot_kind(slot) == SlotKind::Display {
                continue;
            }
            let Some(stack) = inventory.occupied(slot) else {
                continue;
            };
            let full = match &self.ingredient {
                SingleIngredient::Plain(_) => !matched.is_empty(),
                SingleIngredient::Repeatable(repeatable) => !repeatable.accepts_more(matched.len()),
            };
            if full {
                return None;
            }
            let consumed = matcher.is_valid(staging.actor(), stack)?;
            matched.push(*stack);
            staging.stage(slot, consumed, matcher);
        }

        if matched.is_empty() {
            return None;
        }

        Some(staging.finish(this, |actor, grid| {
            let result = self.output.compute(actor, grid);
            match &self.ingredient {
                SingleIngredient::Plain(_) => result,
                SingleIngredient::Repeatable(repeatable) => {
                    let result = repeatable.transform_matched(result, &matched);
                    repeatable.transform_grid(result, grid)
                }
            }
        }))
    }
}
