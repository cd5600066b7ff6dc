use std::collections::BTreeMap;

use lantern_core::{Actor, ItemStack};

use super::{IngredientMatcher, Recipe};
use crate::{CraftingGrid, GridInventory};

/// Outcome of a successful match. Nothing has been taken out of the
/// inventory yet; applying it is up to the caller.
#[derive(Debug, Clone)]
pub struct MatchResult {
    recipe: Recipe,
    outputs: Vec<ItemStack>,
    consumed: CraftingGrid,
    replacements: BTreeMap<usize, ItemStack>,
}

impl MatchResult {
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn outputs(&self) -> &[ItemStack] {
        &self.outputs
    }

    /// What each slot gives up, laid out like the matched inventory.
    pub fn consumed(&self) -> &CraftingGrid {
        &self.consumed
    }

    /// Slot index to the item placed there after crafting.
    pub fn replacements(&self) -> &BTreeMap<usize, ItemStack> {
        &self.replacements
    }
}

/// Consumption collected while a recipe walks the inventory.
pub(crate) struct Staging<'a> {
    actor: Option<&'a Actor>,
    grid: CraftingGrid,
    pending: Vec<(usize, &'a IngredientMatcher)>,
}

impl<'a> Staging<'a> {
    pub fn new(inventory: &'a dyn GridInventory) -> Self {
        Self {
            actor: inventory.actor(),
            grid: CraftingGrid::new(inventory.rows(), inventory.columns()),
            pending: vec![],
        }
    }

    pub fn actor(&self) -> Option<&'a Actor> {
        self.actor
    }

    pub fn stage(&mut self, slot: usize, consumed: ItemStack, matcher: &'a IngredientMatcher) {
        self.grid.set(slot, Some(consumed));
        self.pending.push((slot, matcher));
    }

    /// Resolves replacements and computes the outputs. Both only ever see the
    /// staged grid behind a shared reference.
    pub fn finish(
        self,
        recipe: &Recipe,
        outputs: impl FnOnce(Option<&Actor>, &CraftingGrid) -> Vec<ItemStack>,
    ) -> MatchResult {
        let replacements = self
            .pending
            .iter()
            .filter_map(|(slot, matcher)| {
                Some((*slot, matcher.get_replacement(self.actor, &self.grid)?))
            })
            .collect();
        let outputs = outputs(self.actor, &self.grid);
        log::trace!("Recipe {} matched: {outputs:?}", recipe.id());
        MatchResult {
            recipe: recipe.clone(),
            outputs,
            consumed: self.grid,
            replacements,
        }
    }
}
