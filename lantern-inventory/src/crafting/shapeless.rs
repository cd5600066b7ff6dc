use lantern_core::ItemStack;

use super::result::Staging;
use super::{
    IngredientMatcher, MatchResult, Recipe, RecipeInfo, RecipeKind, RecipeOutput, RecipeTrait,
    RepeatableIngredientMatcher,
};
use crate::{GridInventory, SlotKind};

/// A recipe that only cares which items are present, not where.
///
/// Stacks are assigned greedily in slot order: each goes to the first plain
/// ingredient that accepts it, otherwise to the first repeatable one. There is
/// no backtracking, so declaration order decides ambiguous stacks.
pub struct ShapelessRecipe {
    info: RecipeInfo,
    ingredients: Vec<IngredientMatcher>,
    repeatables: Vec<RepeatableIngredientMatcher>,
    output: RecipeOutput,
}

impl ShapelessRecipe {
    pub fn new(
        info: RecipeInfo,
        ingredients: Vec<IngredientMatcher>,
        repeatables: Vec<RepeatableIngredientMatcher>,
        output: RecipeOutput,
    ) -> Self {
        Self {
            info,
            ingredients,
            repeatables,
            output,
        }
    }

    pub fn ingredients(&self) -> &[IngredientMatcher] {
        &self.ingredients
    }

    pub fn repeatables(&self) -> &[RepeatableIngredientMatcher] {
        &self.repeatables
    }
}

impl RecipeTrait for ShapelessRecipe {
    fn info(&self) -> &RecipeInfo {
        &self.info
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Shapeless
    }

    fn match_grid(&self, this: &Recipe, inventory: &dyn GridInventory) -> Option<MatchResult> {
        let mut remaining: Vec<&IngredientMatcher> = self.ingredients.iter().collect();
        let mut matched: Vec<Vec<ItemStack>> = vec![vec![]; self.repeatables.len()];
        let mut staging = Staging::new(inventory);
        let actor = staging.actor();

        for slot in 0..inventory.size() {
            if inventory.slot_kind(slot) == SlotKind::Display {
                continue;
            }
            let Some(stack) = inventory.occupied(slot) else {
                continue;
            };

            let plain = remaining
                .iter()
                .enumerate()
                .find_map(|(index, matcher)| Some((index, matcher.is_valid(actor, stack)?)));
            if let Some((index, consumed)) = plain {
                let matcher = remaining.remove(index);
                staging.stage(slot, consumed, matcher);
                continue;
            }

            let (index, consumed) = self
                .repeatables
                .iter()
                .enumerate()
                .filter(|(index, matcher)| matcher.accepts_more(matched[*index].len()))
                .find_map(|(index, matcher)| Some((index, matcher.is_valid(actor, stack)?)))?;
            matched[index].push(*stack);
            staging.stage(slot, consumed, self.repeatables[index].matcher());
        }

        if !remaining.is_empty() || matched.iter().any(Vec::is_empty) {
            return None;
        }

        Some(staging.finish(this, |actor, grid| {
            self.repeatables.iter().zip(&matched).fold(
                self.output.compute(actor, grid),
                |result, (repeatable, stacks)| {
                    let result = repeatable.transform_matched(result, stacks);
                    repeatable.transform_grid(result, grid)
                },
            )
        }))
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use lantern_core::ItemStack;

    use crate::crafting::{IngredientMatcher, Recipe, RecipeBuilder, RepeatableIngredientMatcher};
    use crate::{CraftingGrid, CraftingInventory, SlotKind};

    const STICK: u16 = 9;
    const COAL: u16 = 10;
    const CHARCOAL: u16 = 11;
    const TORCH: u16 = 12;
    const DYE: u16 = 48;
    const WOOL: u16 = 49;

    fn grid(columns: usize, items: &[Option<ItemStack>]) -> CraftingGrid {
        CraftingGrid::from_items(items.len() / columns, columns, items.to_vec()).unwrap()
    }

    fn stack(id: u16) -> Option<ItemStack> {
        Some(ItemStack::new(1, id))
    }

    fn dyed_stick(calls: Arc<AtomicUsize>) -> Recipe {
        let dye = RepeatableIngredientMatcher::new(IngredientMatcher::id(DYE))
            .with_matched_transform(move |result, matched| {
                calls.fetch_add(1, Ordering::SeqCst);
                result
                    .into_iter()
                    .map(|stack| stack.with_count(matched.len() as u8))
                    .collect()
            });
        RecipeBuilder::new("dyed_stick")
            .output(ItemStack::new(1, WOOL))
            .shapeless(vec![IngredientMatcher::id(STICK)], vec![dye])
            .unwrap()
    }

    #[test]
    fn repeatable_binds_every_dye() {
        let calls = Arc::new(AtomicUsize::new(0));
        let recipe = dyed_stick(calls.clone());
        let dyes = [1, 4, 11].map(|meta| Some(ItemStack::new(1, DYE).with_meta(meta)));
        let placed = grid(
            3,
            &[stack(STICK), None, dyes[0], None, dyes[1], None, None, None, dyes[2]],
        );
        let result = recipe.matches(&placed).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.outputs(), &[ItemStack::new(3, WOOL)]);
        assert_eq!(result.consumed().stacks().count(), 4);
    }

    #[test]
    fn repeatable_must_bind_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let recipe = dyed_stick(calls.clone());
        let placed = grid(3, &[stack(STICK), None, None, None, None, None, None, None, None]);
        assert!(recipe.matches(&placed).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn rematching_the_staged_grid() {
        let recipe = dyed_stick(Arc::new(AtomicUsize::new(0)));
        let dyes = [2, 7].map(|meta| Some(ItemStack::new(3, DYE).with_meta(meta)));
        let placed = grid(3, &[None, dyes[0], None, Some(ItemStack::new(2, STICK)), None, dyes[1]]);
        let first = recipe.matches(&placed).unwrap();
        let again = recipe.matches(first.consumed()).unwrap();
        assert_eq!(again.recipe(), first.recipe());
        assert_eq!(again.outputs(), first.outputs());
        assert_eq!(again.outputs(), &[ItemStack::new(2, WOOL)]);
        assert_eq!(again.consumed(), first.consumed());
    }

    #[test]
    fn repeatable_limit_rejects_extra_stacks() {
        let dye = RepeatableIngredientMatcher::new(IngredientMatcher::id(DYE)).with_limit(2);
        let recipe = RecipeBuilder::new("lightly_dyed_stick")
            .output(ItemStack::new(1, WOOL))
            .shapeless(vec![IngredientMatcher::id(STICK)], vec![dye])
            .unwrap();
        assert!(recipe
            .matches(&grid(2, &[stack(STICK), stack(DYE), stack(DYE), None]))
            .is_some());
        assert!(recipe
            .matches(&grid(2, &[stack(STICK), stack(DYE), stack(DYE), stack(DYE)]))
            .is_none());
    }

    #[test]
    fn placement_does_not_matter() {
        let recipe = RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shapeless(
                vec![IngredientMatcher::id(COAL), IngredientMatcher::id(STICK)],
                vec![],
            )
            .unwrap();
        let layouts = [
            [stack(COAL), stack(STICK), None, None],
            [stack(STICK), stack(COAL), None, None],
            [None, None, stack(STICK), stack(COAL)],
            [stack(COAL), None, None, stack(STICK)],
        ];
        for layout in layouts {
            let result = recipe.matches(&grid(2, &layout)).unwrap();
            assert_eq!(result.outputs(), &[ItemStack::new(4, TORCH)]);
        }
    }

    #[test]
    fn every_stack_must_be_used() {
        let recipe = RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shapeless(
                vec![IngredientMatcher::id(COAL), IngredientMatcher::id(STICK)],
                vec![],
            )
            .unwrap();
        assert!(recipe
            .matches(&grid(2, &[stack(COAL), stack(STICK), stack(STICK), None]))
            .is_none());
        assert!(recipe
            .matches(&grid(2, &[stack(COAL), None, None, None]))
            .is_none());
    }

    #[test]
    fn first_declared_matcher_wins() {
        // A coal stack fits both ingredients; it is taken by the first one,
        // leaving only charcoal for the second.
        let fuel = IngredientMatcher::any_of([
            ItemStack::new(1, COAL),
            ItemStack::new(1, CHARCOAL),
        ]);
        let recipe = RecipeBuilder::new("greedy")
            .output(ItemStack::new(1, TORCH))
            .shapeless(vec![fuel, IngredientMatcher::id(COAL)], vec![])
            .unwrap();
        assert!(recipe
            .matches(&grid(2, &[stack(COAL), stack(CHARCOAL), None, None]))
            .is_none());
        assert!(recipe
            .matches(&grid(2, &[stack(CHARCOAL), stack(COAL), None, None]))
            .is_some());
    }

    #[test]
    fn display_slots_are_skipped() {
        let recipe = RecipeBuilder::new("torch")
            .output(ItemStack::new(4, TORCH))
            .shapeless(
                vec![IngredientMatcher::id(COAL), IngredientMatcher::id(STICK)],
                vec![],
            )
            .unwrap();
        let mut inventory = CraftingInventory::player();
        inventory.set_slot_kind(3, SlotKind::Display).unwrap();
        inventory.set_item(0, stack(COAL)).unwrap();
        inventory.set_item(1, stack(STICK)).unwrap();
        inventory
            .set_slot(3, Some(ItemStack::new(1, WOOL)), true)
            .unwrap();
        let result = recipe.matches(&inventory).unwrap();
        assert_eq!(result.consumed().get(3), None);
    }

    #[test]
    fn replacements_from_both_kinds() {
        const MILK: u16 = 29;
        const BUCKET: u16 = 27;
        let milk = IngredientMatcher::id(MILK).replacement(ItemStack::new(1, BUCKET));
        let recipe = RecipeBuilder::new("milky_sticks")
            .output(ItemStack::new(1, TORCH))
            .shapeless(
                vec![milk],
                vec![RepeatableIngredientMatcher::new(
                    IngredientMatcher::id(STICK).replacement(ItemStack::new(1, COAL)),
                )],
            )
            .unwrap();
        let result = recipe
            .matches(&grid(2, &[stack(STICK), stack(MILK), None, stack(STICK)]))
            .unwrap();
        assert_eq!(result.replacements().len(), 3);
        assert_eq!(result.replacements().get(&1), Some(&ItemStack::new(1, BUCKET)));
        assert_eq!(result.replacements().get(&3), Some(&ItemStack::new(1, COAL)));
    }
}
