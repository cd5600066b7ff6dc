//! Recipes whose result depends on the exact items used, built in code rather
//! than from data files.

use lantern_core::{DyeColor, ItemStack, RGBColor, ANY_META};

use super::loader::item_id;
use super::{IngredientMatcher, Recipe, RecipeBuilder, RepeatableIngredientMatcher};
use crate::RecipeError;

const LEATHER_ARMOR: [&str; 4] = [
    "leather_helmet",
    "leather_chestplate",
    "leather_leggings",
    "leather_boots",
];

// Book generations: original, copy, copy of a copy. Only the first two can be
// copied.
const COPYABLE_GENERATIONS: u16 = 2;
const MAX_BOOK_COPIES: usize = 8;

const MAX_FLIGHT_DURATION: usize = 3;
const ROCKETS_PER_CRAFT: u8 = 3;

/// A leather armour piece plus any number of dyes. The dyes are mixed into the
/// armour's current colour.
pub fn armor_dye(builder: RecipeBuilder) -> Result<Recipe, RecipeError> {
    let armor = LEATHER_ARMOR
        .iter()
        .map(|name| item_id(name))
        .collect::<Result<Vec<_>, _>>()?;

    let piece = IngredientMatcher::any_of(
        armor
            .iter()
            .map(|&id| ItemStack::new(1, id).with_meta(ANY_META)),
    );
    let dyes = RepeatableIngredientMatcher::new(
        IngredientMatcher::id(item_id("dye")?)
            .validator(|_, stack| DyeColor::from_meta(stack.item_meta).is_some()),
    )
    .with_matched_transform(|result, matched| {
        result
            .into_iter()
            .map(|piece| {
                let colors = RGBColor::from_meta(piece.item_meta).into_iter().chain(
                    matched
                        .iter()
                        .filter_map(|dye| DyeColor::from_meta(dye.item_meta))
                        .map(DyeColor::rgb),
                );
                match RGBColor::blend(colors) {
                    Some(color) => piece.with_meta(color.to_meta()),
                    None => piece,
                }
            })
            .collect()
    });

    builder
        .computed_output(move |_, grid| {
            grid.stacks()
                .map(|(_, stack)| *stack)
                .find(|stack| armor.contains(&stack.item_id))
                .map(|stack| stack.with_count(1))
                .unwrap_or_default()
        })
        .shapeless(vec![piece], vec![dyes])
}

/// A written book plus up to eight blank writable books. Every blank becomes a
/// copy one generation further from the original, which stays in the grid.
pub fn book_cloning(builder: RecipeBuilder) -> Result<Recipe, RecipeError> {
    let written = item_id("written_book")?;
    let writable = item_id("writable_book")?;

    let original = IngredientMatcher::id(written)
        .validator(|_, stack| stack.item_meta < COPYABLE_GENERATIONS)
        .dynamic_replacement(move |_, grid| {
            grid.stacks()
                .map(|(_, stack)| *stack)
                .find(|stack| stack.item_id == written)
                .map(|stack| stack.with_count(1))
        });
    let blanks = RepeatableIngredientMatcher::new(IngredientMatcher::id(writable))
        .with_limit(MAX_BOOK_COPIES)
        .with_matched_transform(|result, matched| {
            let copies = u8::try_from(matched.len()).unwrap_or(u8::MAX);
            result
                .into_iter()
                .map(|copy| copy.with_count(copies))
                .collect()
        });

    builder
        .computed_output(move |_, grid| {
            grid.stacks()
                .map(|(_, stack)| *stack)
                .find(|stack| stack.item_id == written)
                .map(|stack| ItemStack::new(1, written).with_meta(stack.item_meta + 1))
                .unwrap_or_default()
        })
        .shapeless(vec![original], vec![blanks])
}

/// Paper and one to three gunpowder. Each gunpowder adds a second of flight.
pub fn firework_rocket(builder: RecipeBuilder) -> Result<Recipe, RecipeError> {
    let powder = RepeatableIngredientMatcher::new(IngredientMatcher::id(item_id("gunpowder")?))
        .with_limit(MAX_FLIGHT_DURATION)
        .with_matched_transform(|result, matched| {
            let flight = u16::try_from(matched.len()).unwrap_or(u16::MAX);
            result
                .into_iter()
                .map(|rocket| rocket.with_meta(flight))
                .collect()
        });

    builder
        .output(ItemStack::new(ROCKETS_PER_CRAFT, item_id("firework_rocket")?))
        .shapeless(vec![IngredientMatcher::id(item_id("paper")?)], vec![powder])
}

#[cfg(test)]
mod test {
    use lantern_core::item::get_item_id;
    use lantern_core::{DyeColor, ItemStack, RGBColor};

    use super::{armor_dye, book_cloning, firework_rocket};
    use crate::crafting::RecipeBuilder;
    use crate::CraftingGrid;

    fn item(name: &str) -> ItemStack {
        ItemStack::new(1, get_item_id(name).unwrap())
    }

    fn dye(color: DyeColor) -> ItemStack {
        item("dye").with_meta(color.meta())
    }

    fn grid(items: &[ItemStack]) -> CraftingGrid {
        let mut grid = CraftingGrid::new(3, 3);
        for (slot, stack) in items.iter().enumerate() {
            grid.set(slot, Some(*stack));
        }
        grid
    }

    #[test]
    fn dyes_leather_armor() {
        let recipe = armor_dye(RecipeBuilder::new("armor_dye")).unwrap();
        let helmet = item("leather_helmet");

        let result = recipe.matches(&grid(&[helmet, dye(DyeColor::Red)])).unwrap();
        let dyed = result.outputs()[0];
        assert_eq!(dyed.item_id, helmet.item_id);
        assert_eq!(dyed.item_count, 1);
        assert_eq!(dyed.item_meta, DyeColor::Red.rgb().to_meta());

        // Re-dyeing mixes with the existing colour.
        let result = recipe
            .matches(&grid(&[dyed, dye(DyeColor::Blue), dye(DyeColor::Yellow)]))
            .unwrap();
        let expected = RGBColor::blend([
            RGBColor::from_meta(dyed.item_meta).unwrap(),
            DyeColor::Blue.rgb(),
            DyeColor::Yellow.rgb(),
        ])
        .unwrap();
        assert_eq!(result.outputs()[0].item_meta, expected.to_meta());
    }

    #[test]
    fn armor_dye_needs_one_piece_and_a_dye() {
        let recipe = armor_dye(RecipeBuilder::new("armor_dye")).unwrap();
        let boots = item("leather_boots");
        assert!(recipe.matches(&grid(&[boots])).is_none());
        assert!(recipe
            .matches(&grid(&[boots, boots, dye(DyeColor::Red)]))
            .is_none());
        assert!(recipe
            .matches(&grid(&[boots, item("dye").with_meta(200)]))
            .is_none());
    }

    #[test]
    fn clones_books() {
        let recipe = book_cloning(RecipeBuilder::new("book_cloning")).unwrap();
        let original = item("written_book");
        let blank = item("writable_book");

        let result = recipe.matches(&grid(&[blank, original, blank])).unwrap();
        assert_eq!(
            result.outputs(),
            &[ItemStack::new(2, original.item_id).with_meta(1)]
        );
        assert_eq!(result.replacements().len(), 1);
        assert_eq!(result.replacements().get(&1), Some(&original));

        let copy_of_copy = original.with_meta(2);
        assert!(recipe.matches(&grid(&[copy_of_copy, blank])).is_none());
        assert!(recipe.matches(&grid(&[original])).is_none());
    }

    #[test]
    fn copies_are_limited() {
        let recipe = book_cloning(RecipeBuilder::new("book_cloning")).unwrap();
        let original = item("written_book");
        let blank = item("writable_book");

        let mut grid = CraftingGrid::new(3, 3);
        grid.set(0, Some(original));
        for slot in 1..9 {
            grid.set(slot, Some(blank));
        }
        let result = recipe.matches(&grid).unwrap();
        assert_eq!(result.outputs()[0].item_count, 8);

        let mut crowded = CraftingGrid::new(16, 17);
        crowded.set(0, Some(original));
        for slot in 1..257 {
            crowded.set(slot, Some(blank));
        }
        assert!(recipe.matches(&crowded).is_none());
    }

    #[test]
    fn rocket_takes_one_to_three_gunpowder() {
        let recipe = firework_rocket(RecipeBuilder::new("firework_rocket")).unwrap();
        let paper = item("paper");
        let gunpowder = item("gunpowder");
        let rocket = get_item_id("firework_rocket").unwrap();

        let result = recipe.matches(&grid(&[paper, gunpowder, gunpowder])).unwrap();
        assert_eq!(result.outputs(), &[ItemStack::new(3, rocket).with_meta(2)]);

        let result = recipe
            .matches(&grid(&[gunpowder, gunpowder, paper, gunpowder]))
            .unwrap();
        assert_eq!(result.outputs(), &[ItemStack::new(3, rocket).with_meta(3)]);

        assert!(recipe
            .matches(&grid(&[paper, gunpowder, gunpowder, gunpowder, gunpowder]))
            .is_none());
        assert!(recipe
            .matches(&grid(&[gunpowder, gunpowder, paper, gunpowder, gunpowder, gunpowder]))
            .is_none());
        assert!(recipe.matches(&grid(&[paper])).is_none());
    }
}
