use std::io::BufRead;

use itertools::Itertools;
use lantern_core::item::get_item_id;
use lantern_core::ItemStack;
use lantern_inventory::crafting::{MatchResult, RecipeRegistry};
use lantern_inventory::{CraftingInventory, InventoryError};
use thiserror::Error;

const EMPTY_SLOT: &str = "_";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown item {0}")]
    UnknownItem(String),
    #[error("Invalid amount in {0}")]
    InvalidCount(String),
    #[error("{found} stacks don't fit into {slots} slots")]
    TooManyStacks { slots: usize, found: usize },
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Parses `<item>[:meta][*count]`, `_` is an empty slot.
pub fn parse_stack(token: &str) -> Result<Option<ItemStack>, ConsoleError> {
    if token == EMPTY_SLOT {
        return Ok(None);
    }
    let (item, count) = match token.rsplit_once('*') {
        Some((item, count)) => (
            item,
            count
                .parse::<u8>()
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| ConsoleError::InvalidCount(token.to_string()))?,
        ),
        None => (token, 1),
    };
    // "minecraft:stick" has a colon too, only a numeric suffix is metadata.
    let (name, meta) = item
        .rsplit_once(':')
        .and_then(|(name, meta)| Some((name, meta.parse::<u16>().ok()?)))
        .unwrap_or((item, 0));
    let id = get_item_id(name).ok_or_else(|| ConsoleError::UnknownItem(name.to_string()))?;
    Ok(Some(ItemStack::new(count, id).with_meta(meta)))
}

/// Fills a grid row by row from whitespace separated stacks. Missing trailing
/// stacks are empty slots.
pub fn parse_grid(line: &str, rows: usize, columns: usize) -> Result<CraftingInventory, ConsoleError> {
    let stacks = line
        .split_whitespace()
        .map(parse_stack)
        .collect::<Result<Vec<_>, _>>()?;
    let slots = rows * columns;
    if stacks.len() > slots {
        return Err(ConsoleError::TooManyStacks {
            slots,
            found: stacks.len(),
        });
    }

    let mut inventory = CraftingInventory::new(rows, columns);
    for (slot, stack) in stacks.into_iter().enumerate() {
        inventory.set_item(slot, stack)?;
    }
    Ok(inventory)
}

pub fn describe(result: &MatchResult) -> String {
    let mut description = format!(
        "{} -> {}",
        result.recipe().id(),
        result.outputs().iter().join(", ")
    );
    if !result.replacements().is_empty() {
        description.push_str(&format!(
            " (leaves {})",
            result
                .replacements()
                .iter()
                .format_with(", ", |(slot, stack), f| f(&format_args!("{stack} in slot {slot}")))
        ));
    }
    description
}

pub fn run(registry: &RecipeRegistry, rows: usize, columns: usize) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read console line: {err}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "stop") {
            break;
        }

        match parse_grid(line, rows, columns) {
            Ok(inventory) => match registry.find_match(&inventory) {
                Some(result) => log::info!("{}", describe(&result)),
                None => log::info!("No recipe matches"),
            },
            Err(err) => log::warn!("{err}"),
        }
    }
}

#[cfg(test)]
mod test {
    use lantern_core::item::get_item_id;
    use lantern_core::ItemStack;
    use lantern_inventory::crafting::{vanilla_recipes, RecipeRegistry};
    use lantern_inventory::GridInventory;

    use super::{describe, parse_grid, parse_stack, ConsoleError};

    fn item(name: &str, count: u8) -> ItemStack {
        ItemStack::new(count, get_item_id(name).unwrap())
    }

    #[test]
    fn parses_stacks() {
        assert_eq!(parse_stack("_"), Ok(None));
        assert_eq!(parse_stack("stick"), Ok(Some(item("stick", 1))));
        assert_eq!(parse_stack("minecraft:stick*16"), Ok(Some(item("stick", 16))));
        assert_eq!(
            parse_stack("dye:15*2"),
            Ok(Some(item("dye", 2).with_meta(15)))
        );
        assert_eq!(
            parse_stack("minecraft:dye:4"),
            Ok(Some(item("dye", 1).with_meta(4)))
        );
        assert_eq!(
            parse_stack("stick*0"),
            Err(ConsoleError::InvalidCount("stick*0".to_string()))
        );
        assert_eq!(
            parse_stack("unobtainium"),
            Err(ConsoleError::UnknownItem("unobtainium".to_string()))
        );
    }

    #[test]
    fn fills_grid_row_major() {
        let inventory = parse_grid("coal _ stick", 2, 2).unwrap();
        assert_eq!(inventory.item(0, 0), Some(&item("coal", 1)));
        assert_eq!(inventory.item(0, 1), None);
        assert_eq!(inventory.item(1, 0), Some(&item("stick", 1)));
        assert_eq!(inventory.item(1, 1), None);

        assert_eq!(
            parse_grid("coal coal coal coal coal", 2, 2).unwrap_err(),
            ConsoleError::TooManyStacks { slots: 4, found: 5 }
        );
    }

    #[test]
    fn describes_matches() {
        let registry = RecipeRegistry::with_recipes(vanilla_recipes().unwrap());
        let inventory = parse_grid("_ honey_bottle", 2, 2).unwrap();
        let result = registry.find_match(&inventory).unwrap();
        assert_eq!(
            describe(&result),
            "sugar_from_honey_bottle -> 3x sugar (leaves 1x glass_bottle in slot 1)"
        );
    }
}
