use std::fmt::{Display, Formatter};

use itertools::Itertools;
use lantern_core::{Actor, ItemStack};

use crate::RecipeError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SlotKind {
    #[default]
    Input,
    /// Shows an item without offering it for crafting, e.g. a disabled crafter
    /// slot or a result preview. Shapeless scans skip these.
    Display,
}

/// A rectangular inventory a recipe can be matched against.
///
/// Slots are addressed row-major unless an implementation overrides
/// [`GridInventory::slot_index`]. `size()` must equal `rows() * columns()`;
/// matching treats anything else as a bug in the implementation and panics.
pub trait GridInventory {
    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn size(&self) -> usize;

    fn item_at(&self, slot: usize) -> Option<&ItemStack>;

    fn item(&self, row: usize, column: usize) -> Option<&ItemStack> {
        self.item_at(self.slot_index(row, column))
    }

    fn slot_kind(&self, _slot: usize) -> SlotKind {
        SlotKind::Input
    }

    fn actor(&self) -> Option<&Actor> {
        None
    }

    fn slot_index(&self, row: usize, column: usize) -> usize {
        row * self.columns() + column
    }

    /// The stack in `slot`, `None` for air and zero-sized stacks too.
    fn occupied(&self, slot: usize) -> Option<&ItemStack> {
        self.item_at(slot).filter(|stack| !stack.is_empty())
    }
}

pub(crate) fn assert_consistent(inventory: &dyn GridInventory) {
    assert_eq!(
        inventory.size(),
        inventory.rows() * inventory.columns(),
        "Inventory reports {} slots for a {}x{} grid",
        inventory.size(),
        inventory.rows(),
        inventory.columns()
    );
}

/// Staging area of a match: what a successful craft takes out of each slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingGrid {
    rows: usize,
    columns: usize,
    items: Vec<Option<ItemStack>>,
}

impl CraftingGrid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            items: vec![None; rows * columns],
        }
    }

    pub fn from_items(
        rows: usize,
        columns: usize,
        items: Vec<Option<ItemStack>>,
    ) -> Result<Self, RecipeError> {
        if items.len() != rows * columns {
            return Err(RecipeError::GridSizeMismatch {
                rows,
                columns,
                len: items.len(),
            });
        }
        Ok(Self {
            rows,
            columns,
            items,
        })
    }

    pub fn items(&self) -> &[Option<ItemStack>] {
        &self.items
    }

    /// Panics if `slot` is outside the grid.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) {
        self.items[slot] = stack;
    }

    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.items.get(slot).and_then(Option::as_ref)
    }

    /// Non-empty stacks with their slot index.
    pub fn stacks(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(slot, stack)| Some((slot, stack.as_ref()?)))
            .filter(|(_, stack)| !stack.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.stacks().next().is_none()
    }
}

impl GridInventory for CraftingGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, slot: usize) -> Option<&ItemStack> {
        self.get(slot)
    }
}

impl Display for CraftingGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rows = self.items.chunks(self.columns.max(1)).map(|row| {
            row.iter()
                .map(|stack| match stack {
                    Some(stack) if !stack.is_empty() => stack.to_string(),
                    _ => "_".to_string(),
                })
                .join(" | ")
        });
        write!(f, "{}", rows.format("\n"))
    }
}
