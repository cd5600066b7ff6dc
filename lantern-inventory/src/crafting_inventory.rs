use lantern_core::{Actor, ItemStack};

use crate::crafting::MatchResult;
use crate::{CraftingGrid, GridInventory, InventoryError, SlotKind};

/// A crafting surface, e.g. the 2x2 grid of a player's inventory or a crafting
/// table.
#[derive(Debug, Clone)]
pub struct CraftingInventory {
    rows: usize,
    columns: usize,
    slots: Vec<Option<ItemStack>>,
    kinds: Vec<SlotKind>,
    actor: Option<Actor>,
}

impl CraftingInventory {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            slots: vec![None; rows * columns],
            kinds: vec![SlotKind::Input; rows * columns],
            actor: None,
        }
    }

    pub fn player() -> Self {
        Self::new(2, 2)
    }

    pub fn crafting_table() -> Self {
        Self::new(3, 3)
    }

    #[must_use]
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Set the contents of a slot
    ///
    /// ## Item allowed override
    /// Display slots refuse items unless this is set, which lets plugins put
    /// previews into them.
    pub fn set_slot(
        &mut self,
        slot: usize,
        item: Option<ItemStack>,
        item_allowed_override: bool,
    ) -> Result<(), InventoryError> {
        let kind = *self.kinds.get(slot).ok_or(InventoryError::InvalidSlot)?;
        if kind == SlotKind::Display && item.is_some() && !item_allowed_override {
            return Err(InventoryError::DisplaySlot(slot));
        }
        self.slots[slot] = item;
        Ok(())
    }

    pub fn set_item(&mut self, slot: usize, item: Option<ItemStack>) -> Result<(), InventoryError> {
        self.set_slot(slot, item, false)
    }

    pub fn set_slot_kind(&mut self, slot: usize, kind: SlotKind) -> Result<(), InventoryError> {
        let slot_kind = self.kinds.get_mut(slot).ok_or(InventoryError::InvalidSlot)?;
        *slot_kind = kind;
        Ok(())
    }

    pub fn get_slot(&self, slot: usize) -> Result<Option<&ItemStack>, InventoryError> {
        self.slots
            .get(slot)
            .map(Option::as_ref)
            .ok_or(InventoryError::InvalidSlot)
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Takes what `result` consumed out of the grid and puts the replacements
    /// in place. Replacements that don't fit because the slot still holds
    /// items are returned to the caller, together with the outputs.
    ///
    /// Nothing is changed if the grid no longer holds what the match consumed.
    pub fn apply_match(&mut self, result: &MatchResult) -> Result<Vec<ItemStack>, InventoryError> {
        let consumed = result.consumed();
        self.check_grid(consumed)?;
        for (slot, taken) in consumed.stacks() {
            match &self.slots[slot] {
                Some(stack) if stack.is_same_item(taken) && stack.item_count >= taken.item_count => {}
                _ => return Err(InventoryError::InsufficientItems(slot)),
            }
        }

        let mut leftovers = result.outputs().to_vec();
        for (slot, taken) in consumed.stacks() {
            let stack = &mut self.slots[slot];
            if let Some(current) = stack {
                current.item_count -= taken.item_count;
                if current.item_count == 0 {
                    *stack = None;
                }
            }
        }
        for (&slot, replacement) in result.replacements() {
            match &self.slots[slot] {
                None => self.slots[slot] = Some(*replacement),
                Some(_) => leftovers.push(*replacement),
            }
        }
        log::debug!("Crafted {} with {}", result.recipe().id(), consumed.stacks().count());
        Ok(leftovers)
    }

    fn check_grid(&self, grid: &CraftingGrid) -> Result<(), InventoryError> {
        if grid.rows() != self.rows || grid.columns() != self.columns {
            return Err(InventoryError::GridMismatch {
                expected_rows: grid.rows(),
                expected_columns: grid.columns(),
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

impl GridInventory for CraftingInventory {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn size(&self) -> usize {
        self.slots.len()
    }

    fn item_at(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn slot_kind(&self, slot: usize) -> SlotKind {
        self.kinds.get(slot).copied().unwrap_or_default()
    }

    fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }
}
