use itertools::iproduct;

use super::result::Staging;
use super::{MatchResult, Recipe, RecipeInfo, RecipeKind, RecipeOutput, RecipePattern, RecipeTrait};
use crate::GridInventory;

/// A recipe whose ingredients must keep their relative layout. The pattern may
/// sit anywhere in a larger grid as long as every other slot is empty.
pub struct ShapedRecipe {
    info: RecipeInfo,
    pattern: RecipePattern,
    output: RecipeOutput,
}

impl ShapedRecipe {
    pub fn new(info: RecipeInfo, pattern: RecipePattern, output: RecipeOutput) -> Self {
        Self {
            info,
            pattern,
            output,
        }
    }

    pub fn pattern(&self) -> &RecipePattern {
        &self.pattern
    }

    pub fn output(&self) -> &RecipeOutput {
        &self.output
    }

    /// Where the pattern's top-left corner lands in `inventory`, found by lining
    /// up the first occupied cell of both.
    fn offset(&self, inventory: &dyn GridInventory) -> Option<(usize, usize)> {
        let (rows, columns) = (inventory.rows(), inventory.columns());
        if self.pattern.rows() == rows && self.pattern.columns() == columns {
            return Some((0, 0));
        }

        let (first_row, first_column) = iproduct!(0..rows, 0..columns).find(|&(row, column)| {
            inventory
                .occupied(inventory.slot_index(row, column))
                .is_some()
        })?;
        let (anchor_row, anchor_column) = self.pattern.anchor();
        let row_offset = first_row.checked_sub(anchor_row)?;
        let column_offset = first_column.checked_sub(anchor_column)?;

        (row_offset + self.pattern.rows() <= rows && column_offset + self.pattern.columns() <= columns)
            .then_some((row_offset, column_offset))
    }
}

impl RecipeTrait for ShapedRecipe {
    fn info(&self) -> &RecipeInfo {
        &self.info
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Shaped
    }

    fn match_grid(&self, this: &Recipe, inventory: &dyn GridInventory) -> Option<MatchResult> {
        let (rows, columns) = (inventory.rows(), inventory.columns());
        if self.pattern.rows() > rows || self.pattern.columns() > columns {
            return None;
        }
        let (row_offset, column_offset) = self.offset(inventory)?;

        let mut staging = Staging::new(inventory);
        // Cells outside the overlaid pattern have no matcher and must be empty.
        for (row, column) in iproduct!(0..rows, 0..columns) {
            let slot = inventory.slot_index(row, column);
            let matcher = match (row.checked_sub(row_offset), column.checked_sub(column_offset)) {
                (Some(row), Some(column)) => self.pattern.recipe_item(row, column),
                _ => None,
            };
            match (matcher, inventory.occupied(slot)) {
                (Some(matcher), Some(stack)) => {
                    let consumed = matcher.is_valid(staging.actor(), stack)?;
                    staging.stage(slot, consumed, matcher);
                }
                (None, None) => {}
                _ => return None,
            }
        }

        Some(staging.finish(this, |actor, grid| self.output.compute(actor, grid)))
    }
}
