use std::collections::HashMap;

use itertools::Itertools;

use super::IngredientMatcher;
use crate::RecipeError;

/// Cell character meaning "must stay empty".
pub const EMPTY_CELL: char = ' ';

/// Character grid of a shaped recipe plus the matcher behind every character.
#[derive(Clone, Debug)]
pub struct RecipePattern {
    rows: usize,
    columns: usize,
    cells: Vec<Option<char>>,
    ingredients: HashMap<char, IngredientMatcher>,
    // First non-empty cell in row-major order.
    anchor: (usize, usize),
}

impl RecipePattern {
    pub fn new<S: AsRef<str>>(
        pattern: &[S],
        ingredients: HashMap<char, IngredientMatcher>,
    ) -> Result<Self, RecipeError> {
        let columns = pattern
            .first()
            .ok_or(RecipeError::EmptyPattern)?
            .as_ref()
            .chars()
            .count();

        let mut cells = Vec::with_capacity(pattern.len() * columns);
        for (row, line) in pattern.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width == 0 {
                return Err(RecipeError::EmptyRow(row));
            }
            if width != columns {
                return Err(RecipeError::RaggedPattern {
                    row,
                    expected: columns,
                    found: width,
                });
            }
            for c in line.chars() {
                if c == EMPTY_CELL {
                    cells.push(None);
                } else if ingredients.contains_key(&c) {
                    cells.push(Some(c));
                } else {
                    return Err(RecipeError::MissingKey(c));
                }
            }
        }

        if let Some(unused) = ingredients
            .keys()
            .sorted()
            .find(|key| !cells.contains(&Some(**key)))
        {
            return Err(RecipeError::UnusedKey(*unused));
        }

        let first = cells
            .iter()
            .position(Option::is_some)
            .ok_or(RecipeError::NoIngredients)?;

        Ok(Self {
            rows: pattern.len(),
            columns,
            cells,
            ingredients,
            anchor: (first / columns, first % columns),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `None` means the cell must be empty, also returned outside the pattern.
    pub fn recipe_item(&self, row: usize, column: usize) -> Option<&IngredientMatcher> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells[row * self.columns + column].and_then(|c| self.ingredients.get(&c))
    }

    pub fn ingredients(&self) -> &HashMap<char, IngredientMatcher> {
        &self.ingredients
    }

    pub fn anchor(&self) -> (usize, usize) {
        self.anchor
    }
}
