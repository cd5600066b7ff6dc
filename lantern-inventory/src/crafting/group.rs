use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{MatchResult, Recipe, RecipeId, RecipeInfo, RecipeKind, RecipeTrait};
use crate::GridInventory;

pub type Admission = Arc<dyn Fn(&dyn GridInventory) -> bool + Send + Sync>;

/// Highest priority first, ties in the order recipes were added.
type RecipeKey = (Reverse<i64>, u64);
pub(crate) type RecipeSet = BTreeMap<RecipeKey, Recipe>;

struct LiveSet {
    recipes: Arc<RecipeSet>,
    next_sequence: u64,
}

/// An ordered set of recipes behind a cheap admission check.
///
/// The set can be changed at runtime while other threads match against it;
/// a match works on the snapshot that was current when it started.
/// [`RecipeGroup::reset`] drops every runtime change.
pub struct RecipeGroup {
    info: RecipeInfo,
    admission: Admission,
    original: Arc<RecipeSet>,
    original_sequence: u64,
    live: RwLock<LiveSet>,
}

impl RecipeGroup {
    pub fn new(
        info: RecipeInfo,
        admission: Admission,
        recipes: impl IntoIterator<Item = Recipe>,
    ) -> Self {
        let mut set = RecipeSet::new();
        let mut sequence = 0;
        for recipe in recipes {
            if set.values().any(|existing| existing == &recipe) {
                continue;
            }
            set.insert((Reverse(recipe.priority()), sequence), recipe);
            sequence += 1;
        }
        let original = Arc::new(set);
        Self {
            info,
            admission,
            original: original.clone(),
            original_sequence: sequence,
            live: RwLock::new(LiveSet {
                recipes: original,
                next_sequence: sequence,
            }),
        }
    }

    /// Returns `false` if this exact recipe is already part of the group.
    pub fn add(&self, recipe: Recipe) -> bool {
        let mut live = self.live.write();
        if live.recipes.values().any(|existing| existing == &recipe) {
            return false;
        }
        log::debug!("Adding recipe {} to {}", recipe.id(), self.info.id);
        let key = (Reverse(recipe.priority()), live.next_sequence);
        live.next_sequence += 1;
        Arc::make_mut(&mut live.recipes).insert(key, recipe);
        true
    }

    pub fn remove(&self, recipe: &Recipe) -> bool {
        self.remove_where(|candidate| candidate == recipe)
    }

    /// Removes every recipe registered under `id`.
    pub fn remove_by_id(&self, id: &RecipeId) -> bool {
        self.remove_where(|candidate| candidate.id() == id)
    }

    fn remove_where(&self, predicate: impl Fn(&Recipe) -> bool) -> bool {
        let mut live = self.live.write();
        if !live.recipes.values().any(&predicate) {
            return false;
        }
        let recipes = Arc::make_mut(&mut live.recipes);
        recipes.retain(|_, recipe| {
            let remove = predicate(recipe);
            if remove {
                log::debug!("Removing recipe {} from {}", recipe.id(), self.info.id);
            }
            !remove
        });
        true
    }

    /// Restores the recipes the group was created with.
    pub fn reset(&self) {
        let mut live = self.live.write();
        log::debug!("Resetting recipe group {}", self.info.id);
        live.recipes = self.original.clone();
        live.next_sequence = live.next_sequence.max(self.original_sequence);
    }

    /// Current recipes in the order they are tried.
    pub fn recipes(&self) -> Vec<Recipe> {
        self.snapshot().values().cloned().collect()
    }

    pub fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.snapshot()
            .values()
            .find(|recipe| recipe.id() == id)
            .cloned()
    }

    pub fn contains(&self, recipe: &Recipe) -> bool {
        self.snapshot().values().any(|existing| existing == recipe)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn admits(&self, inventory: &dyn GridInventory) -> bool {
        (self.admission)(inventory)
    }

    pub(crate) fn snapshot(&self) -> Arc<RecipeSet> {
        self.live.read().recipes.clone()
    }
}

impl RecipeTrait for RecipeGroup {
    fn info(&self) -> &RecipeInfo {
        &self.info
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Group
    }

    /// The result names the sub-recipe that matched, not the group.
    fn match_grid(&self, _this: &Recipe, inventory: &dyn GridInventory) -> Option<MatchResult> {
        if !self.admits(inventory) {
            return None;
        }
        self.snapshot()
            .values()
            .find_map(|recipe| recipe.matches(inventory))
    }

    fn as_group(&self) -> Option<&RecipeGroup> {
        Some(self)
    }
}
