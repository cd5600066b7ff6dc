use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

use lantern_core::{Actor, ItemStack, ANY_META};

use crate::CraftingGrid;

pub type ItemPredicateFn = dyn Fn(&ItemStack) -> bool + Send + Sync;
pub type Validator = Arc<dyn Fn(Option<&Actor>, &ItemStack) -> bool + Send + Sync>;
pub type DynamicReplacement =
    Arc<dyn Fn(Option<&Actor>, &CraftingGrid) -> Option<ItemStack> + Send + Sync>;
pub type MatchedTransform = Arc<dyn Fn(Vec<ItemStack>, &[ItemStack]) -> Vec<ItemStack> + Send + Sync>;
pub type GridTransform = Arc<dyn Fn(Vec<ItemStack>, &CraftingGrid) -> Vec<ItemStack> + Send + Sync>;

/// Which stacks a matcher accepts, before amount and validators are checked.
#[derive(Clone)]
pub enum ItemPredicate {
    /// Any of these items. Counts are ignored, [`ANY_META`] accepts every
    /// variant.
    Items(Vec<ItemStack>),
    Custom(Arc<ItemPredicateFn>),
}

impl ItemPredicate {
    pub fn test(&self, stack: &ItemStack) -> bool {
        match self {
            ItemPredicate::Items(items) => items.iter().any(|item| item.is_same_item(stack)),
            ItemPredicate::Custom(predicate) => predicate(stack),
        }
    }
}

impl Debug for ItemPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemPredicate::Items(items) => f.debug_tuple("Items").field(items).finish(),
            ItemPredicate::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Requirement for a single slot.
///
/// Matchers are immutable once built; everything a match attempt accumulates
/// lives in the attempt itself.
#[derive(Clone)]
pub struct IngredientMatcher {
    predicate: ItemPredicate,
    amount: u8,
    replacement: Option<ItemStack>,
    dynamic_replacement: Option<DynamicReplacement>,
    validators: Vec<Validator>,
}

impl IngredientMatcher {
    pub fn new(predicate: ItemPredicate) -> Self {
        Self {
            predicate,
            amount: 1,
            replacement: None,
            dynamic_replacement: None,
            validators: vec![],
        }
    }

    /// Accepts `stack`'s item, its metadata must match unless it is [`ANY_META`].
    pub fn item(stack: ItemStack) -> Self {
        Self::new(ItemPredicate::Items(vec![stack]))
    }

    /// Accepts every variant of an item.
    pub fn id(item_id: u16) -> Self {
        Self::item(ItemStack::new(1, item_id).with_meta(ANY_META))
    }

    pub fn any_of(items: impl IntoIterator<Item = ItemStack>) -> Self {
        Self::new(ItemPredicate::Items(items.into_iter().collect()))
    }

    pub fn custom(predicate: impl Fn(&ItemStack) -> bool + Send + Sync + 'static) -> Self {
        Self::new(ItemPredicate::Custom(Arc::new(predicate)))
    }

    /// How many items the slot must hold and a craft takes. Zero is treated
    /// as one.
    #[must_use]
    pub fn amount(mut self, amount: u8) -> Self {
        self.amount = amount.max(1);
        self
    }

    /// Item left in the slot once the ingredient is used up.
    #[must_use]
    pub fn replacement(mut self, replacement: ItemStack) -> Self {
        self.replacement = Some(replacement);
        self
    }

    /// Computes the replacement from the staged grid; takes precedence over
    /// [`IngredientMatcher::replacement`] when it yields an item.
    #[must_use]
    pub fn dynamic_replacement(
        mut self,
        replacement: impl Fn(Option<&Actor>, &CraftingGrid) -> Option<ItemStack>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.dynamic_replacement = Some(Arc::new(replacement));
        self
    }

    /// Extra check on top of the item predicate. All validators must pass.
    #[must_use]
    pub fn validator(
        mut self,
        validator: impl Fn(Option<&Actor>, &ItemStack) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn predicate(&self) -> &ItemPredicate {
        &self.predicate
    }

    pub fn required_amount(&self) -> u8 {
        self.amount
    }

    /// The part of `stack` a craft would consume, or `None` if the stack is
    /// rejected.
    pub fn is_valid(&self, actor: Option<&Actor>, stack: &ItemStack) -> Option<ItemStack> {
        if stack.is_empty() || stack.item_count < self.amount || !self.predicate.test(stack) {
            return None;
        }
        self.validators
            .iter()
            .all(|validator| validator(actor, stack))
            .then(|| stack.with_count(self.amount))
    }

    pub fn get_replacement(&self, actor: Option<&Actor>, grid: &CraftingGrid) -> Option<ItemStack> {
        self.dynamic_replacement
            .as_ref()
            .and_then(|replacement| replacement(actor, grid))
            .or(self.replacement)
    }
}

impl Debug for IngredientMatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngredientMatcher")
            .field("predicate", &self.predicate)
            .field("amount", &self.amount)
            .field("replacement", &self.replacement)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

/// An ingredient that binds to every stack it accepts. Once the whole recipe
/// matched, the result is passed through `transform_matched` with all bound
/// stacks and then through `transform_grid` with the staged grid.
///
/// With a limit, stacks beyond it are not bound, so a grid holding more of
/// them than allowed does not match.
#[derive(Clone)]
pub struct RepeatableIngredientMatcher {
    matcher: IngredientMatcher,
    limit: Option<usize>,
    matched_transform: Option<MatchedTransform>,
    grid_transform: Option<GridTransform>,
}

impl RepeatableIngredientMatcher {
    pub fn new(matcher: IngredientMatcher) -> Self {
        Self {
            matcher,
            limit: None,
            matched_transform: None,
            grid_transform: None,
        }
    }

    /// Bind at most `limit` stacks.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether another stack can be bound after `bound` stacks already were.
    pub fn accepts_more(&self, bound: usize) -> bool {
        self.limit.map_or(true, |limit| bound < limit)
    }

    #[must_use]
    pub fn with_matched_transform(
        mut self,
        transform: impl Fn(Vec<ItemStack>, &[ItemStack]) -> Vec<ItemStack> + Send + Sync + 'static,
    ) -> Self {
        self.matched_transform = Some(Arc::new(transform));
        self
    }

    #[must_use]
    pub fn with_grid_transform(
        mut self,
        transform: impl Fn(Vec<ItemStack>, &CraftingGrid) -> Vec<ItemStack> + Send + Sync + 'static,
    ) -> Self {
        self.grid_transform = Some(Arc::new(transform));
        self
    }

    pub fn matcher(&self) -> &IngredientMatcher {
        &self.matcher
    }

    pub fn transform_matched(&self, result: Vec<ItemStack>, matched: &[ItemStack]) -> Vec<ItemStack> {
        match &self.matched_transform {
            Some(transform) => transform(result, matched),
            None => result,
        }
    }

    pub fn transform_grid(&self, result: Vec<ItemStack>, grid: &CraftingGrid) -> Vec<ItemStack> {
        match &self.grid_transform {
            Some(transform) => transform(result, grid),
            None => result,
        }
    }
}

impl Deref for RepeatableIngredientMatcher {
    type Target = IngredientMatcher;

    fn deref(&self) -> &Self::Target {
        &self.matcher
    }
}

impl Debug for RepeatableIngredientMatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatableIngredientMatcher")
            .field("matcher", &self.matcher)
            .field("limit", &self.limit)
            .field("matched_transform", &self.matched_transform.is_some())
            .field("grid_transform", &self.grid_transform.is_some())
            .finish()
    }
}
