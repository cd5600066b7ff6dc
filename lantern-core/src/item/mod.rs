use serde::{Deserialize, Serialize};

mod item_registry;
pub use item_registry::{get_item, get_item_id, get_item_name, Item, ITEMS};

pub const AIR_ID: u16 = 0;

/// Metadata value matchers use to accept every variant of an item.
pub const ANY_META: u16 = u16::MAX;

/// An empty stack (`Default`) is air.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_count: u8,
    // Numerical id from the item catalogue, not the namespaced name.
    pub item_id: u16,
    // Variant / damage / colour depending on the item.
    #[serde(default)]
    pub item_meta: u16,
}

impl ItemStack {
    pub const fn new(item_count: u8, item_id: u16) -> Self {
        Self {
            item_count,
            item_id,
            item_meta: 0,
        }
    }

    #[must_use]
    pub const fn with_meta(mut self, item_meta: u16) -> Self {
        self.item_meta = item_meta;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, item_count: u8) -> Self {
        self.item_count = item_count;
        self
    }

    /// Looks the item up by name in [`ITEMS`].
    pub fn from_name(name: &str, item_count: u8) -> Option<Self> {
        get_item_id(name).map(|id| Self::new(item_count, id))
    }

    pub const fn is_empty(&self) -> bool {
        self.item_id == AIR_ID || self.item_count == 0
    }

    /// Same item type, metadata equal unless either side is [`ANY_META`].
    /// Counts are not compared.
    pub fn is_same_item(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
            && (self.item_meta == other.item_meta
                || self.item_meta == ANY_META
                || other.item_meta == ANY_META)
    }

    pub fn name(&self) -> Option<&'static str> {
        get_item_name(self.item_id)
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}x {name}", self.item_count)?,
            None => write!(f, "{}x #{}", self.item_count, self.item_id)?,
        }
        if self.item_meta != 0 {
            write!(f, ":{}", self.item_meta)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{ItemStack, ANY_META};

    #[test]
    fn empty_stacks() {
        assert!(ItemStack::new(1, 0).is_empty());
        assert!(ItemStack::new(0, 5).is_empty());
        assert!(!ItemStack::new(1, 5).is_empty());
    }

    #[test]
    fn wildcard_meta_matches_any_variant() {
        let wool = ItemStack::new(1, 40).with_meta(3);
        assert!(wool.is_same_item(&ItemStack::new(64, 40).with_meta(ANY_META)));
        assert!(!wool.is_same_item(&ItemStack::new(1, 40).with_meta(4)));
        assert!(!wool.is_same_item(&ItemStack::new(1, 41).with_meta(3)));
    }

    #[test]
    fn display_uses_catalogue_names() {
        let stick = ItemStack::from_name("minecraft:stick", 4).unwrap();
        assert_eq!(stick.to_string(), "4x stick");
    }
}
