use std::{collections::HashMap, sync::LazyLock};

use serde::Deserialize;

const ITEMS_JSON: &str = include_str!("../../../assets/items.json");

pub static ITEMS: LazyLock<HashMap<String, Item>> = LazyLock::new(|| {
    let items: Vec<Item> =
        serde_json::from_str(ITEMS_JSON).expect("Could not parse items.json registry.");
    items
        .into_iter()
        .map(|item| (item.name.clone(), item))
        .collect()
});

static ITEM_NAMES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    ITEMS
        .values()
        .map(|item| (item.id, item.name.as_str()))
        .collect()
});

#[derive(Deserialize, Clone, Debug)]
pub struct Item {
    pub id: u16,
    pub name: String,
    pub max_stack: u8,
    /// Item left behind in the crafting slot when this one is used up,
    /// e.g. a milk bucket leaves a bucket.
    #[serde(default)]
    pub remainder: Option<String>,
}

pub fn get_item(name: &str) -> Option<&'static Item> {
    ITEMS.get(name.strip_prefix("minecraft:").unwrap_or(name))
}

pub fn get_item_id(name: &str) -> Option<u16> {
    get_item(name).map(|item| item.id)
}

pub fn get_item_name(id: u16) -> Option<&'static str> {
    ITEM_NAMES.get(&id).copied()
}
