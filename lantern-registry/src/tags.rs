use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt::Formatter;
use std::sync::LazyLock;

// Tags nesting deeper than this are treated as a cycle.
const MAX_TAG_DEPTH: usize = 16;

pub static ITEM_TAGS: LazyLock<HashMap<String, Vec<TagType>>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../assets/tags.json")).expect("Valid item tags")
});

pub fn get_tag_values(tag: &str) -> Option<&'static Vec<TagType>> {
    ITEM_TAGS.get(tag.strip_prefix("minecraft:").unwrap_or(tag))
}

/// Flattens an item tag into the item names it contains, following nested
/// tags. Returns `None` for unknown tags and for cyclic definitions.
pub fn resolve_item_tag(tag: &str) -> Option<Vec<&'static str>> {
    fn resolve(tag: &str, depth: usize, out: &mut Vec<&'static str>) -> Option<()> {
        if depth > MAX_TAG_DEPTH {
            log::warn!("Item tag {tag} nests too deep, is it cyclic?");
            return None;
        }
        for value in get_tag_values(tag)? {
            match value {
                TagType::Item(item) => {
                    if !out.contains(&item.as_str()) {
                        out.push(item.as_str());
                    }
                }
                TagType::Tag(tag) => resolve(tag, depth + 1, out)?,
            }
        }
        Some(())
    }

    let mut items = vec![];
    resolve(tag, 0, &mut items)?;
    Some(items)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagType {
    Item(String),
    Tag(String),
}

impl<'de> Deserialize<'de> for TagType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TagVisitor;
        impl Visitor<'_> for TagVisitor {
            type Value = TagType;
            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "valid tag")
            }
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                match v.strip_prefix('#') {
                    Some(v) => Ok(TagType::Tag(v.to_string())),
                    None => Ok(TagType::Item(v.to_string())),
                }
            }
        }
        deserializer.deserialize_str(TagVisitor)
    }
}

#[cfg(test)]
mod test {
    use crate::tags::{resolve_item_tag, ITEM_TAGS};

    #[test]
    // This test assures that all tags that exist are loaded into the tags registry
    fn load_tags() {
        assert!(!ITEM_TAGS.is_empty());
        for tag in ITEM_TAGS.keys() {
            assert!(resolve_item_tag(tag).is_some(), "{tag}");
        }
    }

    #[test]
    fn nested_tags_are_flattened() {
        let fuel = resolve_item_tag("minecraft:fuel").unwrap();
        assert!(fuel.contains(&"charcoal"));
        assert!(fuel.contains(&"birch_planks"));
        assert!(fuel.contains(&"stick"));
        assert_eq!(
            resolve_item_tag("wooden_tool_materials").unwrap(),
            resolve_item_tag("planks").unwrap()
        );
    }

    #[test]
    fn unknown_tag() {
        assert_eq!(resolve_item_tag("not_a_tag"), None);
    }
}
