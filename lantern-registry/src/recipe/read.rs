use crate::recipe::recipe_formats::{RecipeKeys, ShapedCrafting, ShapelessCrafting};
use ingredients::Ingredients;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{de, Deserialize, Deserializer};
use std::fmt::Formatter;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeType {
    Blasting,
    CampfireCooking,
    Crafting(CraftingType),
    Smelting,
    Smithing(SmithingType),
    Smoking,
    StoneCutting,
}

impl FromStr for RecipeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use CraftingType::*;
        use FireworkCrafting::*;
        use MapCrafting::*;
        use RecipeType::*;
        use SpecialCraftingType::*;
        let s = s.trim_start_matches("minecraft:");
        match s {
            "blasting" => Ok(Blasting),
            "campfire_cooking" => Ok(CampfireCooking),
            "crafting_shaped" => Ok(Crafting(Shaped)),
            "crafting_shapeless" => Ok(Crafting(Shapeless)),
            "crafting_special_bookcloning" => Ok(Crafting(Special(BookCloning))),
            "crafting_special_repairitem" => Ok(Crafting(Special(RepairItem))),
            "crafting_special_armordye" => Ok(Crafting(Special(ArmorDye))),
            "crafting_special_firework_rocket" => Ok(Crafting(Special(Firework(Rocket)))),
            "crafting_special_firework_star" => Ok(Crafting(Special(Firework(Star)))),
            "crafting_special_firework_star_fade" => Ok(Crafting(Special(Firework(StarFade)))),
            "crafting_special_suspiciousstew" => Ok(Crafting(Special(SuspiciousStew))),
            "crafting_special_mapextending" => Ok(Crafting(Special(Map(Extending)))),
            "crafting_special_mapcloning" => Ok(Crafting(Special(Map(Cloning)))),
            "crafting_special_shulkerboxcoloring" => Ok(Crafting(Special(ShulkerboxColoring))),
            "crafting_special_bannerduplicate" => Ok(Crafting(Special(BannerDuplicate))),
            "crafting_special_shielddecoration" => Ok(Crafting(Special(ShieldDecoration))),
            "crafting_special_tippedarrow" => Ok(Crafting(Special(TippedArrow))),
            "crafting_decorated_pot" => Ok(Crafting(DecoratedPot)),
            "smelting" => Ok(Smelting),
            "smithing" => Ok(Smithing(SmithingType::Normal)),
            "smithing_trim" => Ok(Smithing(SmithingType::Trim)),
            "smithing_transform" => Ok(Smithing(SmithingType::Transform)),
            "smoking" => Ok(Smoking),
            "stonecutting" => Ok(StoneCutting),
            _ => Err(format!("Could not find recipe with id: \"{s}\"")),
        }
    }
}

pub mod ingredients {
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::{de, Deserialize, Deserializer};
    use std::fmt::Formatter;

    #[derive(Clone, PartialEq, Debug, Eq, Hash)]
    pub enum IngredientType {
        /// A single item, `meta` of `None` accepts every variant.
        Item { name: String, meta: Option<u16> },
        Tag(String),
    }

    impl IngredientType {
        fn from_name(name: &str) -> Self {
            match name.strip_prefix('#') {
                Some(tag) => IngredientType::Tag(tag.to_string()),
                None => IngredientType::Item {
                    name: name.to_string(),
                    meta: None,
                },
            }
        }
    }

    struct IngredientTypeVisitor;
    impl<'de> Visitor<'de> for IngredientTypeVisitor {
        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            write!(formatter, "valid item type")
        }
        type Value = IngredientType;

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(IngredientType::from_name(v))
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut item: Option<String> = None;
            let mut tag: Option<String> = None;
            let mut meta: Option<u16> = None;
            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "item" => item = Some(map.next_value()?),
                    "tag" => tag = Some(map.next_value()?),
                    "meta" => meta = Some(map.next_value()?),
                    s => return Err(de::Error::unknown_field(s, &["item", "tag", "meta"])),
                }
            }
            match (item, tag) {
                (Some(name), None) => Ok(IngredientType::Item { name, meta }),
                (None, Some(tag)) => Ok(IngredientType::Tag(tag)),
                (Some(_), Some(_)) => Err(de::Error::custom(
                    "ingredient can't be an item and a tag at the same time",
                )),
                (None, None) => Err(de::Error::missing_field("item")),
            }
        }
    }
    impl<'de> Deserialize<'de> for IngredientType {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(IngredientTypeVisitor)
        }
    }

    #[derive(Clone, Debug, Eq, PartialEq, Hash)]
    pub enum IngredientSlot {
        Single(IngredientType),
        Many(Vec<IngredientType>),
    }

    impl IngredientSlot {
        pub fn types(&self) -> &[IngredientType] {
            match self {
                IngredientSlot::Single(ingredient) => std::slice::from_ref(ingredient),
                IngredientSlot::Many(ingredients) => ingredients,
            }
        }
    }

    impl PartialEq<IngredientType> for IngredientSlot {
        fn eq(&self, other: &IngredientType) -> bool {
            match self {
                IngredientSlot::Single(ingredient) => other == ingredient,
                IngredientSlot::Many(ingredients) => ingredients.contains(other),
            }
        }
    }

    impl<'de> Deserialize<'de> for IngredientSlot {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct SlotTypeVisitor;
            impl<'de> Visitor<'de> for SlotTypeVisitor {
                fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                    write!(formatter, "valid ingredient slot")
                }

                type Value = IngredientSlot;

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(IngredientSlot::Single(IngredientTypeVisitor.visit_str(v)?))
                }

                fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    Ok(IngredientSlot::Single(
                        IngredientTypeVisitor.visit_map(map)?,
                    ))
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let mut ingredients: Vec<IngredientType> = vec![];
                    while let Some(element) = seq.next_element()? {
                        ingredients.push(element)
                    }
                    match ingredients.len() {
                        0 => Err(de::Error::invalid_length(0, &"at least one ingredient")),
                        1 => Ok(IngredientSlot::Single(ingredients.remove(0))),
                        _ => Ok(IngredientSlot::Many(ingredients)),
                    }
                }
            }
            deserializer.deserialize_any(SlotTypeVisitor)
        }
    }

    pub struct Ingredients(pub Vec<IngredientSlot>);
    impl<'de> Deserialize<'de> for Ingredients {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct IngredientsVisitor;
            impl<'de> Visitor<'de> for IngredientsVisitor {
                type Value = Ingredients;
                fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                    write!(formatter, "list of ingredients")
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    let mut ingredients = vec![];
                    while let Some(element) = seq.next_element()? {
                        ingredients.push(element)
                    }

                    Ok(Ingredients(ingredients))
                }
            }
            deserializer.deserialize_seq(IngredientsVisitor)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeResult {
    pub id: String,
    pub count: u8,
    pub meta: u16,
}

impl<'de> Deserialize<'de> for RecipeResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Fields {
            Count,
            Id,
            Meta,
        }
        struct ResultVisitor;
        impl<'de> Visitor<'de> for ResultVisitor {
            type Value = RecipeResult;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "valid recipe result")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id: Option<String> = None;
                let mut count: Option<u8> = None;
                let mut meta: Option<u16> = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Fields::Id => visit_option(&mut map, &mut id, "id")?,
                        Fields::Count => visit_option(&mut map, &mut count, "count")?,
                        Fields::Meta => visit_option(&mut map, &mut meta, "meta")?,
                    }
                }

                let id = id.ok_or_else(|| de::Error::missing_field("id"))?;
                let count = count.unwrap_or(1);
                if count == 0 {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Unsigned(0),
                        &"a count of at least 1",
                    ));
                }
                Ok(RecipeResult {
                    id,
                    count,
                    meta: meta.unwrap_or(0),
                })
            }
        }
        deserializer.deserialize_map(ResultVisitor)
    }
}

/// A crafting recipe as written in a data file, names and tags unresolved.
#[derive(Clone, Debug)]
pub struct RecipeData {
    pub recipe_type: RecipeType,
    pub group: Option<String>,
    pub priority: Option<i64>,
    pub body: RecipeBody,
}

#[derive(Clone, Debug)]
pub enum RecipeBody {
    Shaped(ShapedCrafting),
    Shapeless(ShapelessCrafting),
    Special(SpecialCraftingType),
    /// Smelting, smithing and friends: parsed so whole datapacks load, but they
    /// never run on a crafting grid.
    Other,
}

impl<'de> Deserialize<'de> for RecipeData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Fields {
            Type,
            Group,
            Key,
            Pattern,
            Result,
            Ingredients,
            Priority,
            // category, show_notification, cookingtime, ...
            #[serde(other)]
            Ignored,
        }

        struct RecipeVisitor;
        impl<'de> Visitor<'de> for RecipeVisitor {
            type Value = RecipeData;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "valid recipe")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut recipe_type: Option<String> = None;
                let mut group: Option<String> = None;
                let mut keys: Option<RecipeKeys> = None;
                let mut pattern: Option<Vec<String>> = None;
                let mut result: Option<RecipeResult> = None;
                let mut ingredients: Option<Ingredients> = None;
                let mut priority: Option<i64> = None;
                while let Some(key) = map.next_key()? {
                    (match key {
                        Fields::Type => visit_option(&mut map, &mut recipe_type, "type"),
                        Fields::Group => visit_option(&mut map, &mut group, "group"),
                        Fields::Key => visit_option(&mut map, &mut keys, "key"),
                        Fields::Pattern => visit_option(&mut map, &mut pattern, "pattern"),
                        Fields::Result => visit_option(&mut map, &mut result, "result"),
                        Fields::Ingredients => {
                            visit_option(&mut map, &mut ingredients, "ingredients")
                        }
                        Fields::Priority => visit_option(&mut map, &mut priority, "priority"),
                        Fields::Ignored => map.next_value::<IgnoredAny>().map(|_| ()),
                    })?
                }

                let recipe_type: RecipeType = recipe_type
                    .ok_or_else(|| de::Error::missing_field("type"))?
                    .parse()
                    .map_err(de::Error::custom)?;

                let body = match recipe_type {
                    RecipeType::Crafting(CraftingType::Shaped) => {
                        let pattern = pattern.ok_or_else(|| de::Error::missing_field("pattern"))?;
                        let keys = keys.ok_or_else(|| de::Error::missing_field("key"))?;
                        let result = result.ok_or_else(|| de::Error::missing_field("result"))?;
                        RecipeBody::Shaped(ShapedCrafting::new(keys, pattern, result))
                    }
                    RecipeType::Crafting(CraftingType::Shapeless) => {
                        let Ingredients(ingredients) = ingredients
                            .ok_or_else(|| de::Error::missing_field("ingredients"))?;
                        let result = result.ok_or_else(|| de::Error::missing_field("result"))?;
                        RecipeBody::Shapeless(ShapelessCrafting::new(ingredients, result))
                    }
                    RecipeType::Crafting(CraftingType::Special(special)) => {
                        RecipeBody::Special(special)
                    }
                    _ => RecipeBody::Other,
                };

                Ok(RecipeData {
                    recipe_type,
                    group,
                    priority,
                    body,
                })
            }
        }

        const FIELDS: &[&str] = &[
            "type",
            "group",
            "key",
            "pattern",
            "result",
            "ingredients",
            "priority",
        ];

        deserializer.deserialize_struct("Recipe", FIELDS, RecipeVisitor)
    }
}

#[inline(always)]
fn visit_option<'de, T: Deserialize<'de>, Map: MapAccess<'de>>(
    map: &mut Map,
    option: &mut Option<T>,
    field: &'static str,
) -> Result<(), Map::Error> {
    match option {
        Some(_) => Err(<Map::Error as de::Error>::duplicate_field(field)),
        None => {
            *option = Some(map.next_value()?);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftingType {
    Shapeless,
    Shaped,
    Special(SpecialCraftingType),
    DecoratedPot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCraftingType {
    BookCloning,
    RepairItem,
    ArmorDye,
    Firework(FireworkCrafting),
    SuspiciousStew,
    ShulkerboxColoring,
    Map(MapCrafting),
    BannerDuplicate,
    ShieldDecoration,
    TippedArrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkCrafting {
    Rocket,
    Star,
    StarFade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCrafting {
    Extending,
    Cloning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmithingType {
    Normal,
    Trim,
    Transform,
}

#[cfg(test)]
mod test {
    use super::ingredients::{IngredientSlot, IngredientType};
    use super::{CraftingType, RecipeBody, RecipeData, RecipeType, SpecialCraftingType};

    #[test]
    fn parse_shaped() {
        let recipe: RecipeData = serde_json::from_str(
            r##"{
                "type": "minecraft:crafting_shaped",
                "category": "misc",
                "key": { "#": { "item": "minecraft:stick" }, "X": { "tag": "coals" } },
                "pattern": ["X", "#"],
                "result": { "id": "minecraft:torch", "count": 4 }
            }"##,
        )
        .unwrap();
        assert_eq!(recipe.recipe_type, RecipeType::Crafting(CraftingType::Shaped));
        let RecipeBody::Shaped(shaped) = recipe.body else {
            panic!("expected a shaped recipe");
        };
        assert_eq!(shaped.pattern(), ["X", "#"]);
        assert_eq!(shaped.result().count, 4);
        assert_eq!(
            shaped.keys().get(&'X'),
            Some(&IngredientSlot::Single(IngredientType::Tag("coals".into())))
        );
    }

    #[test]
    fn parse_shapeless_with_alternatives() {
        let recipe: RecipeData = serde_json::from_str(
            r##"{
                "type": "crafting_shapeless",
                "ingredients": [
                    "minecraft:book",
                    [{ "item": "dye", "meta": 15 }, "#coals"],
                    { "item": "feather" }
                ],
                "result": { "id": "writable_book" },
                "priority": 7
            }"##,
        )
        .unwrap();
        assert_eq!(recipe.priority, Some(7));
        let RecipeBody::Shapeless(shapeless) = recipe.body else {
            panic!("expected a shapeless recipe");
        };
        assert_eq!(shapeless.ingredients().len(), 3);
        assert_eq!(shapeless.ingredients()[1].types().len(), 2);
        assert_eq!(
            shapeless.ingredients()[1].types()[0],
            IngredientType::Item {
                name: "dye".into(),
                meta: Some(15)
            }
        );
        assert_eq!(shapeless.result().count, 1);
    }

    #[test]
    fn parse_special() {
        let recipe: RecipeData =
            serde_json::from_str(r#"{ "type": "minecraft:crafting_special_armordye" }"#).unwrap();
        assert!(matches!(
            recipe.body,
            RecipeBody::Special(SpecialCraftingType::ArmorDye)
        ));
    }

    #[test]
    fn reject_malformed() {
        // missing pattern
        assert!(serde_json::from_str::<RecipeData>(
            r#"{ "type": "crafting_shaped", "key": {}, "result": { "id": "stick" } }"#
        )
        .is_err());
        // unknown type
        assert!(serde_json::from_str::<RecipeData>(r#"{ "type": "crafting_magic" }"#).is_err());
        // zero count
        assert!(serde_json::from_str::<RecipeData>(
            r#"{ "type": "crafting_shapeless", "ingredients": ["stick"], "result": { "id": "stick", "count": 0 } }"#
        )
        .is_err());
        // multi character key
        assert!(serde_json::from_str::<RecipeData>(
            r#"{ "type": "crafting_shaped", "pattern": ["A"], "key": { "AB": "stick" }, "result": { "id": "stick" } }"#
        )
        .is_err());
    }
}
