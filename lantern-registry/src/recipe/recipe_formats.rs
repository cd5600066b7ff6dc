use super::read::{ingredients::IngredientSlot, RecipeResult};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt::Formatter;

pub struct RecipeKeys(pub(super) HashMap<char, IngredientSlot>);

impl<'de> Deserialize<'de> for RecipeKeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;
        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = HashMap<char, IngredientSlot>;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "existing key inside recipe")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut return_map = HashMap::new();
                while let Some(next) = map.next_key::<String>()? {
                    let mut chars = next.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(de::Error::invalid_length(
                            next.chars().count(),
                            &"a single character key",
                        ));
                    };
                    if c == ' ' {
                        return Err(de::Error::custom("' ' is reserved for empty cells"));
                    }
                    let ingredient_type: IngredientSlot = map.next_value()?;

                    return_map.insert(c, ingredient_type);
                }
                Ok(return_map)
            }
        }
        deserializer.deserialize_map(KeyVisitor).map(Self)
    }
}

#[derive(Clone, Debug)]
pub struct ShapedCrafting {
    keys: HashMap<char, IngredientSlot>,
    pattern: Vec<String>,
    output: RecipeResult,
}

impl ShapedCrafting {
    pub fn new(keys: RecipeKeys, pattern: Vec<String>, output: RecipeResult) -> Self {
        Self {
            keys: keys.0,
            pattern,
            output,
        }
    }

    pub fn keys(&self) -> &HashMap<char, IngredientSlot> {
        &self.keys
    }

    pub fn pattern(&self) -> &[String] {
        &self.pattern
    }

    pub fn result(&self) -> &RecipeResult {
        &self.output
    }
}

#[derive(Clone, Debug)]
pub struct ShapelessCrafting {
    ingredients: Vec<IngredientSlot>,
    output: RecipeResult,
}

impl ShapelessCrafting {
    pub(crate) fn new(ingredients: Vec<IngredientSlot>, output: RecipeResult) -> Self {
        Self {
            ingredients,
            output,
        }
    }

    pub fn ingredients(&self) -> &[IngredientSlot] {
        &self.ingredients
    }

    pub fn result(&self) -> &RecipeResult {
        &self.output
    }
}
