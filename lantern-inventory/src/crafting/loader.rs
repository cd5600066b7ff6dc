use std::collections::HashMap;

use lantern_core::item::{get_item, get_item_id, get_item_name};
use lantern_core::{ItemStack, ANY_META};
use lantern_registry::{
    resolve_item_tag, FireworkCrafting, IngredientSlot, IngredientType, RecipeBody, RecipeData,
    RecipeResult, SpecialCraftingType, VANILLA_RECIPES,
};

use super::special::{armor_dye, book_cloning, firework_rocket};
use super::{IngredientMatcher, Recipe, RecipeBuilder};
use crate::RecipeError;

pub(crate) fn item_id(name: &str) -> Result<u16, RecipeError> {
    get_item_id(name).ok_or_else(|| RecipeError::UnknownItem(name.to_string()))
}

/// Turns a data recipe into an engine recipe. `Ok(None)` means the recipe is
/// valid but has nothing to do on a crafting grid.
pub fn recipe_from_data(
    id: &str,
    data: &RecipeData,
    vanilla: bool,
) -> Result<Option<Recipe>, RecipeError> {
    build(id, data, vanilla).map_err(|err| RecipeError::Invalid {
        id: id.to_string(),
        source: Box::new(err),
    })
}

/// Converts every recipe, stopping at the first broken one.
pub fn load_data_recipes<'a>(
    recipes: impl IntoIterator<Item = (&'a str, &'a RecipeData)>,
    vanilla: bool,
) -> Result<Vec<Recipe>, RecipeError> {
    let mut loaded = vec![];
    for (id, data) in recipes {
        if let Some(recipe) = recipe_from_data(id, data, vanilla)? {
            loaded.push(recipe);
        }
    }
    Ok(loaded)
}

/// The recipes bundled with the server.
pub fn vanilla_recipes() -> Result<Vec<Recipe>, RecipeError> {
    let recipes = load_data_recipes(
        VANILLA_RECIPES
            .iter()
            .map(|(id, data)| (id.as_str(), data)),
        true,
    )?;
    log::debug!(
        "Loaded {} of {} vanilla recipes",
        recipes.len(),
        VANILLA_RECIPES.len()
    );
    Ok(recipes)
}

fn build(id: &str, data: &RecipeData, vanilla: bool) -> Result<Option<Recipe>, RecipeError> {
    let mut builder = RecipeBuilder::new(id).vanilla(vanilla);
    if let Some(priority) = data.priority {
        builder = builder.priority(priority);
    }

    match &data.body {
        RecipeBody::Shaped(shaped) => {
            let keys = shaped
                .keys()
                .iter()
                .map(|(key, slot)| Ok((*key, ingredient(slot)?)))
                .collect::<Result<HashMap<_, _>, RecipeError>>()?;
            builder
                .output(result_stack(shaped.result())?)
                .shaped(shaped.pattern(), keys)
                .map(Some)
        }
        RecipeBody::Shapeless(shapeless) => {
            let mut ingredients = shapeless
                .ingredients()
                .iter()
                .map(ingredient)
                .collect::<Result<Vec<_>, _>>()?;
            let builder = builder.output(result_stack(shapeless.result())?);
            if ingredients.len() == 1 {
                builder.shapeless_single(ingredients.remove(0)).map(Some)
            } else {
                builder.shapeless(ingredients, vec![]).map(Some)
            }
        }
        RecipeBody::Special(special) => match special {
            SpecialCraftingType::ArmorDye => armor_dye(builder).map(Some),
            SpecialCraftingType::BookCloning => book_cloning(builder).map(Some),
            SpecialCraftingType::Firework(FireworkCrafting::Rocket) => {
                firework_rocket(builder).map(Some)
            }
            other => {
                log::warn!("Skipping recipe {id}: {other:?} crafting is not implemented");
                Ok(None)
            }
        },
        RecipeBody::Other => {
            log::debug!(
                "Skipping recipe {id}: {:?} does not use a crafting grid",
                data.recipe_type
            );
            Ok(None)
        }
    }
}

fn result_stack(result: &RecipeResult) -> Result<ItemStack, RecipeError> {
    Ok(ItemStack::new(result.count, item_id(&result.id)?).with_meta(result.meta))
}

/// One matcher accepting every alternative of the slot. Items that leave
/// something behind (milk bucket -> bucket) get it as replacement, as long as
/// all alternatives agree on it.
fn ingredient(slot: &IngredientSlot) -> Result<IngredientMatcher, RecipeError> {
    let mut stacks = vec![];
    for ingredient in slot.types() {
        match ingredient {
            IngredientType::Item { name, meta } => {
                stacks.push(ItemStack::new(1, item_id(name)?).with_meta(meta.unwrap_or(ANY_META)));
            }
            IngredientType::Tag(tag) => {
                let items =
                    resolve_item_tag(tag).ok_or_else(|| RecipeError::UnknownTag(tag.clone()))?;
                for name in items {
                    stacks.push(ItemStack::new(1, item_id(name)?).with_meta(ANY_META));
                }
            }
        }
    }
    if stacks.is_empty() {
        return Err(RecipeError::NoIngredients);
    }

    let remainders: Vec<Option<&str>> = stacks
        .iter()
        .map(|stack| {
            get_item_name(stack.item_id)
                .and_then(get_item)
                .and_then(|item| item.remainder.as_deref())
        })
        .collect();
    let matcher = IngredientMatcher::any_of(stacks);

    let first = remainders[0];
    if remainders.iter().any(|remainder| *remainder != first) {
        log::warn!("Ingredient alternatives leave different items behind, ignoring them");
        return Ok(matcher);
    }
    match first {
        Some(remainder) => Ok(matcher.replacement(ItemStack::new(1, item_id(remainder)?))),
        None => Ok(matcher),
    }
}
