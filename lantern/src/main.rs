#![deny(clippy::all)]

use std::path::Path;

use lantern_config::{ADVANCED_CONFIG, BASIC_CONFIG};
use lantern_inventory::crafting::{recipe_from_data, vanilla_recipes, Recipe, RecipeRegistry};
use lantern_inventory::RecipeError;
use lantern_registry::load_recipes_from_dir;

pub mod console;

fn init_logger() {
    if ADVANCED_CONFIG.logging.enabled {
        let mut logger = simple_logger::SimpleLogger::new();
        logger = logger.with_timestamp_format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));

        if !ADVANCED_CONFIG.logging.timestamp {
            logger = logger.without_timestamps();
        }

        if ADVANCED_CONFIG.logging.env {
            logger = logger.env();
        }

        logger = logger.with_level(ADVANCED_CONFIG.logging.level.into());

        logger = logger.with_colors(ADVANCED_CONFIG.logging.color);
        logger = logger.with_threads(ADVANCED_CONFIG.logging.threads);
        if let Err(err) = logger.init() {
            eprintln!("Couldn't install logger: {err}");
        }
    }
}

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Custom recipes are loaded one by one, a broken file only costs its own
/// recipe.
fn custom_recipes(dir: &Path) -> Vec<Recipe> {
    let files = match load_recipes_from_dir(dir) {
        Ok(files) => files,
        Err(err) => {
            log::warn!("Couldn't load custom recipes: {err}");
            return vec![];
        }
    };
    let mut recipes = Vec::with_capacity(files.len());
    for (id, data) in &files {
        match recipe_from_data(id, data, false) {
            Ok(Some(recipe)) => recipes.push(recipe),
            Ok(None) => {}
            Err(err) => log::warn!("Skipping custom recipe: {err}"),
        }
    }
    recipes
}

fn load_registry() -> Result<RecipeRegistry, RecipeError> {
    let mut recipes = if BASIC_CONFIG.vanilla_recipes {
        vanilla_recipes()?
    } else {
        vec![]
    };

    let custom_path = Path::new(&BASIC_CONFIG.custom_recipes_path);
    if !BASIC_CONFIG.custom_recipes_path.is_empty() && custom_path.is_dir() {
        recipes.extend(custom_recipes(custom_path));
    }

    Ok(RecipeRegistry::with_recipes(recipes).parallel(
        ADVANCED_CONFIG.lookup.parallel,
        ADVANCED_CONFIG.lookup.parallel_threshold,
    ))
}

fn main() {
    init_logger();

    log::info!("Starting Lantern {CARGO_PKG_VERSION}");
    log::debug!(
        "Build info: FAMILY: \"{}\", OS: \"{}\", ARCH: \"{}\", BUILD: \"{}\"",
        std::env::consts::FAMILY,
        std::env::consts::OS,
        std::env::consts::ARCH,
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    let registry = match load_registry() {
        Ok(registry) => registry,
        Err(err) => {
            log::error!("Failed to load recipes: {err}");
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} recipes", registry.len());
    log::info!(
        "Enter a {}x{} grid row by row, e.g. \"coal _ stick _\". \"quit\" exits",
        BASIC_CONFIG.crafting_rows,
        BASIC_CONFIG.crafting_columns
    );

    console::run(
        &registry,
        BASIC_CONFIG.crafting_rows,
        BASIC_CONFIG.crafting_columns,
    );
}
