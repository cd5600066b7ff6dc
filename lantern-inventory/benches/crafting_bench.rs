use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lantern_core::item::get_item_id;
use lantern_core::ItemStack;
use lantern_inventory::crafting::{vanilla_recipes, RecipeRegistry};
use lantern_inventory::CraftingInventory;

fn stack(name: &str) -> Option<ItemStack> {
    get_item_id(name).map(|id| ItemStack::new(1, id))
}

fn table(items: &[(usize, &str)]) -> CraftingInventory {
    let mut inventory = CraftingInventory::crafting_table();
    for &(slot, name) in items {
        inventory
            .set_item(slot, stack(name))
            .expect("Slot is inside the crafting table");
    }
    inventory
}

pub fn find_recipe(c: &mut Criterion) {
    let recipes = vanilla_recipes().expect("Bundled recipes are valid");
    let registry = RecipeRegistry::with_recipes(recipes.clone());
    let parallel = RecipeRegistry::with_recipes(recipes).parallel(true, 1);

    let pickaxe = table(&[
        (0, "iron_ingot"),
        (1, "iron_ingot"),
        (2, "iron_ingot"),
        (4, "stick"),
        (7, "stick"),
    ]);
    let stew = table(&[(2, "bowl"), (4, "red_mushroom"), (6, "brown_mushroom")]);
    let nothing = table(&[(0, "diamond"), (8, "egg")]);

    c.bench_function("find shaped recipe: iron pickaxe", |b| {
        b.iter(|| registry.find_match(black_box(&pickaxe)))
    });
    c.bench_function("find shapeless recipe: mushroom stew", |b| {
        b.iter(|| registry.find_match(black_box(&stew)))
    });
    c.bench_function("find no recipe", |b| {
        b.iter(|| registry.find_match(black_box(&nothing)))
    });
    c.bench_function("find no recipe: parallel", |b| {
        b.iter(|| parallel.find_match(black_box(&nothing)))
    });
}

criterion_group!(benches, find_recipe);
criterion_main!(benches);
