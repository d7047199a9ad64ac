//! Integration tests for the key catalog
//!
//! Tests id and name resolution, custom entries, and color data bytes.

use grantable_foundation::{Catalog, DyeColor, EffectType, Enchantment, Material};

#[test]
fn materials_resolve_by_id_and_name() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.material_by_id(264).unwrap().name.as_ref(), "diamond");
    assert_eq!(catalog.material_by_name("Diamond").unwrap().id, 264);
    assert_eq!(catalog.material_by_name("jack-o-lantern").unwrap().id, 91);
    assert!(catalog.material_by_id(9999).is_none());
    assert!(catalog.material_by_name("unobtainium").is_none());
}

#[test]
fn effects_resolve_by_id_and_name() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.effect_by_id(1).unwrap().name.as_ref(), "speed");
    assert_eq!(catalog.effect_by_name("NIGHT_VISION").unwrap().id, 16);
    assert_eq!(catalog.effect_types().count(), 23);
}

#[test]
fn enchantments_resolve_by_id_and_name() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.enchantment_by_name("fire aspect").unwrap().id, 20);
    assert_eq!(catalog.enchantment_by_id(51).unwrap().name.as_ref(), "arrow_infinite");
}

#[test]
fn catalog_can_be_extended() {
    let catalog = Catalog::new()
        .with_material(Material::new(1, "Arena Token"))
        .with_effect_type(EffectType::new(40, "glowing"))
        .with_enchantment(Enchantment::new(70, "mending"));
    assert_eq!(catalog.material_count(), 1);
    assert!(catalog.material_by_name("arena_token").is_some());
    assert!(catalog.effect_by_name("Glowing").is_some());
    assert!(catalog.enchantment_by_id(70).is_some());
}

#[test]
fn later_entries_replace_earlier_ids() {
    let standard = Catalog::standard();
    let catalog = standard.clone().with_material(Material::new(264, "gem"));
    assert_eq!(catalog.material_by_id(264).unwrap().name.as_ref(), "gem");
    assert_eq!(catalog.material_by_name("gem").unwrap().id, 264);
    assert!(catalog.material_by_name("diamond").is_none());
    assert_eq!(catalog.material_count(), standard.material_count());
}

#[test]
fn replaced_effects_and_enchantments_drop_old_names() {
    let catalog = Catalog::standard()
        .with_effect_type(EffectType::new(1, "haste_two"))
        .with_enchantment(Enchantment::new(20, "burning"));

    assert!(catalog.effect_by_name("speed").is_none());
    assert_eq!(catalog.effect_by_name("haste_two").unwrap().id, 1);
    assert_eq!(catalog.effect_types().filter(|e| e.id == 1).count(), 1);
    assert_eq!(catalog.effect_types().count(), 23);

    assert!(catalog.enchantment_by_name("fire_aspect").is_none());
    assert_eq!(catalog.enchantment_by_id(20).unwrap().name.as_ref(), "burning");
}

#[test]
fn reinserting_the_same_entry_is_harmless() {
    let catalog = Catalog::new()
        .with_material(Material::new(7, "bedrock"))
        .with_material(Material::new(7, "bedrock"));
    assert_eq!(catalog.material_count(), 1);
    assert_eq!(catalog.material_by_name("bedrock").unwrap().id, 7);
}

#[test]
fn dye_and_wool_data_are_mirror_images() {
    for color in DyeColor::ALL {
        assert_eq!(color.dye_data() + color.wool_data(), 15);
        assert_eq!(DyeColor::from_name(color.name()), Some(color));
    }
}

#[test]
fn wool_converts_data() {
    let catalog = Catalog::standard();
    let wool = catalog.material_by_name("wool").unwrap();
    assert_eq!(wool.convert_data(DyeColor::Red.dye_data()), DyeColor::Red.wool_data());
    let stone = catalog.material_by_name("stone").unwrap();
    assert_eq!(stone.convert_data(3), 3);
}
