//! Resource definitions — the static metadata behind every ResourceType.
//!
//! Availability windows follow the fiction: night-sky resources only exist
//! at night, dew and nectar belong to the morning, seeds and berries to the
//! afternoon sun. An empty window means "always".

use crate::shared::*;

/// Baseline definition; entries override what differs.
fn def(id: &str, display_name: &str, resource_type: ResourceType) -> ResourceDef {
    ResourceDef {
        id: id.into(),
        display_name: display_name.into(),
        description: String::new(),
        category: resource_type.category(),
        base_value: 1,
        max_stack_size: DEFAULT_MAX_STACK,
        can_forage: true,
        can_generate: false,
        base_generation_rate: 1.0,
        rarity: 1.0,
        available_times: Vec::new(),
        available_weather: Vec::new(),
    }
}

pub fn populate_resources(registry: &mut ResourceRegistry) {
    use ResourceType::*;
    use TimeOfDay::*;

    let defs: Vec<(ResourceType, ResourceDef)> = vec![
        // ── Primary ─────────────────────────────────────────────────────
        (
            Water,
            ResourceDef {
                description: "The lifeblood of the grove. Falls from the sky, beads on leaves."
                    .into(),
                can_generate: true,
                base_generation_rate: 2.0,
                ..def("water", "Water", Water)
            },
        ),
        // ── Bugs ────────────────────────────────────────────────────────
        (
            Caterpillars,
            ResourceDef {
                base_value: 2,
                can_generate: true,
                ..def("caterpillars", "Caterpillars", Caterpillars)
            },
        ),
        (
            Butterflies,
            ResourceDef {
                base_value: 4,
                rarity: 2.0,
                available_times: vec![Morning, Afternoon],
                ..def("butterflies", "Butterflies", Butterflies)
            },
        ),
        (
            Dragonflies,
            ResourceDef {
                base_value: 5,
                rarity: 3.0,
                available_times: vec![Afternoon, Evening],
                ..def("dragonflies", "Dragonflies", Dragonflies)
            },
        ),
        (
            Bees,
            ResourceDef {
                base_value: 3,
                available_times: vec![Morning, Afternoon],
                ..def("bees", "Bees", Bees)
            },
        ),
        (
            Crickets,
            ResourceDef {
                base_value: 3,
                available_times: vec![Evening, Night],
                ..def("crickets", "Crickets", Crickets)
            },
        ),
        (
            Fireflies,
            ResourceDef {
                base_value: 6,
                rarity: 3.0,
                available_times: vec![Evening, Night],
                ..def("fireflies", "Fireflies", Fireflies)
            },
        ),
        (
            Ladybugs,
            ResourceDef {
                base_value: 4,
                rarity: 2.0,
                ..def("ladybugs", "Ladybugs", Ladybugs)
            },
        ),
        // ── Nature ──────────────────────────────────────────────────────
        (
            Seeds,
            ResourceDef {
                base_value: 2,
                can_generate: true,
                available_times: vec![Afternoon],
                ..def("seeds", "Seeds", Seeds)
            },
        ),
        (
            Clovers,
            ResourceDef {
                base_value: 2,
                ..def("clovers", "Clovers", Clovers)
            },
        ),
        (
            FourLeafClovers,
            ResourceDef {
                base_value: 12,
                rarity: 8.0,
                // Luck sprouts where the rain fell.
                available_weather: vec![WeatherType::Rain],
                ..def("four_leaf_clovers", "Four-Leaf Clovers", FourLeafClovers)
            },
        ),
        (
            Nuts,
            ResourceDef {
                base_value: 3,
                ..def("nuts", "Nuts", Nuts)
            },
        ),
        (
            Berries,
            ResourceDef {
                base_value: 3,
                available_times: vec![Afternoon],
                ..def("berries", "Berries", Berries)
            },
        ),
        (
            Feathers,
            ResourceDef {
                base_value: 4,
                rarity: 2.0,
                available_weather: vec![WeatherType::Wind, WeatherType::Clear],
                ..def("feathers", "Feathers", Feathers)
            },
        ),
        (
            Shells,
            ResourceDef {
                base_value: 5,
                rarity: 3.0,
                available_weather: vec![WeatherType::Rain, WeatherType::Storm],
                ..def("shells", "Shells", Shells)
            },
        ),
        (
            TreeSap,
            ResourceDef {
                base_value: 4,
                ..def("tree_sap", "Tree Sap", TreeSap)
            },
        ),
        (
            Nectar,
            ResourceDef {
                base_value: 4,
                available_times: vec![Morning],
                ..def("nectar", "Nectar", Nectar)
            },
        ),
        (
            Pollen,
            ResourceDef {
                base_value: 3,
                available_times: vec![Evening],
                ..def("pollen", "Pollen", Pollen)
            },
        ),
        // ── Night sky ───────────────────────────────────────────────────
        (
            Moonbeams,
            ResourceDef {
                base_value: 8,
                rarity: 4.0,
                can_generate: true,
                available_times: vec![Night],
                ..def("moonbeams", "Moonbeams", Moonbeams)
            },
        ),
        (
            Stardust,
            ResourceDef {
                base_value: 10,
                rarity: 5.0,
                available_times: vec![Night],
                ..def("stardust", "Stardust", Stardust)
            },
        ),
        (
            Comets,
            ResourceDef {
                base_value: 18,
                rarity: 7.0,
                available_times: vec![Night],
                ..def("comets", "Comets", Comets)
            },
        ),
        (
            FallingStars,
            ResourceDef {
                base_value: 20,
                rarity: 8.0,
                available_times: vec![Night],
                ..def("falling_stars", "Falling Stars", FallingStars)
            },
        ),
        (
            Planets,
            ResourceDef {
                base_value: 25,
                rarity: 9.0,
                available_times: vec![Night],
                ..def("planets", "Planets", Planets)
            },
        ),
        // ── Valuables ───────────────────────────────────────────────────
        (
            Gems,
            ResourceDef {
                base_value: 10,
                rarity: 5.0,
                can_generate: true,
                ..def("gems", "Gems", Gems)
            },
        ),
        (
            Gold,
            ResourceDef {
                base_value: 15,
                rarity: 6.0,
                ..def("gold", "Gold", Gold)
            },
        ),
        (
            Jewelry,
            ResourceDef {
                base_value: 30,
                rarity: 8.0,
                ..def("jewelry", "Jewelry", Jewelry)
            },
        ),
        (
            RareRelics,
            ResourceDef {
                base_value: 50,
                max_stack_size: 99,
                rarity: 10.0,
                ..def("rare_relics", "Rare Relics", RareRelics)
            },
        ),
        // ── Abstract ────────────────────────────────────────────────────
        (
            Secrets,
            ResourceDef {
                base_value: 15,
                rarity: 6.0,
                available_weather: vec![WeatherType::Foggy],
                ..def("secrets", "Secrets", Secrets)
            },
        ),
        (
            Shadows,
            ResourceDef {
                base_value: 12,
                rarity: 5.0,
                available_times: vec![Evening, Night],
                ..def("shadows", "Shadows", Shadows)
            },
        ),
        (
            Memories,
            ResourceDef {
                base_value: 20,
                rarity: 7.0,
                ..def("memories", "Memories", Memories)
            },
        ),
        (
            Lullabies,
            ResourceDef {
                base_value: 18,
                rarity: 7.0,
                available_times: vec![Night],
                ..def("lullabies", "Lullabies", Lullabies)
            },
        ),
        // ── Special events ──────────────────────────────────────────────
        (
            UnicornBlessing,
            ResourceDef {
                base_value: 100,
                max_stack_size: 9,
                can_forage: false,
                rarity: 10.0,
                ..def("unicorn_blessing", "Unicorn Blessing", UnicornBlessing)
            },
        ),
        (
            MermaidSong,
            ResourceDef {
                base_value: 100,
                max_stack_size: 9,
                can_forage: false,
                rarity: 10.0,
                available_weather: vec![WeatherType::Rain, WeatherType::Storm],
                ..def("mermaid_song", "Mermaid Song", MermaidSong)
            },
        ),
        // ── Hard currency ───────────────────────────────────────────────
        (
            PremiumCurrency,
            ResourceDef {
                base_value: 0,
                can_forage: false,
                ..def("premium_currency", "Pearls", PremiumCurrency)
            },
        ),
    ];

    for (resource_type, definition) in defs {
        registry.insert(resource_type, definition);
    }
}
