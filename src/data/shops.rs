//! Shop catalog — everything the player can spend resources on.
//!
//! The starter decorations cost water so a new player can buy their first
//! bucket from morning dew alone; the advanced harvesters sit behind
//! prerequisite purchases. Resource packs trade gems (and pearls) for
//! stock directly.

use crate::shared::*;

fn item(
    id: &str,
    display_name: &str,
    description: &str,
    category: ShopCategory,
    effect: ShopEffect,
    cost: ResourceCost,
) -> ShopItem {
    ShopItem {
        id: id.into(),
        display_name: display_name.into(),
        description: description.into(),
        category,
        effect,
        cost,
        unlocked: true,
        prerequisites: Vec::new(),
        limited: false,
        max_purchases: 1,
        purchase_count: 0,
    }
}

pub fn populate_shop(catalog: &mut ShopCatalog) {
    use DecorationKind as Kind;
    use ResourceType::*;
    use ShopCategory as Cat;
    use ShopEffect as Effect;

    // ═══════════════════════════════════════════════════════════════
    // DECORATIONS — harvesters first, then scenery
    // ═══════════════════════════════════════════════════════════════

    catalog.insert(item(
        "bucket_basic",
        "Water Bucket",
        "Collects rainwater automatically",
        Cat::Decorations,
        Effect::Decoration(Kind::Bucket),
        ResourceCost::new(Water, 5),
    ));

    catalog.insert(item(
        "flower_pot",
        "Flower Pot",
        "Sprouts seeds in the afternoon sun",
        Cat::Decorations,
        Effect::Decoration(Kind::FlowerPot),
        ResourceCost::new(Water, 4).and(Seeds, 2),
    ));

    catalog.insert(item(
        "spider_web",
        "Spider Web",
        "Patiently traps passing insects",
        Cat::Decorations,
        Effect::Decoration(Kind::SpiderWeb),
        ResourceCost::new(Seeds, 3),
    ));

    catalog.insert(ShopItem {
        prerequisites: vec!["bucket_basic".into()],
        unlocked: false,
        ..item(
            "moon_crystal",
            "Moon Crystal",
            "Charges with moonbeams under a night sky",
            Cat::Decorations,
            Effect::Decoration(Kind::MoonCrystal),
            ResourceCost::new(Stardust, 3).and(Gems, 1),
        )
    });

    catalog.insert(ShopItem {
        prerequisites: vec!["bucket_basic".into()],
        unlocked: false,
        ..item(
            "lightning_rod",
            "Lightning Rod",
            "Crystallizes storm energy into gems",
            Cat::Decorations,
            Effect::Decoration(Kind::LightningRod),
            ResourceCost::new(Gems, 3).and(Gold, 1),
        )
    });

    catalog.insert(item(
        "plant_basic",
        "Jungle Plant",
        "Decorative plant for your desktop",
        Cat::Decorations,
        Effect::Decoration(Kind::Plant),
        ResourceCost::new(Water, 3),
    ));

    catalog.insert(item(
        "wind_chimes",
        "Wind Chimes",
        "Bamboo chimes that sing in the breeze",
        Cat::Decorations,
        Effect::Decoration(Kind::WindChimes),
        ResourceCost::new(Shells, 2).and(TreeSap, 1),
    ));

    catalog.insert(item(
        "tiki_torch",
        "Tiki Torch",
        "Warm light for the evening hours",
        Cat::Decorations,
        Effect::Decoration(Kind::TikiTorch),
        ResourceCost::new(Nuts, 2),
    ));

    catalog.insert(ShopItem {
        prerequisites: vec!["plant_basic".into()],
        unlocked: false,
        limited: true,
        max_purchases: 1,
        ..item(
            "fountain",
            "Fountain",
            "A centerpiece worthy of the grove",
            Cat::Decorations,
            Effect::Decoration(Kind::Fountain),
            ResourceCost::new(Gems, 5).and(Water, 20),
        )
    });

    catalog.insert(ShopItem {
        prerequisites: vec!["fountain".into()],
        unlocked: false,
        limited: true,
        max_purchases: 1,
        ..item(
            "hut",
            "Hut",
            "Somewhere for the grove's guests to shelter",
            Cat::Decorations,
            Effect::Decoration(Kind::Hut),
            ResourceCost::new(Gold, 3).and(Gems, 5),
        )
    });

    // ═══════════════════════════════════════════════════════════════
    // RESOURCES — direct grants
    // ═══════════════════════════════════════════════════════════════

    catalog.insert(item(
        "water_small",
        "Water Drop",
        "Small amount of water",
        Cat::Resources,
        Effect::ResourceGrant {
            resource_type: Water,
            amount: 1,
        },
        ResourceCost::new(Gems, 1),
    ));

    catalog.insert(item(
        "water_large",
        "Water Bottle",
        "Large amount of water",
        Cat::Resources,
        Effect::ResourceGrant {
            resource_type: Water,
            amount: 10,
        },
        ResourceCost::new(Gems, 8),
    ));

    catalog.insert(item(
        "seed_pouch",
        "Seed Pouch",
        "A handful of jungle seeds",
        Cat::Resources,
        Effect::ResourceGrant {
            resource_type: Seeds,
            amount: 5,
        },
        ResourceCost::new(Water, 10),
    ));

    catalog.insert(item(
        "gem_cache",
        "Gem Cache",
        "Gems, for those in a hurry",
        Cat::Premium,
        Effect::ResourceGrant {
            resource_type: Gems,
            amount: 3,
        },
        ResourceCost::new(PremiumCurrency, 1),
    ));

    // ═══════════════════════════════════════════════════════════════
    // TOOLS & UPGRADES — reserved effects, purchasable now
    // ═══════════════════════════════════════════════════════════════

    catalog.insert(ShopItem {
        limited: true,
        max_purchases: 3,
        ..item(
            "net_upgrade",
            "Finer Net",
            "Improves bug-catching",
            Cat::Tools,
            Effect::ToolUpgrade,
            ResourceCost::new(Gems, 2),
        )
    });

    catalog.insert(ShopItem {
        limited: true,
        max_purchases: 1,
        ..item(
            "satchel",
            "Forager's Satchel",
            "Carry more of everything",
            Cat::Upgrades,
            Effect::CapacityUpgrade,
            ResourceCost::new(Gems, 4).and(Gold, 2),
        )
    });

    catalog.insert(ShopItem {
        limited: true,
        max_purchases: 1,
        ..item(
            "mermaid_charm",
            "Mermaid Charm",
            "Keeps a song close to your heart",
            Cat::Special,
            Effect::Consumable,
            ResourceCost::new(MermaidSong, 1),
        )
    });
}
