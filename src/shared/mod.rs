//! Shared components, resources, events, and states for Wildgrove.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// TIME & WEATHER
// ═══════════════════════════════════════════════════════════════════════

/// Coarse time-of-day bucket derived from the hour counter.
/// Gates resource availability and harvester generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,   // 6-12: dewdrops, nectar, early bugs
    Afternoon, // 12-18: seeds, berries, full sunlight
    Evening,   // 18-22: fireflies, sunset pollen
    Night,     // 22-6: moonbeams, stardust, falling stars
}

impl TimeOfDay {
    /// Fixed period boundaries: Morning 6-12, Afternoon 12-18,
    /// Evening 18-22, Night 22-6.
    pub fn from_hour(hour: f32) -> Self {
        if (6.0..12.0).contains(&hour) {
            TimeOfDay::Morning
        } else if (12.0..18.0).contains(&hour) {
            TimeOfDay::Afternoon
        } else if (18.0..22.0).contains(&hour) {
            TimeOfDay::Evening
        } else {
            TimeOfDay::Night
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherType {
    Clear,
    Rain,
    Storm,
    Snow,
    Wind,
    Foggy,
}

impl WeatherType {
    /// Rain and Storm both count as "raining" for gating and multipliers.
    pub fn is_rain_class(self) -> bool {
        matches!(self, WeatherType::Rain | WeatherType::Storm)
    }
}

/// Advances the in-game hour and derives the current period.
/// Mutated only by the daycycle tick or by `set_time` (used on load).
#[derive(Resource, Debug, Clone)]
pub struct DayCycle {
    pub hour_of_day: f32, // [0, 24)
    pub period: TimeOfDay,
    pub day_length_minutes: f32, // real minutes for a full game day
    pub time_scale: f32,
}

impl Default for DayCycle {
    fn default() -> Self {
        Self {
            hour_of_day: DEFAULT_START_HOUR,
            period: TimeOfDay::from_hour(DEFAULT_START_HOUR),
            day_length_minutes: DAY_LENGTH_MINUTES,
            time_scale: 1.0,
        }
    }
}

impl DayCycle {
    /// Sets the clock directly, clamped to [0, 24). Recomputes the period.
    /// Callers (load, debug) must emit HourChangedEvent + PeriodChangedEvent
    /// unconditionally so listeners resync without replaying elapsed time.
    pub fn set_time(&mut self, hour: f32) {
        self.hour_of_day = hour.clamp(0.0, 24.0) % 24.0;
        self.period = TimeOfDay::from_hour(self.hour_of_day);
    }

    /// 0-1 progress through the current day.
    pub fn day_progress(&self) -> f32 {
        self.hour_of_day / 24.0
    }
}

/// Current weather condition and its 0-1 intensity.
/// Mutated only by the weather tick, `ForceWeatherEvent`, or `restore`.
#[derive(Resource, Debug, Clone)]
pub struct WeatherState {
    pub condition: WeatherType,
    pub intensity: f32, // [0, 1]
    pub timer: f32,     // seconds since the last transition
    pub next_change: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            condition: WeatherType::Clear,
            intensity: 0.2,
            timer: 0.0,
            next_change: WEATHER_CHANGE_INTERVAL,
        }
    }
}

impl WeatherState {
    pub fn is_raining(&self) -> bool {
        self.condition.is_rain_class()
    }

    /// Set-state entry point used by the load path. Unlike a forced weather
    /// change, the saved intensity is applied verbatim so a snapshot
    /// round-trips exactly. Callers emit the weather-changed events.
    pub fn restore(&mut self, condition: WeatherType, intensity: f32) {
        self.condition = condition;
        self.intensity = intensity.clamp(0.0, 1.0);
        self.timer = 0.0;
    }

    /// Generation/collection rate multiplier for a resource under the
    /// current weather. Pure function of (condition, intensity) — no RNG —
    /// so harvester yields are replayable and testable.
    pub fn resource_multiplier(&self, resource_type: ResourceType) -> f32 {
        match resource_type {
            ResourceType::Water => {
                if self.is_raining() {
                    2.0 + self.intensity
                } else {
                    1.0
                }
            }
            ResourceType::Seeds => {
                if self.condition == WeatherType::Rain {
                    1.5
                } else {
                    1.0
                }
            }
            ResourceType::Fireflies => {
                if self.condition == WeatherType::Clear {
                    1.3
                } else {
                    0.8
                }
            }
            ResourceType::Stardust => {
                if self.condition == WeatherType::Clear {
                    1.5
                } else {
                    0.5
                }
            }
            _ => 1.0,
        }
    }
}

/// Simulation timebase. `elapsed_seconds` accumulates across sessions (it is
/// persisted as total play time), so timestamps taken against it — harvester
/// cooldowns, collectable lifetimes — stay valid after a reload.
#[derive(Resource, Debug, Clone, Default)]
pub struct TickClock {
    pub elapsed_seconds: f64,
    /// Sub-second remainder carried between frames by the tick emitter.
    pub carry: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Categories for organizing resources in registries and stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    Primary,  // water and basic resources
    Bugs,     // insects and small creatures
    Nature,   // plants, seeds, natural items
    NightSky, // celestial resources
    Valuables,
    Abstract, // secrets, memories, intangibles
    Special,  // rare event resources
    Premium,  // hard currency
}

/// Every collectible good in the game. Fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    // Primary
    Water,
    // Bugs
    Caterpillars,
    Butterflies,
    Dragonflies,
    Bees,
    Crickets,
    Fireflies,
    Ladybugs,
    // Nature
    Seeds,
    Clovers,
    FourLeafClovers,
    Nuts,
    Berries,
    Feathers,
    Shells,
    TreeSap,
    Nectar,
    Pollen,
    // Night sky
    Moonbeams,
    Stardust,
    Comets,
    FallingStars,
    Planets,
    // Valuables
    Gems,
    Gold,
    Jewelry,
    RareRelics,
    // Abstract
    Secrets,
    Shadows,
    Memories,
    Lullabies,
    // Special events
    UnicornBlessing,
    MermaidSong,
    // Hard currency
    PremiumCurrency,
}

impl ResourceType {
    pub const ALL: [ResourceType; 34] = [
        ResourceType::Water,
        ResourceType::Caterpillars,
        ResourceType::Butterflies,
        ResourceType::Dragonflies,
        ResourceType::Bees,
        ResourceType::Crickets,
        ResourceType::Fireflies,
        ResourceType::Ladybugs,
        ResourceType::Seeds,
        ResourceType::Clovers,
        ResourceType::FourLeafClovers,
        ResourceType::Nuts,
        ResourceType::Berries,
        ResourceType::Feathers,
        ResourceType::Shells,
        ResourceType::TreeSap,
        ResourceType::Nectar,
        ResourceType::Pollen,
        ResourceType::Moonbeams,
        ResourceType::Stardust,
        ResourceType::Comets,
        ResourceType::FallingStars,
        ResourceType::Planets,
        ResourceType::Gems,
        ResourceType::Gold,
        ResourceType::Jewelry,
        ResourceType::RareRelics,
        ResourceType::Secrets,
        ResourceType::Shadows,
        ResourceType::Memories,
        ResourceType::Lullabies,
        ResourceType::UnicornBlessing,
        ResourceType::MermaidSong,
        ResourceType::PremiumCurrency,
    ];

    pub fn category(self) -> ResourceCategory {
        use ResourceType::*;
        match self {
            Water => ResourceCategory::Primary,
            Caterpillars | Butterflies | Dragonflies | Bees | Crickets | Fireflies | Ladybugs => {
                ResourceCategory::Bugs
            }
            Seeds | Clovers | FourLeafClovers | Nuts | Berries | Feathers | Shells | TreeSap
            | Nectar | Pollen => ResourceCategory::Nature,
            Moonbeams | Stardust | Comets | FallingStars | Planets => ResourceCategory::NightSky,
            Gems | Gold | Jewelry | RareRelics => ResourceCategory::Valuables,
            Secrets | Shadows | Memories | Lullabies => ResourceCategory::Abstract,
            UnicornBlessing | MermaidSong => ResourceCategory::Special,
            PremiumCurrency => ResourceCategory::Premium,
        }
    }
}

/// Different ways a collectable can be harvested by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionMethod {
    Click,    // click to collect (dewdrops, seeds)
    Hover,    // hover over to collect
    Drag,     // drag across the screen (bucket under raindrops)
    Swipe,    // net swiping (butterflies, fireflies)
    Hold,     // click and hold (digging)
    Interact, // special interaction (pollination, etc.)
}

/// A typed quantity of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStack {
    pub resource_type: ResourceType,
    pub amount: u32,
}

impl ResourceStack {
    pub fn new(resource_type: ResourceType, amount: u32) -> Self {
        Self {
            resource_type,
            amount,
        }
    }

    /// Adds `value`, clamped to the per-type stack ceiling.
    /// Returns the amount actually applied.
    pub fn add(&mut self, value: u32, max_stack: u32) -> u32 {
        let before = self.amount;
        self.amount = self.amount.saturating_add(value).min(max_stack);
        self.amount - before
    }

    pub fn can_subtract(&self, value: u32) -> bool {
        self.amount >= value
    }

    /// Subtracts `value`, or fails without mutation if it would go negative.
    pub fn subtract(&mut self, value: u32) -> bool {
        if self.can_subtract(value) {
            self.amount -= value;
            true
        } else {
            false
        }
    }
}

/// A multi-resource price. Affordability is all-or-nothing: every line item
/// must be individually satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub lines: Vec<ResourceStack>,
}

impl ResourceCost {
    pub fn new(resource_type: ResourceType, amount: u32) -> Self {
        Self {
            lines: vec![ResourceStack::new(resource_type, amount)],
        }
    }

    pub fn and(mut self, resource_type: ResourceType, amount: u32) -> Self {
        self.lines.push(ResourceStack::new(resource_type, amount));
        self
    }

    pub fn can_afford(&self, inventory: &Inventory) -> bool {
        self.lines
            .iter()
            .all(|line| inventory.has(line.resource_type, line.amount))
    }
}

/// The authoritative count of every resource type. Dense: every type is
/// present from construction at zero. The sum over all types never exceeds
/// `max_inventory_size`.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    resources: HashMap<ResourceType, ResourceStack>,
    pub max_inventory_size: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        let mut resources = HashMap::new();
        for ty in ResourceType::ALL {
            resources.insert(ty, ResourceStack::new(ty, 0));
        }
        Self {
            resources,
            max_inventory_size: MAX_INVENTORY_SIZE,
        }
    }
}

impl Inventory {
    pub fn amount_of(&self, resource_type: ResourceType) -> u32 {
        self.resources
            .get(&resource_type)
            .map(|r| r.amount)
            .unwrap_or(0)
    }

    pub fn has(&self, resource_type: ResourceType, amount: u32) -> bool {
        self.amount_of(resource_type) >= amount
    }

    pub fn total_count(&self) -> u32 {
        self.resources.values().map(|r| r.amount).sum()
    }

    /// Adds `amount` of a resource, clamped to the type's stack ceiling.
    ///
    /// Rejected in full (returns `None`, no mutation) when the *requested*
    /// amount would push the total past the global inventory ceiling — the
    /// request is never silently trimmed to fit. On success returns the
    /// applied delta, which may be less than requested if the stack ceiling
    /// clamped it.
    pub fn add(&mut self, resource_type: ResourceType, amount: u32, max_stack: u32) -> Option<u32> {
        if self.total_count().saturating_add(amount) > self.max_inventory_size {
            return None;
        }
        let slot = self
            .resources
            .entry(resource_type)
            .or_insert_with(|| ResourceStack::new(resource_type, 0));
        Some(slot.add(amount, max_stack))
    }

    /// Spends a multi-resource cost atomically: either every line item is
    /// subtracted in this call, or none is and the call returns false.
    pub fn spend(&mut self, cost: &ResourceCost) -> bool {
        if !cost.can_afford(self) {
            return false;
        }
        for line in &cost.lines {
            if let Some(slot) = self.resources.get_mut(&line.resource_type) {
                slot.subtract(line.amount);
            }
        }
        true
    }

    /// Non-zero holdings, for the save snapshot.
    pub fn non_zero(&self) -> Vec<ResourceStack> {
        let mut entries: Vec<ResourceStack> = self
            .resources
            .values()
            .filter(|r| r.amount > 0)
            .copied()
            .collect();
        entries.sort_by_key(|r| ResourceType::ALL.iter().position(|t| *t == r.resource_type));
        entries
    }

    /// Resets every slot to zero, then applies the saved entries.
    /// Used only by the load path.
    pub fn load_from(&mut self, entries: &[ResourceStack], max_inventory_size: u32) {
        for slot in self.resources.values_mut() {
            slot.amount = 0;
        }
        for entry in entries {
            if let Some(slot) = self.resources.get_mut(&entry.resource_type) {
                slot.amount = entry.amount;
            }
        }
        self.max_inventory_size = max_inventory_size;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCE REGISTRY — static per-type metadata, loaded at startup
// ═══════════════════════════════════════════════════════════════════════

/// Static metadata for one resource type. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: ResourceCategory,
    pub base_value: u32, // base worth for trading
    pub max_stack_size: u32,
    pub can_forage: bool,
    pub can_generate: bool,
    pub base_generation_rate: f32, // resources per minute
    pub rarity: f32,               // 1 = common, 10 = very rare
    /// Empty = available in every period.
    pub available_times: Vec<TimeOfDay>,
    /// Empty = available in all weather.
    pub available_weather: Vec<WeatherType>,
}

impl ResourceDef {
    pub fn is_available_at(&self, period: TimeOfDay) -> bool {
        self.available_times.is_empty() || self.available_times.contains(&period)
    }

    pub fn is_available_in(&self, weather: WeatherType) -> bool {
        self.available_weather.is_empty() || self.available_weather.contains(&weather)
    }

    pub fn is_available(&self, period: TimeOfDay, weather: WeatherType) -> bool {
        self.is_available_at(period) && self.is_available_in(weather)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ResourceRegistry {
    definitions: HashMap<ResourceType, ResourceDef>,
    by_id: HashMap<String, ResourceType>,
}

impl ResourceRegistry {
    pub fn insert(&mut self, resource_type: ResourceType, def: ResourceDef) {
        self.by_id.insert(def.id.clone(), resource_type);
        self.definitions.insert(resource_type, def);
    }

    pub fn get(&self, resource_type: ResourceType) -> Option<&ResourceDef> {
        self.definitions.get(&resource_type)
    }

    /// Lookup by string identifier. Unknown ids are a `None`, never a crash.
    pub fn get_by_id(&self, id: &str) -> Option<&ResourceDef> {
        self.by_id.get(id).and_then(|ty| self.definitions.get(ty))
    }

    /// Stack ceiling for a type, falling back to the global default for
    /// types without a definition.
    pub fn max_stack(&self, resource_type: ResourceType) -> u32 {
        self.get(resource_type)
            .map(|d| d.max_stack_size)
            .unwrap_or(DEFAULT_MAX_STACK)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DECORATIONS & PASSIVE HARVESTERS
// ═══════════════════════════════════════════════════════════════════════

/// Every placeable decoration. Harvester behavior is data, not a class
/// hierarchy: kinds with a `harvester_spec` generate passively, the rest
/// are scenery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecorationKind {
    // Passive harvesters
    Bucket,       // collects water during rain
    FlowerPot,    // sprouts seeds in the afternoon sun
    LightningRod, // crystallizes storm energy
    MoonCrystal,  // charges with moonbeams at night
    SpiderWeb,    // traps insects
    // Visual decorations
    Plant,
    WindChimes,
    TikiTorch,
    Fountain,
    Mask,
    // Interactive elements
    BirdPerch,
    Terrarium,
    Mailbox,
    Hut,
}

impl DecorationKind {
    pub fn display_name(self) -> &'static str {
        match self {
            DecorationKind::Bucket => "Water Bucket",
            DecorationKind::FlowerPot => "Flower Pot",
            DecorationKind::LightningRod => "Lightning Rod",
            DecorationKind::MoonCrystal => "Moon Crystal",
            DecorationKind::SpiderWeb => "Spider Web",
            DecorationKind::Plant => "Jungle Plant",
            DecorationKind::WindChimes => "Wind Chimes",
            DecorationKind::TikiTorch => "Tiki Torch",
            DecorationKind::Fountain => "Fountain",
            DecorationKind::Mask => "Tribal Mask",
            DecorationKind::BirdPerch => "Bird Perch",
            DecorationKind::Terrarium => "Terrarium",
            DecorationKind::Mailbox => "Mailbox",
            DecorationKind::Hut => "Hut",
        }
    }

    /// Passive-generation parameters per kind. `None` = purely decorative.
    pub fn harvester_spec(self) -> Option<HarvesterSpec> {
        match self {
            DecorationKind::Bucket => Some(HarvesterSpec {
                resource: ResourceType::Water,
                max_capacity: 5,
                generation_interval: 5.0,
                gate: GenerationGate::Raining,
                yield_rule: YieldRule::RainIntensityBonus,
            }),
            DecorationKind::FlowerPot => Some(HarvesterSpec {
                resource: ResourceType::Seeds,
                max_capacity: 8,
                generation_interval: 45.0,
                gate: GenerationGate::During(TimeOfDay::Afternoon),
                yield_rule: YieldRule::Flat(1),
            }),
            DecorationKind::LightningRod => Some(HarvesterSpec {
                resource: ResourceType::Gems,
                max_capacity: 2,
                generation_interval: 20.0,
                gate: GenerationGate::Storming,
                yield_rule: YieldRule::Flat(1),
            }),
            DecorationKind::MoonCrystal => Some(HarvesterSpec {
                resource: ResourceType::Moonbeams,
                max_capacity: 3,
                generation_interval: 30.0,
                gate: GenerationGate::During(TimeOfDay::Night),
                yield_rule: YieldRule::Flat(1),
            }),
            DecorationKind::SpiderWeb => Some(HarvesterSpec {
                resource: ResourceType::Caterpillars,
                max_capacity: 4,
                generation_interval: 60.0,
                gate: GenerationGate::Always,
                yield_rule: YieldRule::Flat(1),
            }),
            _ => None,
        }
    }
}

/// External condition a harvester needs before it generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationGate {
    Always,
    Raining,  // Rain or Storm
    Storming, // Storm only
    During(TimeOfDay),
}

/// How much a harvester produces per satisfied generation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldRule {
    Flat(u32),
    /// `round(1 + rain intensity)` — 1 or 2 water per fill.
    RainIntensityBonus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvesterSpec {
    pub resource: ResourceType,
    pub max_capacity: u32,
    pub generation_interval: f32, // seconds between generations
    pub gate: GenerationGate,
    pub yield_rule: YieldRule,
}

/// A decoration placed on the desktop.
#[derive(Component, Debug, Clone)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub position: (f32, f32),
    pub locked: bool,
}

/// Passive-generation state for harvester decorations. The buffer is local
/// to the decoration; a separate collect step moves it into the Inventory.
#[derive(Component, Debug, Clone)]
pub struct Harvester {
    pub resource: ResourceType,
    pub current_amount: u32,
    pub max_capacity: u32,
    pub generation_interval: f32,
    /// Timestamp against `TickClock::elapsed_seconds`.
    pub last_generation_time: f64,
    pub is_active: bool,
}

impl Harvester {
    pub fn from_spec(spec: &HarvesterSpec, now: f64) -> Self {
        Self {
            resource: spec.resource,
            current_amount: 0,
            max_capacity: spec.max_capacity,
            generation_interval: spec.generation_interval,
            last_generation_time: now,
            is_active: true,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_amount >= self.max_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.current_amount == 0
    }

    pub fn capacity_percent(&self) -> f32 {
        self.current_amount as f32 / self.max_capacity as f32
    }
}

/// Serializable state of one placed decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationSaveData {
    pub kind: DecorationKind,
    pub position: (f32, f32),
    pub locked: bool,
    // Harvester state; zero/inactive defaults for scenery kinds.
    pub current_amount: u32,
    pub last_generation_time: f64,
    pub is_active: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// FORAGING — transient collectables
// ═══════════════════════════════════════════════════════════════════════

/// A short-lived collectable on screen (dewdrop, raindrop, …).
/// Not persisted: a reload simply spawns fresh ones.
#[derive(Component, Debug, Clone)]
pub struct Collectable {
    pub resource_type: ResourceType,
    pub amount: u32,
    pub method: CollectionMethod,
    pub lifetime: f32, // seconds before it expires
    /// Timestamp against `TickClock::elapsed_seconds`.
    pub spawned_at: f64,
    pub position: (f32, f32),
}

// ═══════════════════════════════════════════════════════════════════════
// SHOP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopCategory {
    Decorations,
    Resources,
    Tools,
    Upgrades,
    Premium,
    Special,
}

/// What a purchase actually does. The last five are reserved for future
/// phases and succeed as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEffect {
    Decoration(DecorationKind),
    ResourceGrant {
        resource_type: ResourceType,
        amount: u32,
    },
    ToolUpgrade,
    CapacityUpgrade,
    Multiplier,
    Unlock,
    Consumable,
}

#[derive(Debug, Clone)]
pub struct ShopItem {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub category: ShopCategory,
    pub effect: ShopEffect,
    pub cost: ResourceCost,
    pub unlocked: bool,
    /// Item ids that must have been purchased before this one unlocks.
    pub prerequisites: Vec<String>,
    pub limited: bool,
    pub max_purchases: u32,
    pub purchase_count: u32,
}

impl ShopItem {
    pub fn can_purchase(&self) -> bool {
        self.unlocked && (!self.limited || self.purchase_count < self.max_purchases)
    }

    pub fn is_maxed_out(&self) -> bool {
        self.limited && self.purchase_count >= self.max_purchases
    }

    pub fn remaining_purchases(&self) -> Option<u32> {
        self.limited
            .then(|| self.max_purchases.saturating_sub(self.purchase_count))
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ShopCatalog {
    items: HashMap<String, ShopItem>,
}

impl ShopCatalog {
    pub fn insert(&mut self, item: ShopItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &str) -> Option<&ShopItem> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ShopItem> {
        self.items.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShopItem> {
        self.items.values()
    }

    pub fn in_category(&self, category: ShopCategory) -> Vec<&ShopItem> {
        self.items
            .values()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Unlocks every still-locked item whose prerequisites have all been
    /// purchased at least once. Called after each successful purchase and
    /// after loading purchase counts.
    pub fn refresh_unlocks(&mut self) {
        let purchased: Vec<String> = self
            .items
            .values()
            .filter(|i| i.purchase_count > 0)
            .map(|i| i.id.clone())
            .collect();
        for item in self.items.values_mut() {
            if !item.unlocked
                && !item.prerequisites.is_empty()
                && item.prerequisites.iter().all(|p| purchased.contains(p))
            {
                item.unlocked = true;
            }
        }
    }

    /// Non-zero purchase counts, for the save snapshot.
    pub fn purchase_counts(&self) -> HashMap<String, u32> {
        self.items
            .values()
            .filter(|i| i.purchase_count > 0)
            .map(|i| (i.id.clone(), i.purchase_count))
            .collect()
    }

    /// Used only by the load path. Unknown ids are ignored.
    pub fn load_purchase_counts(&mut self, counts: &HashMap<String, u32>) {
        for item in self.items.values_mut() {
            item.purchase_count = counts.get(&item.id).copied().unwrap_or(0);
        }
        self.refresh_unlocks();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STATISTICS
// ═══════════════════════════════════════════════════════════════════════

/// Cumulative play counters. Persisted wholesale in the save snapshot.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayStats {
    pub total_resources_collected: u64,
    pub total_actively_foraged: u64,
    pub total_passively_harvested: u64,
    pub water_collected: u64,
    pub bugs_collected: u64,
    pub seeds_collected: u64,
    pub gems_collected: u64,
    pub decorations_placed: u32,
    pub decorations_moved: u32,
    pub harvesters_built: u32,
    pub days_played: u32,
    pub sessions_played: u32,
    pub rare_events_witnessed: u32,
    pub unicorn_encounters: u32,
    pub mermaid_encounters: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// One simulated second has elapsed. Emitted by the clock; consumed by the
/// day cycle, weather, foraging, and harvesters.
#[derive(Event, Debug, Clone)]
pub struct SecondTickEvent;

#[derive(Event, Debug, Clone)]
pub struct HourChangedEvent {
    pub hour: f32,
}

#[derive(Event, Debug, Clone)]
pub struct PeriodChangedEvent {
    pub period: TimeOfDay,
}

#[derive(Event, Debug, Clone)]
pub struct NewDayEvent;

/// Debug entry point: rescale simulated time. Clamped at >= 0.
#[derive(Event, Debug, Clone)]
pub struct SetTimeScaleEvent {
    pub scale: f32,
}

#[derive(Event, Debug, Clone)]
pub struct WeatherChangedEvent {
    pub condition: WeatherType,
}

/// Fired after every weather transition, even one that keeps the condition.
#[derive(Event, Debug, Clone)]
pub struct WeatherIntensityChangedEvent {
    pub condition: WeatherType,
    pub intensity: f32,
}

#[derive(Event, Debug, Clone)]
pub struct RainStartedEvent;

#[derive(Event, Debug, Clone)]
pub struct RainStoppedEvent;

/// Debug entry point: force a weather condition with a fresh intensity.
#[derive(Event, Debug, Clone)]
pub struct ForceWeatherEvent {
    pub condition: WeatherType,
}

#[derive(Event, Debug, Clone)]
pub struct ResourceChangedEvent {
    pub resource_type: ResourceType,
    pub new_amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct ResourceGainedEvent {
    pub resource_type: ResourceType,
    pub amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct InventoryFullEvent;

#[derive(Event, Debug, Clone)]
pub struct CollectableSpawnedEvent {
    pub entity: Entity,
    pub resource_type: ResourceType,
}

#[derive(Event, Debug, Clone)]
pub struct CollectableCollectedEvent {
    pub resource_type: ResourceType,
    pub amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct CollectableExpiredEvent {
    pub resource_type: ResourceType,
}

/// Input from the pointer collaborator: the player triggered a collectable.
#[derive(Event, Debug, Clone)]
pub struct CollectCollectableEvent {
    pub entity: Entity,
}

/// Request to place a decoration. `None` position = random spot inside the
/// placement bounds. Sent by the shop on purchase and by the placement UI.
#[derive(Event, Debug, Clone)]
pub struct PlaceDecorationEvent {
    pub kind: DecorationKind,
    pub position: Option<(f32, f32)>,
}

#[derive(Event, Debug, Clone)]
pub struct DecorationPlacedEvent {
    pub entity: Entity,
    pub kind: DecorationKind,
}

/// Input from the drag collaborator: a decoration was moved.
#[derive(Event, Debug, Clone)]
pub struct MoveDecorationEvent {
    pub entity: Entity,
    pub position: (f32, f32),
}

#[derive(Event, Debug, Clone)]
pub struct DecorationMovedEvent {
    pub entity: Entity,
    pub kind: DecorationKind,
}

#[derive(Event, Debug, Clone)]
pub struct RemoveDecorationEvent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct DecorationRemovedEvent {
    pub kind: DecorationKind,
}

/// Input: lock or unlock a decoration against dragging.
#[derive(Event, Debug, Clone)]
pub struct SetDecorationLockedEvent {
    pub entity: Entity,
    pub locked: bool,
}

/// Input: toggle a harvester on or off.
#[derive(Event, Debug, Clone)]
pub struct SetHarvesterActiveEvent {
    pub entity: Entity,
    pub active: bool,
}

/// Input: the player triggered a harvester's collect.
#[derive(Event, Debug, Clone)]
pub struct CollectHarvesterEvent {
    pub entity: Entity,
}

#[derive(Event, Debug, Clone)]
pub struct HarvesterGeneratedEvent {
    pub entity: Entity,
    pub resource_type: ResourceType,
    pub amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct HarvesterFullEvent {
    pub entity: Entity,
    pub resource_type: ResourceType,
}

#[derive(Event, Debug, Clone)]
pub struct HarvesterCollectedEvent {
    pub entity: Entity,
    pub resource_type: ResourceType,
    pub amount: u32,
}

/// Input from the shop UI: the player confirmed a purchase.
#[derive(Event, Debug, Clone)]
pub struct PurchaseRequestEvent {
    pub item_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPurchasedEvent {
    pub item_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseFailedEvent {
    pub item_id: Option<String>,
    pub reason: String,
}

/// Input: manual save trigger (timer, focus-loss, or the save button).
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Input: reload the snapshot from disk.
#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

#[derive(Event, Debug, Clone)]
pub struct GameSavedEvent;

#[derive(Event, Debug, Clone)]
pub struct GameLoadedEvent;

/// Non-fatal: the save could not be written. Retryable.
#[derive(Event, Debug, Clone)]
pub struct SaveErrorEvent {
    pub reason: String,
}

/// Non-fatal: the save file was unreadable and a fresh state was applied.
#[derive(Event, Debug, Clone)]
pub struct LoadErrorEvent {
    pub reason: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SAVE_VERSION: &str = "1.0";

pub const MAX_INVENTORY_SIZE: u32 = 100;
pub const DEFAULT_MAX_STACK: u32 = 999;

pub const DAY_LENGTH_MINUTES: f32 = 24.0; // real minutes per game day
pub const DEFAULT_START_HOUR: f32 = 8.0;

pub const WEATHER_CHANGE_INTERVAL: f32 = 300.0; // seconds, nominal

pub const AUTOSAVE_INTERVAL_SECONDS: f32 = 300.0;

pub const MAX_DEWDROPS: usize = 5;
pub const DEWDROP_SPAWN_CHANCE: f32 = 0.1; // per second during morning
pub const DEWDROP_LIFETIME: f32 = 60.0;
pub const RAINDROP_SPAWN_RATE: f32 = 2.0; // per second during rain
pub const RAINDROP_LIFETIME: f32 = 10.0;

/// Half-extents of the random placement area for decorations.
pub const PLACEMENT_BOUNDS: (f32, f32) = (10.0, 6.0);

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
