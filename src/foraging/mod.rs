//! Foraging domain — active collection of transient collectables.
//!
//! Spawns short-lived collectable entities according to time and weather
//! (dewdrops on morning grass, raindrops while it rains), expires them when
//! their lifetime runs out, and handles the collect trigger coming in from
//! the pointer collaborator. Collection pushes straight into the Inventory;
//! a full inventory leaves the collectable in place so the player can retry
//! after making room.
//!
//! Collectables are deliberately not persisted — they are screen litter,
//! and a reload just grows fresh dew.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct ForagingPlugin;

impl Plugin for ForagingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_dewdrops,
                spawn_raindrops,
                expire_collectables,
                clear_dewdrops_when_morning_ends,
                handle_collect,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Spawning ─────────────────────────────────────────────────────────────────

/// Random point inside the gameplay bounds.
fn random_position(rng: &mut impl Rng) -> (f32, f32) {
    (
        rng.gen_range(-PLACEMENT_BOUNDS.0..PLACEMENT_BOUNDS.0),
        rng.gen_range(-PLACEMENT_BOUNDS.1..PLACEMENT_BOUNDS.1),
    )
}

/// Morning dew: once per second, a small chance of a new dewdrop, capped at
/// MAX_DEWDROPS on screen.
fn spawn_dewdrops(
    mut ticks: EventReader<SecondTickEvent>,
    cycle: Res<DayCycle>,
    clock: Res<TickClock>,
    collectables: Query<&Collectable>,
    mut commands: Commands,
    mut spawned_writer: EventWriter<CollectableSpawnedEvent>,
) {
    for _tick in ticks.read() {
        if cycle.period != TimeOfDay::Morning {
            continue;
        }

        let dewdrops = collectables
            .iter()
            .filter(|c| c.resource_type == ResourceType::Water && c.method == CollectionMethod::Click)
            .count();
        if dewdrops >= MAX_DEWDROPS {
            continue;
        }

        let mut rng = rand::thread_rng();
        if rng.gen::<f32>() >= DEWDROP_SPAWN_CHANCE {
            continue;
        }

        let entity = commands
            .spawn(Collectable {
                resource_type: ResourceType::Water,
                amount: 1,
                method: CollectionMethod::Click,
                lifetime: DEWDROP_LIFETIME,
                spawned_at: clock.elapsed_seconds,
                position: random_position(&mut rng),
            })
            .id();
        spawned_writer.send(CollectableSpawnedEvent {
            entity,
            resource_type: ResourceType::Water,
        });
    }
}

/// Rain: per-frame spawn chance scaled by intensity, so a storm visibly
/// drops more than a drizzle.
fn spawn_raindrops(
    time: Res<Time>,
    weather: Res<WeatherState>,
    clock: Res<TickClock>,
    mut commands: Commands,
    mut spawned_writer: EventWriter<CollectableSpawnedEvent>,
) {
    if !weather.is_raining() {
        return;
    }

    let mut rng = rand::thread_rng();
    let chance = RAINDROP_SPAWN_RATE * weather.intensity * time.delta_secs();
    if rng.gen::<f32>() >= chance {
        return;
    }

    // Raindrops enter from above the play area.
    let x = rng.gen_range(-PLACEMENT_BOUNDS.0..PLACEMENT_BOUNDS.0);
    let entity = commands
        .spawn(Collectable {
            resource_type: ResourceType::Water,
            amount: 1,
            method: CollectionMethod::Drag,
            lifetime: RAINDROP_LIFETIME,
            spawned_at: clock.elapsed_seconds,
            position: (x, PLACEMENT_BOUNDS.1 + 1.0),
        })
        .id();
    spawned_writer.send(CollectableSpawnedEvent {
        entity,
        resource_type: ResourceType::Water,
    });
}

// ─── Expiry ───────────────────────────────────────────────────────────────────

pub fn is_expired(collectable: &Collectable, now: f64) -> bool {
    now - collectable.spawned_at >= collectable.lifetime as f64
}

fn expire_collectables(
    mut ticks: EventReader<SecondTickEvent>,
    clock: Res<TickClock>,
    collectables: Query<(Entity, &Collectable)>,
    mut commands: Commands,
    mut expired_writer: EventWriter<CollectableExpiredEvent>,
) {
    if ticks.is_empty() {
        return;
    }
    ticks.clear();

    for (entity, collectable) in &collectables {
        if is_expired(collectable, clock.elapsed_seconds) {
            commands.entity(entity).despawn();
            expired_writer.send(CollectableExpiredEvent {
                resource_type: collectable.resource_type,
            });
        }
    }
}

/// Dew doesn't survive the midday sun: when the period moves off Morning,
/// clear every remaining click-to-collect water drop.
fn clear_dewdrops_when_morning_ends(
    mut period_events: EventReader<PeriodChangedEvent>,
    collectables: Query<(Entity, &Collectable)>,
    mut commands: Commands,
    mut expired_writer: EventWriter<CollectableExpiredEvent>,
) {
    for ev in period_events.read() {
        if ev.period == TimeOfDay::Morning {
            continue;
        }
        for (entity, collectable) in &collectables {
            if collectable.resource_type == ResourceType::Water
                && collectable.method == CollectionMethod::Click
            {
                commands.entity(entity).despawn();
                expired_writer.send(CollectableExpiredEvent {
                    resource_type: collectable.resource_type,
                });
            }
        }
    }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// Collect trigger from the pointer collaborator. The collectable is only
/// despawned once its amount actually landed in the inventory.
fn handle_collect(
    mut requests: EventReader<CollectCollectableEvent>,
    collectables: Query<&Collectable>,
    registry: Res<ResourceRegistry>,
    mut inventory: ResMut<Inventory>,
    mut commands: Commands,
    mut collected_writer: EventWriter<CollectableCollectedEvent>,
    mut changed_writer: EventWriter<ResourceChangedEvent>,
    mut gained_writer: EventWriter<ResourceGainedEvent>,
    mut full_writer: EventWriter<InventoryFullEvent>,
) {
    for ev in requests.read() {
        // The entity may already be gone (expired this frame, double click).
        let Ok(collectable) = collectables.get(ev.entity) else {
            continue;
        };

        let max_stack = registry.max_stack(collectable.resource_type);
        match inventory.add(collectable.resource_type, collectable.amount, max_stack) {
            Some(applied) => {
                commands.entity(ev.entity).despawn();
                collected_writer.send(CollectableCollectedEvent {
                    resource_type: collectable.resource_type,
                    amount: applied,
                });
                changed_writer.send(ResourceChangedEvent {
                    resource_type: collectable.resource_type,
                    new_amount: inventory.amount_of(collectable.resource_type),
                });
                gained_writer.send(ResourceGainedEvent {
                    resource_type: collectable.resource_type,
                    amount: applied,
                });
            }
            None => {
                info!(
                    "[Foraging] Inventory full — {:?} stays on screen",
                    collectable.resource_type
                );
                full_writer.send(InventoryFullEvent);
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
