//! Decorations domain — placed entities and passive harvesters.
//!
//! A decoration is an entity with a `Decoration` component; harvester kinds
//! additionally carry a `Harvester` buffer. Which kinds harvest, what they
//! produce, and how they are gated all comes from
//! `DecorationKind::harvester_spec()` — one lookup table instead of a class
//! hierarchy, so adding a kind is a data edit.
//!
//! Generation runs once per simulated second: each harvester checks its gate
//! (active, buffer not full, cooldown elapsed, external condition) and on
//! success buffers a yield clamped to its remaining capacity. The buffer is
//! private — only an explicit collect moves it into the Inventory, and a
//! failed collect must leave the buffer untouched.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct DecorationsPlugin;

impl Plugin for DecorationsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_place,
                handle_move,
                handle_remove,
                handle_set_locked,
                handle_set_active,
                tick_harvesters,
                handle_collect,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Generation rules ─────────────────────────────────────────────────────────

/// Does the harvester's external condition currently hold?
pub fn gate_satisfied(gate: GenerationGate, weather: &WeatherState, cycle: &DayCycle) -> bool {
    match gate {
        GenerationGate::Always => true,
        GenerationGate::Raining => weather.is_raining(),
        GenerationGate::Storming => weather.condition == WeatherType::Storm,
        GenerationGate::During(period) => cycle.period == period,
    }
}

/// Yield for one satisfied generation tick, before capacity clamping.
pub fn generation_amount(rule: YieldRule, weather: &WeatherState) -> u32 {
    match rule {
        YieldRule::Flat(n) => n,
        // Heavier rain fills faster: 1-2 per tick.
        YieldRule::RainIntensityBonus => (1.0 + weather.intensity).round() as u32,
    }
}

/// Full gating predicate: active, room in the buffer, cooldown elapsed
/// since the last successful generation, and the external condition holds.
pub fn can_generate(
    harvester: &Harvester,
    gate: GenerationGate,
    now: f64,
    weather: &WeatherState,
    cycle: &DayCycle,
) -> bool {
    harvester.is_active
        && !harvester.is_full()
        && now - harvester.last_generation_time >= harvester.generation_interval as f64
        && gate_satisfied(gate, weather, cycle)
}

/// Buffers one generation's yield, clamped to remaining capacity, and stamps
/// the generation timestamp. Returns the applied amount (None when the yield
/// clamps to zero).
pub fn try_generate(
    harvester: &mut Harvester,
    rule: YieldRule,
    now: f64,
    weather: &WeatherState,
) -> Option<u32> {
    let amount = generation_amount(rule, weather);
    let actual = amount.min(harvester.max_capacity - harvester.current_amount);
    if actual == 0 {
        return None;
    }
    harvester.current_amount += actual;
    harvester.last_generation_time = now;
    Some(actual)
}

/// Moves the whole buffer into the inventory, or nothing at all.
///
/// The transfer must conserve resources: the buffer only fits if both the
/// global ceiling and the type's stack ceiling have room for the full
/// amount, because a clamped partial pour would destroy the remainder.
/// Returns the collected amount, or None (buffer empty / inventory cannot
/// take it — retryable).
pub fn collect_all(
    harvester: &mut Harvester,
    inventory: &mut Inventory,
    max_stack: u32,
) -> Option<u32> {
    if harvester.is_empty() {
        return None;
    }
    let amount = harvester.current_amount;
    if inventory
        .amount_of(harvester.resource)
        .saturating_add(amount)
        > max_stack
    {
        return None;
    }
    match inventory.add(harvester.resource, amount, max_stack) {
        Some(_) => {
            harvester.current_amount = 0;
            Some(amount)
        }
        None => None,
    }
}

// ─── Placement & manipulation ─────────────────────────────────────────────────

fn random_placement(rng: &mut impl Rng) -> (f32, f32) {
    (
        rng.gen_range(-PLACEMENT_BOUNDS.0..PLACEMENT_BOUNDS.0),
        rng.gen_range(-PLACEMENT_BOUNDS.1..PLACEMENT_BOUNDS.1),
    )
}

fn handle_place(
    mut requests: EventReader<PlaceDecorationEvent>,
    clock: Res<TickClock>,
    mut commands: Commands,
    mut placed_writer: EventWriter<DecorationPlacedEvent>,
) {
    for ev in requests.read() {
        let position = ev
            .position
            .unwrap_or_else(|| random_placement(&mut rand::thread_rng()));

        let mut entity_commands = commands.spawn(Decoration {
            kind: ev.kind,
            position,
            locked: false,
        });
        if let Some(spec) = ev.kind.harvester_spec() {
            entity_commands.insert(Harvester::from_spec(&spec, clock.elapsed_seconds));
        }
        let entity = entity_commands.id();

        info!(
            "[Decorations] Placed {} at ({:.1}, {:.1})",
            ev.kind.display_name(),
            position.0,
            position.1
        );
        placed_writer.send(DecorationPlacedEvent {
            entity,
            kind: ev.kind,
        });
    }
}

fn handle_move(
    mut requests: EventReader<MoveDecorationEvent>,
    mut decorations: Query<&mut Decoration>,
    mut moved_writer: EventWriter<DecorationMovedEvent>,
) {
    for ev in requests.read() {
        let Ok(mut decoration) = decorations.get_mut(ev.entity) else {
            continue;
        };
        if decoration.locked {
            continue;
        }
        decoration.position = ev.position;
        moved_writer.send(DecorationMovedEvent {
            entity: ev.entity,
            kind: decoration.kind,
        });
    }
}

fn handle_remove(
    mut requests: EventReader<RemoveDecorationEvent>,
    decorations: Query<&Decoration>,
    mut commands: Commands,
    mut removed_writer: EventWriter<DecorationRemovedEvent>,
) {
    for ev in requests.read() {
        let Ok(decoration) = decorations.get(ev.entity) else {
            continue;
        };
        let kind = decoration.kind;
        commands.entity(ev.entity).despawn();
        removed_writer.send(DecorationRemovedEvent { kind });
    }
}

fn handle_set_locked(
    mut requests: EventReader<SetDecorationLockedEvent>,
    mut decorations: Query<&mut Decoration>,
) {
    for ev in requests.read() {
        if let Ok(mut decoration) = decorations.get_mut(ev.entity) {
            decoration.locked = ev.locked;
        }
    }
}

fn handle_set_active(
    mut requests: EventReader<SetHarvesterActiveEvent>,
    mut harvesters: Query<&mut Harvester>,
) {
    for ev in requests.read() {
        if let Ok(mut harvester) = harvesters.get_mut(ev.entity) {
            harvester.is_active = ev.active;
        }
    }
}

// ─── Generation tick ──────────────────────────────────────────────────────────

fn tick_harvesters(
    mut ticks: EventReader<SecondTickEvent>,
    clock: Res<TickClock>,
    weather: Res<WeatherState>,
    cycle: Res<DayCycle>,
    mut harvesters: Query<(Entity, &Decoration, &mut Harvester)>,
    mut generated_writer: EventWriter<HarvesterGeneratedEvent>,
    mut full_writer: EventWriter<HarvesterFullEvent>,
) {
    for _tick in ticks.read() {
        for (entity, decoration, mut harvester) in &mut harvesters {
            let Some(spec) = decoration.kind.harvester_spec() else {
                continue;
            };
            if !can_generate(
                &harvester,
                spec.gate,
                clock.elapsed_seconds,
                &weather,
                &cycle,
            ) {
                continue;
            }
            if let Some(amount) = try_generate(
                &mut harvester,
                spec.yield_rule,
                clock.elapsed_seconds,
                &weather,
            ) {
                generated_writer.send(HarvesterGeneratedEvent {
                    entity,
                    resource_type: harvester.resource,
                    amount,
                });
                if harvester.is_full() {
                    full_writer.send(HarvesterFullEvent {
                        entity,
                        resource_type: harvester.resource,
                    });
                }
            }
        }
    }
}

// ─── Collection ───────────────────────────────────────────────────────────────

fn handle_collect(
    mut requests: EventReader<CollectHarvesterEvent>,
    registry: Res<ResourceRegistry>,
    mut inventory: ResMut<Inventory>,
    mut harvesters: Query<&mut Harvester>,
    mut collected_writer: EventWriter<HarvesterCollectedEvent>,
    mut changed_writer: EventWriter<ResourceChangedEvent>,
    mut gained_writer: EventWriter<ResourceGainedEvent>,
    mut full_writer: EventWriter<InventoryFullEvent>,
) {
    for ev in requests.read() {
        let Ok(mut harvester) = harvesters.get_mut(ev.entity) else {
            continue;
        };
        if harvester.is_empty() {
            continue;
        }

        let max_stack = registry.max_stack(harvester.resource);
        match collect_all(&mut harvester, &mut inventory, max_stack) {
            Some(amount) => {
                collected_writer.send(HarvesterCollectedEvent {
                    entity: ev.entity,
                    resource_type: harvester.resource,
                    amount,
                });
                changed_writer.send(ResourceChangedEvent {
                    resource_type: harvester.resource,
                    new_amount: inventory.amount_of(harvester.resource),
                });
                gained_writer.send(ResourceGainedEvent {
                    resource_type: harvester.resource,
                    amount,
                });
            }
            None => {
                info!(
                    "[Decorations] Inventory cannot take {} {:?} — buffer kept",
                    harvester.current_amount, harvester.resource
                );
                full_writer.send(InventoryFullEvent);
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
