//! PlayStats trackers — passive event listeners that increment cumulative
//! play counters.
//!
//! Each system reads one or more shared events and bumps the corresponding
//! field in the `PlayStats` resource. No game logic is changed here; this
//! module is purely observational. The resource itself is persisted
//! wholesale in the save snapshot.

use bevy::prelude::*;

use crate::shared::*;

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                track_resources_gained,
                track_active_foraging,
                track_passive_harvesting,
                track_decorations,
                track_days,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Every resource gain counts toward the totals, the per-interest counters,
/// and — for the two event-exclusive resources — the rare-event log.
fn track_resources_gained(
    mut events: EventReader<ResourceGainedEvent>,
    mut stats: ResMut<PlayStats>,
) {
    for ev in events.read() {
        let amount = ev.amount as u64;
        stats.total_resources_collected = stats.total_resources_collected.saturating_add(amount);

        match ev.resource_type {
            ResourceType::Water => {
                stats.water_collected = stats.water_collected.saturating_add(amount);
            }
            ResourceType::Seeds => {
                stats.seeds_collected = stats.seeds_collected.saturating_add(amount);
            }
            ResourceType::Gems => {
                stats.gems_collected = stats.gems_collected.saturating_add(amount);
            }
            ResourceType::UnicornBlessing => {
                stats.rare_events_witnessed += 1;
                stats.unicorn_encounters += 1;
            }
            ResourceType::MermaidSong => {
                stats.rare_events_witnessed += 1;
                stats.mermaid_encounters += 1;
            }
            other => {
                if other.category() == ResourceCategory::Bugs {
                    stats.bugs_collected = stats.bugs_collected.saturating_add(amount);
                }
            }
        }
    }
}

fn track_active_foraging(
    mut events: EventReader<CollectableCollectedEvent>,
    mut stats: ResMut<PlayStats>,
) {
    for ev in events.read() {
        stats.total_actively_foraged = stats.total_actively_foraged.saturating_add(ev.amount as u64);
    }
}

fn track_passive_harvesting(
    mut events: EventReader<HarvesterCollectedEvent>,
    mut stats: ResMut<PlayStats>,
) {
    for ev in events.read() {
        stats.total_passively_harvested = stats
            .total_passively_harvested
            .saturating_add(ev.amount as u64);
    }
}

fn track_decorations(
    mut placed: EventReader<DecorationPlacedEvent>,
    mut moved: EventReader<DecorationMovedEvent>,
    mut stats: ResMut<PlayStats>,
) {
    for ev in placed.read() {
        stats.decorations_placed += 1;
        if ev.kind.harvester_spec().is_some() {
            stats.harvesters_built += 1;
        }
    }
    for _ev in moved.read() {
        stats.decorations_moved += 1;
    }
}

fn track_days(mut events: EventReader<NewDayEvent>, mut stats: ResMut<PlayStats>) {
    for _ev in events.read() {
        stats.days_played += 1;
        info!("[Stats] Days played: {}", stats.days_played);
    }
}
