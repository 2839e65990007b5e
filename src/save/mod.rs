//! Save domain — snapshot persistence for the whole simulation.
//!
//! One JSON file holds the complete state: inventory, every placed
//! decoration, the day cycle, the weather, shop purchase counts, and the
//! cumulative statistics. Saves overwrite the file wholesale (temp file +
//! rename, so a crash mid-write never corrupts the previous save); loads
//! read it wholesale and push every field back through each component's
//! explicit set-state entry point — never by replaying elapsed time.
//!
//! Failure handling is deliberately soft: a failed write raises
//! SaveErrorEvent and the simulation carries on; a missing file is a fresh
//! start, and a corrupt file raises LoadErrorEvent and falls back to a
//! fresh snapshot rather than leaving the world half-initialized.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════

/// The complete persisted state of the simulation at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub save_version: String,
    pub saved_at: u64, // unix seconds
    pub total_play_time_seconds: f64,
    /// Only non-zero holdings are stored.
    pub resources: Vec<ResourceStack>,
    pub max_inventory_size: u32,
    pub decorations: Vec<DecorationSaveData>,
    pub time_hour_of_day: f32,
    pub time_scale: f32,
    pub weather_condition: WeatherType,
    pub weather_intensity: f32,
    /// Only items purchased at least once are stored.
    pub shop_purchase_counts: HashMap<String, u32>,
    pub stats: PlayStats,
}

impl Default for SaveSnapshot {
    fn default() -> Self {
        let weather = WeatherState::default();
        Self {
            save_version: SAVE_VERSION.to_string(),
            saved_at: 0,
            total_play_time_seconds: 0.0,
            resources: Vec::new(),
            max_inventory_size: MAX_INVENTORY_SIZE,
            decorations: Vec::new(),
            time_hour_of_day: DEFAULT_START_HOUR,
            time_scale: 1.0,
            weather_condition: weather.condition,
            weather_intensity: weather.intensity,
            shop_purchase_counts: HashMap::new(),
            stats: PlayStats::default(),
        }
    }
}

/// Assembles a snapshot from live state. Runs synchronously inside the tick,
/// so the captured fields are mutually consistent — no torn reads.
pub fn build_snapshot(
    inventory: &Inventory,
    decorations: &[(Decoration, Option<Harvester>)],
    cycle: &DayCycle,
    weather: &WeatherState,
    clock: &TickClock,
    catalog: &ShopCatalog,
    stats: &PlayStats,
) -> SaveSnapshot {
    let decorations = decorations
        .iter()
        .map(|(decoration, harvester)| DecorationSaveData {
            kind: decoration.kind,
            position: decoration.position,
            locked: decoration.locked,
            current_amount: harvester.as_ref().map(|h| h.current_amount).unwrap_or(0),
            last_generation_time: harvester
                .as_ref()
                .map(|h| h.last_generation_time)
                .unwrap_or(0.0),
            is_active: harvester.as_ref().map(|h| h.is_active).unwrap_or(false),
        })
        .collect();

    SaveSnapshot {
        save_version: SAVE_VERSION.to_string(),
        saved_at: current_timestamp(),
        total_play_time_seconds: clock.elapsed_seconds,
        resources: inventory.non_zero(),
        max_inventory_size: inventory.max_inventory_size,
        decorations,
        time_hour_of_day: cycle.hour_of_day,
        time_scale: cycle.time_scale,
        weather_condition: weather.condition,
        weather_intensity: weather.intensity,
        shop_purchase_counts: catalog.purchase_counts(),
        stats: stats.clone(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & PLUGIN
// ═══════════════════════════════════════════════════════════════════════

/// Where the save file lives. Tests point this at a temp directory.
#[derive(Resource, Debug, Clone)]
pub struct SaveConfig {
    pub path: PathBuf,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: saves_directory().join("wildgrove_save.json"),
        }
    }
}

#[derive(Resource, Debug)]
pub struct AutosaveTimer {
    pub timer: Timer,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(AUTOSAVE_INTERVAL_SECONDS, TimerMode::Repeating),
        }
    }
}

/// A snapshot read from disk, waiting one frame for `apply_snapshot`.
#[derive(Resource, Debug, Clone)]
struct PendingSnapshot(SaveSnapshot);

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveConfig>()
            .init_resource::<AutosaveTimer>()
            .add_systems(
                Update,
                tick_autosave.run_if(in_state(GameState::Playing)),
            )
            // Saving and loading also work from the pause menu.
            .add_systems(
                Update,
                (handle_save_request, handle_load_request)
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            )
            .add_systems(
                Update,
                apply_snapshot.run_if(resource_exists::<PendingSnapshot>),
            )
            // Focus loss pauses the app externally; entering Paused is the
            // save trigger for it.
            .add_systems(OnEnter(GameState::Paused), request_save_on_pause);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILESYSTEM HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Serializes and writes atomically: temp file first, then rename.
pub fn write_snapshot(path: &PathBuf, snapshot: &SaveSnapshot) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Could not create saves directory: {}", e))?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| format!("Serialization failed: {}", e))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;

    Ok(())
}

/// What came back from disk. `Missing` is the normal first-run case, not an
/// error; `Corrupt` carries the reason for the LoadErrorEvent.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(SaveSnapshot),
    Missing,
    Corrupt(String),
}

pub fn read_snapshot(path: &PathBuf) -> LoadOutcome {
    if !path.exists() {
        return LoadOutcome::Missing;
    }
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => return LoadOutcome::Corrupt(format!("Read failed: {}", e)),
    };
    match serde_json::from_str::<SaveSnapshot>(&json) {
        Ok(snapshot) => {
            if snapshot.save_version != SAVE_VERSION {
                warn!(
                    "[Save] Snapshot version {} differs from current {}. Attempting to load anyway.",
                    snapshot.save_version, SAVE_VERSION
                );
            }
            LoadOutcome::Loaded(snapshot)
        }
        Err(e) => LoadOutcome::Corrupt(format!("Deserialization failed: {}", e)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn tick_autosave(
    time: Res<Time>,
    mut autosave: ResMut<AutosaveTimer>,
    mut save_writer: EventWriter<SaveRequestEvent>,
) {
    if autosave.timer.tick(time.delta()).just_finished() {
        info!("[Save] Autosave triggered");
        save_writer.send(SaveRequestEvent);
    }
}

fn request_save_on_pause(mut save_writer: EventWriter<SaveRequestEvent>) {
    info!("[Save] Paused — saving");
    save_writer.send(SaveRequestEvent);
}

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    config: Res<SaveConfig>,
    inventory: Res<Inventory>,
    decorations: Query<(&Decoration, Option<&Harvester>)>,
    cycle: Res<DayCycle>,
    weather: Res<WeatherState>,
    clock: Res<TickClock>,
    catalog: Res<ShopCatalog>,
    stats: Res<PlayStats>,
    mut saved_writer: EventWriter<GameSavedEvent>,
    mut error_writer: EventWriter<SaveErrorEvent>,
) {
    // Coalesce multiple requests arriving in one frame into a single write.
    if save_events.read().next().is_none() {
        return;
    }
    save_events.clear();

    let placed: Vec<(Decoration, Option<Harvester>)> = decorations
        .iter()
        .map(|(d, h)| (d.clone(), h.cloned()))
        .collect();

    let snapshot = build_snapshot(
        &inventory, &placed, &cycle, &weather, &clock, &catalog, &stats,
    );

    match write_snapshot(&config.path, &snapshot) {
        Ok(()) => {
            info!("[Save] Game saved to {}", config.path.display());
            saved_writer.send(GameSavedEvent);
        }
        Err(reason) => {
            warn!("[Save] Save FAILED: {}", reason);
            error_writer.send(SaveErrorEvent { reason });
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    config: Res<SaveConfig>,
    mut commands: Commands,
    mut error_writer: EventWriter<LoadErrorEvent>,
) {
    if load_events.read().next().is_none() {
        return;
    }
    load_events.clear();

    let snapshot = match read_snapshot(&config.path) {
        LoadOutcome::Loaded(snapshot) => {
            info!("[Save] Loaded snapshot from {}", config.path.display());
            snapshot
        }
        LoadOutcome::Missing => {
            info!("[Save] No save file found — starting fresh");
            SaveSnapshot::default()
        }
        LoadOutcome::Corrupt(reason) => {
            warn!("[Save] Load FAILED: {} — starting fresh", reason);
            error_writer.send(LoadErrorEvent { reason });
            SaveSnapshot::default()
        }
    };

    commands.insert_resource(PendingSnapshot(snapshot));
}

/// Pushes a loaded snapshot into every live component through its explicit
/// set-state entry point. Existing decorations are despawned and replaced
/// wholesale. No placed/changed events are replayed for the respawned
/// entities — listeners get one GameLoadedEvent and re-query.
fn apply_snapshot(
    mut commands: Commands,
    pending: Res<PendingSnapshot>,
    existing: Query<Entity, With<Decoration>>,
    mut inventory: ResMut<Inventory>,
    mut cycle: ResMut<DayCycle>,
    mut weather: ResMut<WeatherState>,
    mut clock: ResMut<TickClock>,
    mut catalog: ResMut<ShopCatalog>,
    mut stats: ResMut<PlayStats>,
    mut loaded_writer: EventWriter<GameLoadedEvent>,
    mut hour_writer: EventWriter<HourChangedEvent>,
    mut period_writer: EventWriter<PeriodChangedEvent>,
    mut weather_writer: EventWriter<WeatherChangedEvent>,
    mut intensity_writer: EventWriter<WeatherIntensityChangedEvent>,
    mut rain_start_writer: EventWriter<RainStartedEvent>,
    mut rain_stop_writer: EventWriter<RainStoppedEvent>,
) {
    let snapshot = &pending.0;

    // Clock first: decoration timestamps are relative to it.
    clock.elapsed_seconds = snapshot.total_play_time_seconds;
    clock.carry = 0.0;

    inventory.load_from(&snapshot.resources, snapshot.max_inventory_size);

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    for data in &snapshot.decorations {
        let mut entity_commands = commands.spawn(Decoration {
            kind: data.kind,
            position: data.position,
            locked: data.locked,
        });
        if let Some(spec) = data.kind.harvester_spec() {
            let mut harvester = Harvester::from_spec(&spec, data.last_generation_time);
            harvester.current_amount = data.current_amount.min(spec.max_capacity);
            harvester.is_active = data.is_active;
            entity_commands.insert(harvester);
        }
    }

    // Time: set-state entry point, both change events unconditionally.
    cycle.set_time(snapshot.time_hour_of_day);
    cycle.time_scale = snapshot.time_scale.max(0.0);
    hour_writer.send(HourChangedEvent {
        hour: cycle.hour_of_day,
    });
    period_writer.send(PeriodChangedEvent {
        period: cycle.period,
    });

    // Weather: restore the saved intensity verbatim.
    let was_raining = weather.is_raining();
    weather.restore(snapshot.weather_condition, snapshot.weather_intensity);
    weather_writer.send(WeatherChangedEvent {
        condition: weather.condition,
    });
    intensity_writer.send(WeatherIntensityChangedEvent {
        condition: weather.condition,
        intensity: weather.intensity,
    });
    if !was_raining && weather.is_raining() {
        rain_start_writer.send(RainStartedEvent);
    } else if was_raining && !weather.is_raining() {
        rain_stop_writer.send(RainStoppedEvent);
    }

    catalog.load_purchase_counts(&snapshot.shop_purchase_counts);

    *stats = snapshot.stats.clone();
    stats.sessions_played += 1;

    info!(
        "[Save] Snapshot applied — {:.0}s played, {} decorations, {:?} at {:.1}h",
        snapshot.total_play_time_seconds,
        snapshot.decorations.len(),
        weather.condition,
        cycle.hour_of_day
    );

    commands.remove_resource::<PendingSnapshot>();
    loaded_writer.send(GameLoadedEvent);
}

// ═══════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════
