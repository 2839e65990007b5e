//! Weather domain — stochastic transitions over a fixed adjacency table.
//!
//! Every simulated second the weather timer advances; once it reaches a
//! randomized threshold (re-sampled after each transition from 0.5-1.5x the
//! nominal interval) the condition steps to a uniformly-chosen neighbour in
//! the adjacency table and a fresh intensity is sampled from the new
//! condition's range.
//!
//! Snow has no inbound edge in the table — it only appears through the
//! forced-weather debug entry or a restored snapshot.
//!
//! Rain-class (Rain | Storm) edge transitions additionally fire
//! RainStartedEvent / RainStoppedEvent so harvesters and presentation don't
//! each have to diff conditions themselves.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (tick_weather, apply_forced_weather).run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Transition tables ────────────────────────────────────────────────────────

/// Which conditions the current one can step to. Uniform choice.
pub fn possible_next(current: WeatherType) -> &'static [WeatherType] {
    match current {
        WeatherType::Clear => &[
            WeatherType::Clear,
            WeatherType::Rain,
            WeatherType::Wind,
            WeatherType::Foggy,
        ],
        WeatherType::Rain => &[
            WeatherType::Rain,
            WeatherType::Storm,
            WeatherType::Clear,
            WeatherType::Foggy,
        ],
        WeatherType::Storm => &[WeatherType::Rain, WeatherType::Clear, WeatherType::Wind],
        WeatherType::Wind => &[WeatherType::Clear, WeatherType::Rain, WeatherType::Wind],
        WeatherType::Foggy => &[WeatherType::Clear, WeatherType::Rain],
        WeatherType::Snow => &[WeatherType::Clear],
    }
}

/// Per-condition intensity range. Clear skies are a fixed gentle 0.2.
pub fn intensity_range(condition: WeatherType) -> (f32, f32) {
    match condition {
        WeatherType::Clear => (0.2, 0.2),
        WeatherType::Rain => (0.4, 0.8),
        WeatherType::Storm => (0.8, 1.0),
        WeatherType::Wind => (0.3, 0.6),
        WeatherType::Snow => (0.4, 0.7),
        WeatherType::Foggy => (0.2, 0.5),
    }
}

fn sample_intensity(rng: &mut impl Rng, condition: WeatherType) -> f32 {
    let (lo, hi) = intensity_range(condition);
    if lo >= hi {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

fn sample_next_change(rng: &mut impl Rng) -> f32 {
    rng.gen_range(WEATHER_CHANGE_INTERVAL * 0.5..WEATHER_CHANGE_INTERVAL * 1.5)
}

// ─── Systems ──────────────────────────────────────────────────────────────────

/// Advances the weather timer per SecondTickEvent and runs transitions.
fn tick_weather(
    mut ticks: EventReader<SecondTickEvent>,
    mut weather: ResMut<WeatherState>,
    mut changed_writer: EventWriter<WeatherChangedEvent>,
    mut intensity_writer: EventWriter<WeatherIntensityChangedEvent>,
    mut rain_start_writer: EventWriter<RainStartedEvent>,
    mut rain_stop_writer: EventWriter<RainStoppedEvent>,
) {
    for _tick in ticks.read() {
        weather.timer += 1.0;
        if weather.timer < weather.next_change {
            continue;
        }

        let mut rng = rand::thread_rng();
        let old = weather.condition;

        let options = possible_next(old);
        weather.condition = options[rng.gen_range(0..options.len())];
        weather.intensity = sample_intensity(&mut rng, weather.condition);
        weather.timer = 0.0;
        weather.next_change = sample_next_change(&mut rng);

        if old != weather.condition {
            info!(
                "[Weather] {:?} -> {:?} (intensity {:.2})",
                old, weather.condition, weather.intensity
            );
            changed_writer.send(WeatherChangedEvent {
                condition: weather.condition,
            });

            if !old.is_rain_class() && weather.condition.is_rain_class() {
                rain_start_writer.send(RainStartedEvent);
            } else if old.is_rain_class() && !weather.condition.is_rain_class() {
                rain_stop_writer.send(RainStoppedEvent);
            }
        }

        intensity_writer.send(WeatherIntensityChangedEvent {
            condition: weather.condition,
            intensity: weather.intensity,
        });
    }
}

/// Debug entry point: jump straight to a condition with a freshly sampled
/// intensity. Fires the same events as a natural transition and resets the
/// timer so the next natural change is a full interval away.
fn apply_forced_weather(
    mut events: EventReader<ForceWeatherEvent>,
    mut weather: ResMut<WeatherState>,
    mut changed_writer: EventWriter<WeatherChangedEvent>,
    mut intensity_writer: EventWriter<WeatherIntensityChangedEvent>,
    mut rain_start_writer: EventWriter<RainStartedEvent>,
    mut rain_stop_writer: EventWriter<RainStoppedEvent>,
) {
    for ev in events.read() {
        let mut rng = rand::thread_rng();
        let old = weather.condition;

        weather.condition = ev.condition;
        weather.intensity = sample_intensity(&mut rng, ev.condition);
        weather.timer = 0.0;
        weather.next_change = sample_next_change(&mut rng);

        info!(
            "[Weather] Forced to {:?} (intensity {:.2})",
            weather.condition, weather.intensity
        );

        changed_writer.send(WeatherChangedEvent {
            condition: weather.condition,
        });
        intensity_writer.send(WeatherIntensityChangedEvent {
            condition: weather.condition,
            intensity: weather.intensity,
        });

        if !old.is_rain_class() && weather.condition.is_rain_class() {
            rain_start_writer.send(RainStartedEvent);
        } else if old.is_rain_class() && !weather.condition.is_rain_class() {
            rain_stop_writer.send(RainStoppedEvent);
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
