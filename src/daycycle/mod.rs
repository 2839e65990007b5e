//! Day-cycle domain — advances the in-game hour and derives the period.
//!
//! Responsible for:
//! - Advancing `DayCycle::hour_of_day` once per simulated second
//! - Wrapping past 24:00 and sending NewDayEvent (exactly one per wrap)
//! - Recomputing the period and sending PeriodChangedEvent on change
//! - Sending HourChangedEvent after every advance
//! - Applying SetTimeScaleEvent from the debug entry point

use bevy::prelude::*;

use crate::shared::*;

pub struct DayCyclePlugin;

impl Plugin for DayCyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (advance_time, apply_time_scale).run_if(in_state(GameState::Playing)),
        );
    }
}

/// Outcome of a single advance step, for event emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAdvance {
    pub new_day: bool,
    pub period_change: Option<TimeOfDay>,
}

/// Advances the clock by `delta_seconds` of real time.
///
/// hour += 24 / day_length_seconds * time_scale * delta. A wrap past 24
/// subtracts a full day; the residual carries over so no simulated time is
/// lost at the boundary.
pub fn advance(cycle: &mut DayCycle, delta_seconds: f32) -> TimeAdvance {
    let hours_per_second = 24.0 / (cycle.day_length_minutes * 60.0);
    cycle.hour_of_day += hours_per_second * cycle.time_scale * delta_seconds;

    let mut new_day = false;
    if cycle.hour_of_day >= 24.0 {
        cycle.hour_of_day -= 24.0;
        new_day = true;
    }

    let old_period = cycle.period;
    cycle.period = TimeOfDay::from_hour(cycle.hour_of_day);

    TimeAdvance {
        new_day,
        period_change: (cycle.period != old_period).then_some(cycle.period),
    }
}

/// One advance step per SecondTickEvent.
fn advance_time(
    mut ticks: EventReader<SecondTickEvent>,
    mut cycle: ResMut<DayCycle>,
    mut hour_writer: EventWriter<HourChangedEvent>,
    mut period_writer: EventWriter<PeriodChangedEvent>,
    mut day_writer: EventWriter<NewDayEvent>,
) {
    for _tick in ticks.read() {
        let outcome = advance(&mut cycle, 1.0);

        if outcome.new_day {
            info!("[DayCycle] A new day begins");
            day_writer.send(NewDayEvent);
        }

        hour_writer.send(HourChangedEvent {
            hour: cycle.hour_of_day,
        });

        if let Some(period) = outcome.period_change {
            info!(
                "[DayCycle] Period changed to {:?} at {:.2}h",
                period, cycle.hour_of_day
            );
            period_writer.send(PeriodChangedEvent { period });
        }
    }
}

/// Debug entry point: rescale simulated time. Negative scales clamp to 0
/// (time stands still rather than running backwards).
fn apply_time_scale(mut events: EventReader<SetTimeScaleEvent>, mut cycle: ResMut<DayCycle>) {
    for ev in events.read() {
        cycle.time_scale = ev.scale.max(0.0);
        info!("[DayCycle] Time scale set to {}", cycle.time_scale);
    }
}
