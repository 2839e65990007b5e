//! Clock domain — the heartbeat of Wildgrove.
//!
//! Accumulates real frame deltas into whole simulated seconds and emits one
//! `SecondTickEvent` per second crossed. Everything slower than a frame —
//! the day cycle, weather transitions, harvester cooldowns, dewdrop
//! spawning — is driven off that signal; per-frame work simply runs in
//! `Update`.
//!
//! `TickClock::elapsed_seconds` is the simulation timebase. It is persisted
//! (as total play time) and restored on load, so timestamps recorded against
//! it keep meaning across sessions.

use bevy::prelude::*;

use crate::shared::*;

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            emit_second_ticks.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Converts frame deltas into whole-second ticks.
///
/// Multiple ticks can fire in one frame after a long stall (the window was
/// hidden, the machine slept); downstream consumers handle each tick
/// independently, so catching up is just emitting them all.
fn emit_second_ticks(
    time: Res<Time>,
    mut clock: ResMut<TickClock>,
    mut tick_writer: EventWriter<SecondTickEvent>,
) {
    clock.carry += time.delta_secs();

    while clock.carry >= 1.0 {
        clock.carry -= 1.0;
        clock.elapsed_seconds += 1.0;
        tick_writer.send(SecondTickEvent);
    }
}
