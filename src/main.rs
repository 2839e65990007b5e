mod shared;
mod clock;
mod daycycle;
mod weather;
mod foraging;
mod decorations;
mod shop;
mod stats;
mod save;
mod data;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use shared::*;

fn main() {
    App::new()
        // Headless core: the presentation process renders the grove and
        // feeds us input events; this loop only simulates.
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(StatesPlugin)
        .add_plugins(LogPlugin::default())
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<TickClock>()
        .init_resource::<DayCycle>()
        .init_resource::<WeatherState>()
        .init_resource::<Inventory>()
        .init_resource::<ResourceRegistry>()
        .init_resource::<ShopCatalog>()
        .init_resource::<PlayStats>()
        // Events
        .add_event::<SecondTickEvent>()
        .add_event::<HourChangedEvent>()
        .add_event::<PeriodChangedEvent>()
        .add_event::<NewDayEvent>()
        .add_event::<SetTimeScaleEvent>()
        .add_event::<WeatherChangedEvent>()
        .add_event::<WeatherIntensityChangedEvent>()
        .add_event::<RainStartedEvent>()
        .add_event::<RainStoppedEvent>()
        .add_event::<ForceWeatherEvent>()
        .add_event::<ResourceChangedEvent>()
        .add_event::<ResourceGainedEvent>()
        .add_event::<InventoryFullEvent>()
        .add_event::<CollectableSpawnedEvent>()
        .add_event::<CollectableCollectedEvent>()
        .add_event::<CollectableExpiredEvent>()
        .add_event::<CollectCollectableEvent>()
        .add_event::<PlaceDecorationEvent>()
        .add_event::<DecorationPlacedEvent>()
        .add_event::<MoveDecorationEvent>()
        .add_event::<DecorationMovedEvent>()
        .add_event::<RemoveDecorationEvent>()
        .add_event::<DecorationRemovedEvent>()
        .add_event::<SetDecorationLockedEvent>()
        .add_event::<SetHarvesterActiveEvent>()
        .add_event::<CollectHarvesterEvent>()
        .add_event::<HarvesterGeneratedEvent>()
        .add_event::<HarvesterFullEvent>()
        .add_event::<HarvesterCollectedEvent>()
        .add_event::<PurchaseRequestEvent>()
        .add_event::<ItemPurchasedEvent>()
        .add_event::<PurchaseFailedEvent>()
        .add_event::<SaveRequestEvent>()
        .add_event::<LoadRequestEvent>()
        .add_event::<GameSavedEvent>()
        .add_event::<GameLoadedEvent>()
        .add_event::<SaveErrorEvent>()
        .add_event::<LoadErrorEvent>()
        // Domain plugins
        .add_plugins(clock::ClockPlugin)
        .add_plugins(daycycle::DayCyclePlugin)
        .add_plugins(weather::WeatherPlugin)
        .add_plugins(foraging::ForagingPlugin)
        .add_plugins(decorations::DecorationsPlugin)
        .add_plugins(shop::ShopPlugin)
        .add_plugins(stats::StatsPlugin)
        .add_plugins(save::SavePlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .run();
}
