//! Showtime demo binary
//!
//! Schedules one event through the reducer and prints the recorded events and
//! the final schedule.

use chrono::{Duration, Utc};
use showtime_core::{environment::SystemClock, reducer::Reducer};
use showtime_schedule::config::LogFormat;
use showtime_schedule::{
    AirDate, AuditoriumId, Config, Event, ScheduleAction, ScheduleEnvironment, ScheduleReducer,
    ScheduleState,
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        LogFormat::Full => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing(&config);

    tracing::info!(
        "Scheduling {} (base price {}, rating {})",
        config.event.name,
        config.event.base_price,
        config.event.rating
    );

    let event = Event::named(config.event.name.clone())
        .with_base_price(config.event.base_price)
        .with_rating(config.event.rating);
    let mut state = ScheduleState::new(event);
    let env = ScheduleEnvironment::new(Arc::new(SystemClock));
    let reducer = ScheduleReducer::new();

    let tomorrow = AirDate::new(Utc::now() + Duration::days(1));
    let hall_a = AuditoriumId::new("Hall A");
    let hall_b = AuditoriumId::new("Hall B");

    let commands = vec![
        ScheduleAction::AddAirDate {
            air_date: tomorrow,
            auditorium: Some(hall_a),
        },
        ScheduleAction::AddAirDate {
            air_date: tomorrow,
            auditorium: Some(hall_b.clone()),
        },
        ScheduleAction::AssignAuditorium {
            air_date: tomorrow,
            auditorium: hall_b,
        },
        ScheduleAction::RemoveAirDate { air_date: tomorrow },
        ScheduleAction::AssignAuditorium {
            air_date: tomorrow,
            auditorium: AuditoriumId::new("Hall C"),
        },
    ];

    let mut journal = Vec::new();
    for command in commands {
        let kind = command.event_type();
        let effects = reducer.reduce(&mut state, command, &env);
        let emitted: Vec<ScheduleAction> = effects
            .iter()
            .flat_map(|effect| effect.emitted().into_iter().cloned())
            .collect();

        match (&state.last_error, emitted.is_empty()) {
            (Some(error), true) => tracing::info!("{} rejected: {}", kind, error),
            _ => tracing::info!("{} accepted", kind),
        }
        journal.extend(emitted);
    }

    println!("{}", serde_json::to_string_pretty(&journal)?);
    println!("{}", serde_json::to_string_pretty(&state.event)?);
    Ok(())
}
