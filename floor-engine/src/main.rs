use floor_engine::floor::ledger;
use floor_engine::utils::event_log::run_event_log;
use floor_engine::{
    AppError, CommandOutcome, Config, ErrorCode, FloorCommand, FloorState, setup_environment,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads one JSON `FloorCommand` per line from stdin and applies it.
/// `arrange on` / `arrange off` toggle arrange mode.
///
/// ```text
/// {"type":"add_order","table_id":2,"draft":{"name":"Café Latte","price":45,"quantity":1}}
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;
    tracing::info!("Floor engine starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. State (storage, menu, floor)
    let FloorState { mut floor, .. } = FloorState::initialize(&config);
    if let Some(notice) = floor.startup_notice() {
        tracing::warn!(?notice, "Started from the seed layout");
    }
    if config.is_development() {
        for table in floor.listing() {
            tracing::info!(
                id = table.id,
                label = %table.display_label(),
                status = %table.status,
                total = %ledger::total(table),
                "Table"
            );
        }
    }

    // 4. Event log
    let events = floor.subscribe();
    let event_logger = tokio::spawn(run_event_log(events, |event| {
        match serde_json::to_string(event) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to encode event"),
        }
    }));

    // 5. Command loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "arrange on" | "arrange off" => {
                floor.set_arranging(line == "arrange on");
                continue;
            }
            _ => {}
        }
        let cmd: FloorCommand = match serde_json::from_str(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable command");
                continue;
            }
        };
        let target = cmd.table_id();
        let err: AppError = match floor.execute(cmd) {
            Ok(CommandOutcome::Ignored) => match target {
                Some(id) if floor.table(id).is_none() => AppError::with_message(
                    ErrorCode::TableNotFound,
                    format!("table {} not found", id),
                ),
                _ => continue,
            },
            Ok(CommandOutcome::Applied(_)) => continue,
            Err(e) => e.into(),
        };
        if err.code.category().is_user_facing() {
            tracing::warn!(code = %err.code, "{}", err.message);
        } else {
            tracing::error!(code = %err.code, "{}", err.message);
        }
    }

    drop(floor);
    let _ = event_logger.await;
    tracing::info!("Floor engine stopped");
    Ok(())
}
