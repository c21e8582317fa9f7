use std::process::ExitCode;
use std::sync::Arc;

use autosteer_server::configs::Settings;
use autosteer_server::run;

#[tokio::main]
async fn main() -> ExitCode {
    let settings = Settings::new();

    let level = settings
        .as_ref()
        .map_or("info", |settings| settings.logger.level.as_str())
        .to_string();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");

            format!("{app_name}={level},tower_http={level}").into()
        }))
        .init();

    let settings = match settings {
        Ok(settings) => Arc::new(settings),
        Err(e) => {
            tracing::error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        kp = settings.controller.kp,
        ki = settings.controller.ki,
        kd = settings.controller.kd,
        "Settings loaded"
    );

    if let Err(e) = run(&settings).await {
        tracing::error!("Failed to listen to port: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
