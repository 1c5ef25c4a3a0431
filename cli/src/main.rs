use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use ding_cli::{Cli, CliError, RodioPlayer, TerminalReadout, audio, logging};
use ding_core::{
    AppConfig, AppConfigExt, CountdownSession, EngineConfig, ExitReason, compute_duration,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    match run(cli).await {
        Ok(reason) => ExitCode::from(reason.exit_code()),
        Err(err) => {
            tracing::error!(error = %err, "ding failed");
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitReason, CliError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let (value, unit) = cli
        .countdown(config.default_unit)
        .ok_or(CliError::MissingValue)?;
    let duration = compute_duration(value, unit)?;
    tracing::info!(value, unit = unit.label(), duration, loud = cli.loud, "timer requested");

    let sound = audio::resolve_sound(&config.alert, cli.loud)?;
    let player = Arc::new(RodioPlayer::open(&sound, config.alert.volume)?);

    let session = CountdownSession::new(
        duration,
        player,
        EngineConfig::from_display(&config.display),
    );

    let abort = session.signals().abort.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted");
            abort.fire();
        }
    });

    let reason = session.run(TerminalReadout::stdout()).await;
    ctrl_c.abort();
    Ok(reason?)
}

fn report(err: &CliError) {
    eprintln!("ding: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
