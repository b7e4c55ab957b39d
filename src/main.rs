use bateria::cli::{commands, Cli, Commands};
use bateria::types::config::Config;
use bateria::BateriaResult;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> BateriaResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default_config()
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("bateria={}", log_level)
            .parse()
            .unwrap_or_else(|_| "bateria=info".parse().expect("fallback directive is valid")),
    );

    let json_logs = config.general.log_format == "json";
    tracing_subscriber::registry()
        .with(filter)
        .with(json_logs.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => commands::init(path)?,
        Commands::Version => commands::version(),
        Commands::Health { data, serial } => commands::health(&data, &serial, &config)?,
        Commands::Performance { data, serial } => commands::performance(&data, &serial, &config)?,
        Commands::Lifetime { data, serial } => commands::lifetime(&data, &serial, &config)?,
        Commands::Validate { data, serial } => commands::validate(&data, &serial, &config)?,
        Commands::CycleLife { data, serial } => commands::cycle_life(&data, &serial, &config)?,
        Commands::Compare { data } => commands::compare(&data, &config)?,
        Commands::Anomalies { data, serial } => {
            commands::anomalies(&data, serial.as_deref(), &config)?
        }
        Commands::Summary { data, serial } => {
            commands::summary(&data, serial.as_deref(), &config)?
        }
        Commands::Stats { data } => commands::stats(&data, &config)?,
    }

    Ok(())
}
