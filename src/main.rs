use astroscope::config::{Command, LogFormat};
use astroscope::core::display::{run_display, MISSION_CLOCK_PERIOD};
use astroscope::core::format::render_snapshot;
use astroscope::core::shell::FormField;
use astroscope::utils::{logger, validation::Validate};
use astroscope::{
    CliConfig, ConsoleEffect, DataRefreshController, HttpSpaceDataSource, RefreshSettings,
    SimulatedTransport, ThemeConsoleShell, TomlConfig,
};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("🚀 Starting AstroScope");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => TomlConfig::default(),
    };

    if let Command::Dashboard {
        interval: Some(seconds),
        ..
    } = &cli.command
    {
        config.refresh.interval_seconds = *seconds;
        tracing::info!("🔧 Refresh interval overridden to {}s", seconds);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match cli.command {
        Command::Dashboard { duration, .. } => run_dashboard(&config, duration).await,
        Command::Console => run_console(&config).await,
        Command::Contact {
            name,
            email,
            message,
        } => run_contact(&config, name, email, message).await,
    }
}

async fn run_dashboard(config: &TomlConfig, duration: Option<u64>) -> anyhow::Result<()> {
    let source = HttpSpaceDataSource::new(config)?;
    let controller = DataRefreshController::new(source, RefreshSettings::from_config(config));
    controller.start()?;

    let shutdown = async {
        let deadline = async {
            match duration {
                Some(seconds) => tokio::time::sleep(Duration::from_secs(seconds)).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
            _ = deadline => {}
        }
    };

    run_display(&controller, MISSION_CLOCK_PERIOD, shutdown, |snapshot, now| {
        println!("{}", render_snapshot(snapshot, now));
    })
    .await;

    controller.stop();
    Ok(())
}

async fn run_console(config: &TomlConfig) -> anyhow::Result<()> {
    let mut shell = ThemeConsoleShell::new(config.default_theme());
    shell.open_console();
    println!("Theme: {}. Type 'help' for commands.", shell.theme());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0;

    while shell.is_console_open() {
        print!("$ ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let effect = shell.execute(&line);
        if effect == ConsoleEffect::Cleared {
            printed = 0;
            continue;
        }

        for entry in &shell.history()[printed..] {
            println!("{}", entry);
        }
        printed = shell.history().len();
    }

    Ok(())
}

async fn run_contact(
    config: &TomlConfig,
    name: String,
    email: String,
    message: String,
) -> anyhow::Result<()> {
    let mut shell = ThemeConsoleShell::new(config.default_theme());
    shell.set_field(FormField::Name, name);
    shell.set_field(FormField::Email, email);
    shell.set_field(FormField::Message, message);

    let transport = SimulatedTransport::new(config.form_submit_delay());
    println!("📨 Sending message...");
    shell.submit(&transport).await?;
    println!("✅ Message sent! I'll get back to you soon.");

    Ok(())
}
