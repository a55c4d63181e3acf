use clap::Parser;
use commander::Provider;
use commander::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "commander",
    version,
    about = "Describe a shell task in plain words, get the command back"
)]
struct Args {
    /// Completion provider to use (overrides config and COMMANDER_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name sent with each request
    #[arg(short, long)]
    model: Option<String>,

    /// Color theme: default, mono or neon
    #[arg(long)]
    theme: Option<String>,

    /// Log level written to commander.log
    #[arg(long, default_value_t = LevelFilter::Debug)]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to commander.log in the current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("commander.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(file_config) => file_config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            eprintln!("commander: {e}");
            std::process::exit(1);
        }
    };

    let overrides = CliOverrides {
        provider: args.provider,
        model: args.model,
        theme: args.theme,
    };
    let resolved = config::resolve(&file_config, &overrides);
    log::info!("Commander starting up with {:?}", resolved);

    commander::tui::run(resolved).await
}
