use coffee_shop_env::config::{CONFIG_DIR, ConfigError, DeploymentConfig, Variant};
use coffee_shop_env::render::{OutputFormat, RenderError, render};
use std::{env, fs, io, process::ExitCode};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

#[derive(Debug, Default)]
struct Args {
    variant: Option<String>,
    config: Option<String>,
    config_dir: Option<String>,
    format: Option<String>,
    out: Option<String>,
}

fn parse_args() -> Result<Args, CliError> {
    let mut args = Args::default();
    for arg in env::args().skip(1) {
        if let Some(v) = arg.strip_prefix("--variant=") {
            args.variant = Some(v.to_string());
        } else if let Some(v) = arg.strip_prefix("--config=") {
            args.config = Some(v.to_string());
        } else if let Some(v) = arg.strip_prefix("--config-dir=") {
            args.config_dir = Some(v.to_string());
        } else if let Some(v) = arg.strip_prefix("--format=") {
            args.format = Some(v.to_string());
        } else if let Some(v) = arg.strip_prefix("--out=") {
            args.out = Some(v.to_string());
        } else {
            return Err(CliError::UnknownArgument(arg));
        }
    }
    Ok(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn run() -> Result<(), CliError> {
    let args = parse_args()?;

    let config = match args.config {
        Some(ref path) => DeploymentConfig::load(path)?,
        None => {
            let variant = match args.variant {
                Some(ref v) => v.parse::<Variant>()?,
                None => Variant::from_env()?,
            };
            let dir = args.config_dir.as_deref().unwrap_or(CONFIG_DIR);
            DeploymentConfig::resolve(variant, dir)?
        }
    };

    let format = match args.format {
        Some(ref f) => f.parse::<OutputFormat>()?,
        None => OutputFormat::default(),
    };

    info!(
        variant = %config.variant(),
        api_server_url = %config.api_server_url,
        format = %format,
        "Config resolved"
    );

    let rendered = render(&config, format)?;
    match args.out {
        Some(ref path) => {
            fs::write(path, rendered)?;
            info!(path = %path, "Environment written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
