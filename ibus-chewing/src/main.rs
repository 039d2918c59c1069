use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chewing_core::{write_schemas, XmlWriter, SETTINGS};
use clap::{Parser, Subcommand};
use ibus_chewing::{console_engine, parse_script, run_script, FrontendConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ibus-chewing")]
#[command(about = "Chewing Zhuyin input method engine: replay key scripts, export schemas, edit settings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_enum, default_value_t = LogFilter::Warn)]
    log_level: LogFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a key script and print what the input panel would show
    Replay {
        /// Key script file
        script: PathBuf,
        /// Only print the committed text
        #[arg(short, long)]
        quiet: bool,
    },
    /// Write the settings schema file
    Schemas {
        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or edit settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the whole configuration as TOML
    Show,
    /// List every setting with its current value
    List,
    /// Print one setting, by its schema name (e.g. candPerPage)
    Get { key: String },
    /// Change one setting and save the configuration file
    Set { key: String, value: String },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum LogFilter {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogFilter {
    fn directive(self) -> &'static str {
        match self {
            LogFilter::Error => "error",
            LogFilter::Warn => "warn",
            LogFilter::Info => "info",
            LogFilter::Debug => "debug",
            LogFilter::Trace => "trace",
        }
    }
}

fn init_tracing(level: LogFilter) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive())))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<FrontendConfig> {
    match path {
        Some(path) => FrontendConfig::load_toml(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(FrontendConfig::default()),
    }
}

fn handle_replay(config: &FrontendConfig, script: &Path, quiet: bool) -> Result<()> {
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("failed to read script {}", script.display()))?;
    let steps = parse_script(&source)?;
    info!("replaying {} steps from {}", steps.len(), script.display());

    let mut engine = console_engine(config);
    let consumed = run_script(&mut engine, &steps);
    engine.focus_out();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !quiet {
        for line in engine.host().transcript() {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "consumed {} key events", consumed)?;
    }
    writeln!(out, "{}", engine.host().committed())?;
    Ok(())
}

fn handle_schemas(output: Option<&Path>) -> Result<()> {
    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = XmlWriter::new(out);
    write_schemas(&mut writer, SETTINGS)?;
    writer.into_inner().flush()?;
    Ok(())
}

fn handle_config(path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", load_config(path)?.to_toml_string()?);
        }
        ConfigAction::List => {
            let config = load_config(path)?;
            for (spec, value) in config.base().entries() {
                println!("{:<24} {:<12} {}", spec.key, value.to_string(), spec.label);
            }
        }
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            match config.base().get(&key) {
                Some(value) => println!("{}", value),
                None => bail!("unknown setting: {}", key),
            }
        }
        ConfigAction::Set { key, value } => {
            let Some(path) = path else {
                bail!("config set needs --config <FILE>");
            };
            let mut config = if path.exists() { load_config(Some(path))? } else { FrontendConfig::default() };
            config.base_mut().set(&key, &value)?;
            config.save_toml(path)?;
            info!("{} = {} saved to {}", key, value, path.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Replay { script, quiet } => {
            let config = load_config(config_path)?;
            handle_replay(&config, &script, quiet)
        }
        Commands::Schemas { output } => handle_schemas(output.as_deref()),
        Commands::Config { action } => handle_config(config_path, action),
    }
}
