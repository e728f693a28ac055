use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mcworld::config::Config;
use mcworld::{
    format_api_error, Client, CubeDimensions, CylinderDimensions, Dimensions,
    EntityCreateOptions, EntityListOptions, EntityUpdateOptions, Location, ShapeCreateOptions,
    ShapeListOptions, ShapeType, ShapeUpdateOptions,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line client for the game-world API
#[derive(Parser, Debug)]
#[command(name = "mcworld", version, about, long_about = None)]
struct Cli {
    /// Root URL of the world API
    #[arg(long, env = "MCWORLD_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Bearer token for the world API
    #[arg(long, env = "MCWORLD_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage shapes
    #[command(subcommand)]
    Shapes(ShapeCommand),
    /// Manage entities
    #[command(subcommand)]
    Entities(EntityCommand),
    /// Show or change the saved configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ShapeCommand {
    /// List shapes
    List {
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Read one or more shapes by ID
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create a shape
    Create {
        #[arg(long = "type", value_enum)]
        shape_type: Option<ShapeKind>,
        #[arg(long, default_value = "")]
        material: String,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        dimensions: DimensionArgs,
    },
    /// Update a shape; only the given fields change
    Update {
        id: String,
        #[arg(long = "type", value_enum)]
        shape_type: Option<ShapeKind>,
        #[arg(long)]
        material: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        dimensions: DimensionArgs,
    },
    /// Delete a shape
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum EntityCommand {
    /// List entities
    List {
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
    /// Read one or more entities by ID
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create an entity
    Create {
        #[arg(long = "type", default_value = "")]
        entity_type: String,
        #[arg(long, default_value = "")]
        name: String,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Update an entity; only the given fields change
    Update {
        id: String,
        #[arg(long = "type")]
        entity_type: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Delete an entity
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the saved configuration
    Show,
    /// Save the API root URL
    SetUrl { url: String },
    /// Save the API token
    SetToken { token: String },
}

#[derive(Args, Debug)]
struct LocationArgs {
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    z: Option<i64>,
    #[arg(long)]
    world: Option<String>,
}

impl LocationArgs {
    /// All four parts, or none at all
    fn to_location(&self) -> Result<Option<Location>> {
        match (self.x, self.y, self.z, &self.world) {
            (Some(x), Some(y), Some(z), Some(world)) => Ok(Some(Location::new(x, y, z, world))),
            (None, None, None, None) => Ok(None),
            _ => bail!("--x, --y, --z and --world must be given together"),
        }
    }
}

#[derive(Args, Debug)]
struct DimensionArgs {
    #[arg(long)]
    length_x: Option<i64>,
    #[arg(long)]
    height_y: Option<i64>,
    #[arg(long)]
    width_z: Option<i64>,
    #[arg(long)]
    height: Option<i64>,
    #[arg(long)]
    radius: Option<i64>,
}

impl DimensionArgs {
    fn cube_given(&self) -> bool {
        self.length_x.is_some() || self.height_y.is_some() || self.width_z.is_some()
    }

    fn cylinder_given(&self) -> bool {
        self.height.is_some() || self.radius.is_some()
    }

    /// Dimensions for the shape type, inferred from the flags when no type
    /// is given. No flags at all means no dimensions.
    fn to_dimensions(&self, shape_type: Option<ShapeType>) -> Result<Option<Dimensions>> {
        let shape_type = match (shape_type, self.cube_given(), self.cylinder_given()) {
            (_, false, false) => return Ok(None),
            (Some(shape_type), _, _) => shape_type,
            (None, true, false) => ShapeType::Cube,
            (None, false, true) => ShapeType::Cylinder,
            (None, true, true) => {
                bail!("cube and cylinder dimension flags cannot be mixed; pass --type")
            }
        };

        match shape_type {
            ShapeType::Cube => match (self.length_x, self.height_y, self.width_z) {
                (Some(x), Some(y), Some(z)) if !self.cylinder_given() => {
                    Ok(Some(CubeDimensions::new(x, y, z).into()))
                }
                _ => bail!("a cube needs exactly --length-x, --height-y and --width-z"),
            },
            ShapeType::Cylinder => match (self.height, self.radius) {
                (Some(height), Some(radius)) if !self.cube_given() => {
                    Ok(Some(CylinderDimensions::new(height, radius).into()))
                }
                _ => bail!("a cylinder needs exactly --height and --radius"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeKind {
    Cube,
    Cylinder,
}

impl From<ShapeKind> for ShapeType {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => ShapeType::Cube,
            ShapeKind::Cylinder => ShapeType::Cylinder,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level_filter = level.as_filter()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("mcworld started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("mcworld").join("mcworld.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".mcworld").join("mcworld.log");
    }
    PathBuf::from("mcworld.log")
}

fn print<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    if let Err(err) = run(cli).await {
        tracing::error!("{:?}", err);
        match err.downcast_ref::<mcworld::Error>() {
            Some(api_err) => eprintln!("Error: {}", format_api_error(api_err)),
            None => eprintln!("Error: {err:?}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();

    if let Command::Config(cmd) = &cli.command {
        return run_config(cmd, &mut config, cli.output);
    }

    // CLI > config > default
    if cli.base_url.is_some() {
        config.base_url = cli.base_url.clone();
    }
    if cli.token.is_some() {
        config.token = cli.token.clone();
    }
    if cli.timeout.is_some() {
        config.timeout_secs = cli.timeout;
    }

    let client = Client::from_config(&config).context("Failed to create API client")?;
    tracing::debug!("Using API at {}", client.transport().base_url());

    match cli.command {
        Command::Shapes(cmd) => run_shapes(&client, cmd, cli.output).await,
        Command::Entities(cmd) => run_entities(&client, cmd, cli.output).await,
        Command::Config(_) => Ok(()),
    }
}

fn run_config(cmd: &ConfigCommand, config: &mut Config, output: OutputFormat) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            if shown.token.is_some() {
                shown.token = Some("********".to_string());
            }
            print(output, &shown)
        }
        ConfigCommand::SetUrl { url: base_url } => {
            url::Url::parse(base_url).with_context(|| format!("Invalid URL: {}", base_url))?;
            config.set_base_url(base_url)
        }
        ConfigCommand::SetToken { token } => config.set_token(token),
    }
}

async fn run_shapes(client: &Client, cmd: ShapeCommand, output: OutputFormat) -> Result<()> {
    let shapes = client.shapes();

    match cmd {
        ShapeCommand::List { limit } => {
            let list = shapes.list(ShapeListOptions { limit }).await?;
            print(output, &list)
        }
        ShapeCommand::Get { ids } => {
            // Reads are independent, so issue them together
            let found = futures::future::try_join_all(ids.iter().map(|id| shapes.read(id))).await?;
            if found.len() == 1 {
                print(output, &found[0])
            } else {
                print(output, &found)
            }
        }
        ShapeCommand::Create {
            shape_type,
            material,
            location,
            dimensions,
        } => {
            let dimensions = dimensions.to_dimensions(shape_type.map(ShapeType::from))?;
            let shape_type = shape_type
                .map(ShapeType::from)
                .or(dimensions.as_ref().map(Dimensions::shape_type));
            let options = ShapeCreateOptions {
                location: location.to_location()?,
                shape_type,
                material,
                dimensions,
            };
            let shape = shapes.create(options).await?;
            print(output, &shape)
        }
        ShapeCommand::Update {
            id,
            shape_type,
            material,
            location,
            dimensions,
        } => {
            let dimensions = dimensions.to_dimensions(shape_type.map(ShapeType::from))?;
            let shape_type = shape_type
                .map(ShapeType::from)
                .or(dimensions.as_ref().map(Dimensions::shape_type));
            let options = ShapeUpdateOptions {
                location: location.to_location()?,
                shape_type,
                material,
                dimensions,
            };
            let shape = shapes.update(&id, options).await?;
            print(output, &shape)
        }
        ShapeCommand::Delete { id } => {
            shapes.delete(&id).await?;
            eprintln!("Deletion of shape {} requested", id);
            Ok(())
        }
    }
}

async fn run_entities(client: &Client, cmd: EntityCommand, output: OutputFormat) -> Result<()> {
    let entities = client.entities();

    match cmd {
        EntityCommand::List { limit } => {
            let list = entities.list(EntityListOptions { limit }).await?;
            print(output, &list)
        }
        EntityCommand::Get { ids } => {
            let found =
                futures::future::try_join_all(ids.iter().map(|id| entities.read(id))).await?;
            if found.len() == 1 {
                print(output, &found[0])
            } else {
                print(output, &found)
            }
        }
        EntityCommand::Create {
            entity_type,
            name,
            location,
        } => {
            let options = EntityCreateOptions {
                location: location.to_location()?,
                entity_type,
                custom_name: name,
            };
            let entity = entities.create(options).await?;
            print(output, &entity)
        }
        EntityCommand::Update {
            id,
            entity_type,
            name,
            location,
        } => {
            let options = EntityUpdateOptions {
                location: location.to_location()?,
                entity_type,
                custom_name: name,
            };
            let entity = entities.update(&id, options).await?;
            print(output, &entity)
        }
        EntityCommand::Delete { id } => {
            entities.delete(&id).await?;
            eprintln!("Deletion of entity {} requested", id);
            Ok(())
        }
    }
}
