use clap::Parser;
use serde::Deserialize;
use std::fs::read_to_string;

#[derive(Deserialize, Debug)]
pub struct Ndp {
    /// link-layer interface to bind the beacon socket to.
    ///
    /// an empty value falls back to the daemon's built-in default
    /// interface name.
    #[serde(default = "Ndp::interface")]
    pub interface: String,

    /// start the sender activity in stress mode: beacons with randomized
    /// source octets sent back-to-back instead of the normal cadence.
    #[serde(default = "Ndp::stress")]
    pub stress: bool,
}

impl Ndp {
    fn interface() -> String {
        String::new()
    }

    fn stress() -> bool {
        false
    }
}

impl Default for Ndp {
    fn default() -> Self {
        Self {
            interface: Self::interface(),
            stress: Self::stress(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Log {
    /// log level
    ///
    /// an enum representing the available verbosity levels of the logger.
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub ndp: Ndp,
    #[serde(default)]
    pub log: Log,
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
)]
struct Cli {
    /// specify the configuration file path.
    #[arg(long)]
    config: Option<String>,

    /// override the interface to bind to.
    #[arg(long)]
    interface: Option<String>,

    /// start in stress mode.
    #[arg(long)]
    stress: bool,

    /// override the log level.
    #[arg(long = "log-level", value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(value: CliLogLevel) -> Self {
        match value {
            CliLogLevel::Error => Self::Error,
            CliLogLevel::Warn => Self::Warn,
            CliLogLevel::Info => Self::Info,
            CliLogLevel::Debug => Self::Debug,
            CliLogLevel::Trace => Self::Trace,
        }
    }
}

impl Config {
    /// Loads command line parameters, reading the configuration file if a
    /// path was specified, then applies CLI overrides on top.
    pub fn load() -> Self {
        let cli = Cli::parse();

        let mut config: Self = match cli.config.as_ref().map(read_to_string) {
            Some(Ok(cfg_str)) => {
                serde_json5::from_str(&cfg_str).expect("read config file failed!")
            }
            Some(Err(_)) | None => Self::default(),
        };

        if let Some(interface) = cli.interface {
            config.ndp.interface = interface;
        }
        if cli.stress {
            config.ndp.stress = true;
        }
        if let Some(level) = cli.log_level {
            config.log.level = level.into();
        }

        config
    }
}
