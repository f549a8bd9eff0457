use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lesson_core::LessonConfig;
use services::{ConfigService, ConfigSource};
use tracing::{Level, info};
use ui::{App, BrowserPlatform, UiApp, build_app_context};
use ui::platform::LessonPlatformRef;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
    InvalidLogLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
            ArgsError::InvalidLogLevel { raw } => write!(f, "invalid --log-level value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

fn parse_level(raw: String) -> Result<Level, ArgsError> {
    raw.trim()
        .parse::<Level>()
        .map_err(|_| ArgsError::InvalidLogLevel { raw })
}

struct DesktopApp {
    config: LessonConfig,
    platform: LessonPlatformRef,
}

impl UiApp for DesktopApp {
    fn lesson_config(&self) -> LessonConfig {
        self.config.clone()
    }

    fn platform(&self) -> LessonPlatformRef {
        Arc::clone(&self.platform)
    }
}

#[derive(Debug)]
struct Args {
    config_path: Option<PathBuf>,
    language: Option<String>,
    log_level: Level,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--config <path>] [--lang <tag>] [--log-level <level>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in word list, --lang ru-RU, --log-level info");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LESSON_CONFIG, LESSON_LANG, LESSON_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut config_path = std::env::var("LESSON_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut language = std::env::var("LESSON_LANG")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut log_level = match std::env::var("LESSON_LOG") {
            Ok(value) if !value.trim().is_empty() => parse_level(value)?,
            _ => Level::INFO,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    config_path = Some(PathBuf::from(require_value(args, "--config")?));
                }
                "--lang" => {
                    language = Some(require_value(args, "--lang")?);
                }
                "--log-level" => {
                    log_level = parse_level(require_value(args, "--log-level")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            config_path,
            language,
            log_level,
        })
    }

    fn config_source(&self) -> ConfigSource {
        self.config_path
            .clone()
            .map_or(ConfigSource::Defaults, ConfigSource::File)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    dioxus::logger::init(args.log_level)?;

    let config = ConfigService::new(args.config_source())
        .with_language(args.language.clone())
        .load()?;
    info!(
        words = config.words().len(),
        language = %config.recognition().language,
        "lesson configured"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        config,
        platform: Arc::new(BrowserPlatform),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Say It")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
