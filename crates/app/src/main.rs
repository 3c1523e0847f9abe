use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::MAX_AMOUNT;
use services::{OpenTdbProvider, ProviderConfig, QuizLoopService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidAmount { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidAmount { raw } => write!(f, "invalid --amount value: {raw}"),
            ArgsError::InvalidTimeout { raw } => {
                write!(f, "invalid --timeout-secs value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--amount <n>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url https://opentdb.com/api.php");
    eprintln!("  --amount 10          (1 to 50)");
    eprintln!("  --timeout-secs 10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_URL, QUIZ_AMOUNT, QUIZ_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(ProviderConfig),
    Help,
}

/// Apply command-line flags on top of `config`; flags win over the environment.
fn parse_args(
    args: &mut impl Iterator<Item = String>,
    mut config: ProviderConfig,
) -> Result<Command, ArgsError> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                config.base_url = value.trim().to_string();
            }
            "--amount" => {
                let value = require_value(args, "--amount")?;
                let amount: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| ArgsError::InvalidAmount { raw: value.clone() })?;
                if !(1..=MAX_AMOUNT).contains(&amount) {
                    return Err(ArgsError::InvalidAmount { raw: value });
                }
                config = config.with_amount(amount);
            }
            "--timeout-secs" => {
                let value = require_value(args, "--timeout-secs")?;
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                if secs == 0 {
                    return Err(ArgsError::InvalidTimeout { raw: value });
                }
                config.timeout = Duration::from_secs(secs);
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    if config.request_url().is_err() {
        return Err(ArgsError::InvalidApiUrl {
            raw: config.base_url,
        });
    }

    Ok(Command::Run(config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let config = match parse_args(&mut argv, ProviderConfig::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Run(config) => config,
    };

    tracing::info!(
        api_url = %config.base_url,
        amount = config.amount,
        timeout_secs = config.timeout.as_secs(),
        "starting trivia quiz"
    );

    let provider = Arc::new(OpenTdbProvider::new(config)?);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(QuizLoopService::new(provider)),
    });
    let context = build_app_context(&app);

    // The quiz is a normal window, never pinned above others.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Trivia Quiz")
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
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
