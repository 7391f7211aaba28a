use std::path::PathBuf;

use colored::Colorize;
use structopt::StructOpt;

use feedsearch::cli::base::{exit_code, Matcher};
use feedsearch::cli::interactive::InteractiveCommand;
use feedsearch::cli::search::DetailCommand;
use feedsearch::client::BaseClient;
use feedsearch::config::{Environment, Settings};
use feedsearch::error::ConfigError;
use feedsearch::search_api::query::FeedQuery;
use feedsearch::telemetry::init_telemetry;

static HEADER: &str = r#"
--- Photo Feed Search CLI (FSCLI) ---
"#;

#[derive(StructOpt, Debug)]
struct GlobalOpts {
    /// Config file (JSON, YAML or TOML)
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Environment to search in (development or production)
    #[structopt(short, long)]
    env: Option<Environment>,

    /// Base URL, overrides the environment
    #[structopt(short, long)]
    url: Option<String>,

    /// Request timeout in seconds
    #[structopt(long)]
    timeout: Option<u64>,
}

#[derive(StructOpt, Debug)]
#[structopt(about = "CLI to search the public photo feed")]
#[allow(clippy::upper_case_acronyms)]
struct CLI {
    #[structopt(flatten)]
    global: GlobalOpts,

    #[structopt(subcommand)]
    cmd: FSCLI,
}

#[derive(StructOpt, Debug)]
#[allow(clippy::upper_case_acronyms)]
enum FSCLI {
    Search(FeedQuery),
    Detail(DetailCommand),
    Interactive(InteractiveCommand),
}

fn main() {
    init_telemetry();
    let cli = CLI::from_args();

    let settings = match load_settings(&cli.global) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("\n{} {}\n", "Error:".red().bold(), err);
            std::process::exit(exitcode::CONFIG);
        }
    };

    let client = match BaseClient::from_settings(&settings) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("\n{} {}\n", "Error:".red().bold(), err);
            std::process::exit(exit_code(&err));
        }
    };

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cli.cmd {
        FSCLI::Search(command) => command.process(&client),
        FSCLI::Detail(command) => command.process(&client),
        FSCLI::Interactive(command) => command.process(&client),
    }
}

// Settings are layered: config file, then FEEDSEARCH_ENV / FEEDSEARCH_URL,
// then the command line flags.
fn load_settings(opts: &GlobalOpts) -> Result<Settings, ConfigError> {
    let settings = match &opts.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let mut settings = settings.with_env()?;

    if let Some(environment) = opts.env {
        settings.environment = environment;
        // An explicit environment on the command line beats a URL from the config
        if opts.url.is_none() {
            settings.base_url = None;
        }
    }

    if let Some(url) = &opts.url {
        settings.base_url = Some(url.clone());
    }

    if let Some(timeout) = opts.timeout {
        settings.timeout_secs = timeout;
    }

    settings.validated()
}
