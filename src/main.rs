// Standard library
use std::path::PathBuf;
use std::process::ExitCode;

// 3rd party crates
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

// Project imports
use loopia_dns::functions::{pair_challenges, plugin_listing, run_auth, run_cleanup};
use loopia_dns::providers::{create_authenticator, ChallengeRequest, DnsAuthenticator};
use loopia_dns::settings::constants::CONFIG_PATH_ENV;
use loopia_dns::settings::{ConfigManager, Settings, SettingsOverrides};

/// dns-01 authenticator hook for certbot.
///
/// Run as `--manual-auth-hook "loopia-dns auth"` and
/// `--manual-cleanup-hook "loopia-dns cleanup"`; certbot passes the domain and
/// token through `CERTBOT_DOMAIN` and `CERTBOT_VALIDATION`.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Settings file; created with defaults when missing.
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Authenticator plugin to use (default: dns-loopia).
    #[arg(long, global = true)]
    authenticator: Option<String>,

    /// Loopia credentials INI file.
    #[arg(long, global = true)]
    dns_loopia_credentials: Option<PathBuf>,

    /// Seconds to wait for DNS propagation before validation.
    #[arg(long, global = true)]
    dns_loopia_propagation_seconds: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Publish the challenge TXT records.
    Auth(AuthArgs),
    /// Remove the challenge TXT records.
    Cleanup(CleanupArgs),
    /// List the available authenticator plugins.
    Plugins,
}

#[derive(Debug, Args)]
struct AuthArgs {
    /// Domain being validated. Repeat for several domains.
    #[arg(long = "domain", env = "CERTBOT_DOMAIN", required = true)]
    domains: Vec<String>,

    /// Validation token, one per --domain in the same order.
    #[arg(long = "validation", env = "CERTBOT_VALIDATION", required = true)]
    validations: Vec<String>,
}

#[derive(Debug, Args)]
struct CleanupArgs {
    /// Domain whose challenge record is removed. Repeat for several domains.
    #[arg(long = "domain", env = "CERTBOT_DOMAIN", required = true)]
    domains: Vec<String>,

    /// Accepted for symmetry with `auth`; records are removed by name.
    #[arg(long = "validation", env = "CERTBOT_VALIDATION")]
    validations: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Variables certbot sets take precedence over the .env file.
    dotenvy::dotenv().ok();

    let cli: Cli = Cli::parse();

    if let Command::Plugins = cli.command {
        for line in plugin_listing() {
            println!("{}", line);
        }
        return ExitCode::SUCCESS;
    }

    let paired = match &cli.command {
        Command::Auth(args) => pair_challenges(&args.domains, &args.validations),
        Command::Cleanup(args) => pair_challenges(&args.domains, &args.validations),
        Command::Plugins => Ok(Vec::new()),
    };
    let challenges: Vec<ChallengeRequest> = match paired {
        Ok(challenges) => challenges,
        Err(e) => Cli::command().error(ErrorKind::WrongNumberOfValues, e).exit(),
    };

    let overrides = SettingsOverrides {
        authenticator: cli.authenticator.clone(),
        credentials: cli.dns_loopia_credentials.clone(),
        propagation_seconds: cli.dns_loopia_propagation_seconds,
    };

    let config: ConfigManager = match ConfigManager::new(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to initialize configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.get_log_level());
    info!("⚙️ Settings have been loaded from {:?}", config.config_path);

    match run(cli.command, &challenges, &config.settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up `tracing` output on stderr, keeping HTTP client internals quiet.
fn init_logging(log_level: &str) {
    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::ERROR.into())
        .parse_lossy(format!(
            "{},hyper=error,hyper_util=error,reqwest=error,rustls=error",
            log_level
        ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(
    command: Command,
    challenges: &[ChallengeRequest],
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let authenticator: Box<dyn DnsAuthenticator> = create_authenticator(
        settings.get_authenticator_name(),
        &settings.get_authenticator_config(),
    )?;

    match command {
        Command::Auth(_) => run_auth(authenticator.as_ref(), challenges).await?,
        Command::Cleanup(_) => run_cleanup(authenticator.as_ref(), challenges).await?,
        Command::Plugins => {}
    }

    Ok(())
}
