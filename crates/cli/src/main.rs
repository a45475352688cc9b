use clap::Parser;
use rootwalk_domain::{CliOverrides, DomainError, DomainName};
use rootwalk_infrastructure::dns::{LookupMode, Resolution};
use std::process::ExitCode;
use tracing::{debug, error};

mod bootstrap;

#[derive(Parser)]
#[command(name = "resolve")]
#[command(version)]
#[command(about = "Iterative IPv4 resolver that walks referrals down from the root servers")]
struct Cli {
    /// Hostname to resolve
    hostname: String,

    /// Resolve the mail exchange of the hostname instead of its address
    #[arg(short = 'm', long = "mail")]
    mail: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// File listing root server IPv4 addresses, one per line
    #[arg(long, value_name = "FILE")]
    root_hints: Option<String>,

    /// Seconds to wait for each server before trying the next
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

const EXIT_NAME_ERROR: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(resolution) => {
            print_resolution(&cli.hostname, &resolution);
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<DomainError>() {
            Some(DomainError::NameError(_)) => {
                debug!(error = %e, "Authoritative NXDOMAIN");
                println!("name could not be resolved");
                ExitCode::from(EXIT_NAME_ERROR)
            }
            _ => {
                error!(error = %e, "Resolution failed");
                eprintln!("{}: {:#}", cli.hostname, e);
                ExitCode::from(EXIT_FAILURE)
            }
        },
    }
}

async fn run(cli: &Cli) -> anyhow::Result<Resolution> {
    let cli_overrides = CliOverrides {
        query_timeout: cli.timeout,
        root_hints: cli.root_hints.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let name: DomainName = cli.hostname.parse()?;
    let mode = if cli.mail {
        LookupMode::MailExchange
    } else {
        LookupMode::Address
    };

    let resolver = bootstrap::build_resolver(&config).await?;
    Ok(resolver.resolve(&name, mode).await?)
}

fn print_resolution(hostname: &str, resolution: &Resolution) {
    match &resolution.exchange {
        Some(exchange) => println!(
            "{} resolves to: {} (mail exchange {})",
            hostname, resolution.address, exchange
        ),
        None => println!("{} resolves to: {}", hostname, resolution.address),
    }
}
