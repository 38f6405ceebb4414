//! Authmatech CLI: runs the verification flows against real endpoints.
//!
//! Local storage is a JSON file, so `submit` and a later `return` share the
//! pending number the way two page loads share browser storage.

use authmatech_browser::{StderrNotifier, StdoutNavigator, UserAgentDetector};
use authmatech_client::HttpClient;
use authmatech_flow::{
    ConfirmOutcome, FlowConfig, FlowState, QrImage, ReturnOutcome, RootDeps, RootFlow,
    SubmitOutcome, VerifyDeps, VerifyNumberScreen, View,
};
use authmatech_store::FileStore;
use authmatech_types::{filter_countries, AuthError};
use authmatech_utils::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "authmatech", about = "Mobile number verification flows")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "AUTHMATECH_CONFIG")]
    config: Option<PathBuf>,

    /// Header-enrichment endpoint.
    #[arg(long, env = "AUTHMATECH_ENRICHMENT_URL")]
    enrichment_url: Option<String>,

    /// Mobile confirmation endpoint.
    #[arg(long, env = "AUTHMATECH_CONFIRMATION_URL")]
    confirmation_url: Option<String>,

    #[arg(long, env = "AUTHMATECH_VERIFICATION_URL")]
    verification_url: Option<String>,

    #[arg(long, env = "AUTHMATECH_CLIENT_ID")]
    client_id: Option<String>,

    /// Partner redirect gateway.
    #[arg(long, env = "AUTHMATECH_GATEWAY_URL")]
    gateway_url: Option<String>,

    #[arg(long, env = "AUTHMATECH_PARTNER_ID")]
    partner_id: Option<String>,

    /// Address the gateway sends the visitor back to.
    #[arg(long, env = "AUTHMATECH_RETURN_URL")]
    return_url: Option<String>,

    /// URL encoded in the desktop QR code.
    #[arg(long, env = "AUTHMATECH_LANDING_URL")]
    landing_url: Option<String>,

    /// JSON file standing in for browser local storage.
    #[arg(long, env = "AUTHMATECH_STORAGE_PATH")]
    storage_path: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "AUTHMATECH_TIMEOUT")]
    timeout: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AUTHMATECH_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AUTHMATECH_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Classify the device and, on mobile, detect the number.
    Detect {
        /// User-agent string of the visiting browser.
        #[arg(long, default_value = "", env = "AUTHMATECH_USER_AGENT")]
        user_agent: String,
    },
    /// Detect the number and confirm it with the backend.
    Confirm {
        #[arg(long, default_value = "", env = "AUTHMATECH_USER_AGENT")]
        user_agent: String,
    },
    /// Park a number and print the partner gateway redirect.
    Submit {
        /// Country name, ISO code or dial code ("JO", "+962", "00962").
        #[arg(long)]
        country: String,
        /// Local number as typed; one leading zero is dropped.
        #[arg(long)]
        phone: String,
    },
    /// Handle the gateway's return to the verification page.
    Return {
        /// Full return URL or its query string.
        #[arg(long)]
        url: String,
    },
    /// List supported countries, optionally filtered.
    Countries {
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the QR code for the landing page.
    Qr,
}

impl Cli {
    /// File config (or defaults) with flags and env vars applied on top.
    fn flow_config(&self) -> anyhow::Result<FlowConfig> {
        let mut config = match &self.config {
            Some(path) => FlowConfig::from_toml_file(path)?,
            None => FlowConfig::default(),
        };

        let overrides = [
            (&self.enrichment_url, &mut config.enrichment_url),
            (&self.confirmation_url, &mut config.confirmation_url),
            (&self.verification_url, &mut config.verification_url),
            (&self.client_id, &mut config.client_id),
            (&self.gateway_url, &mut config.gateway_url),
            (&self.partner_id, &mut config.partner_id),
            (&self.return_url, &mut config.return_url),
            (&self.landing_url, &mut config.landing_url),
            (&self.log_format, &mut config.log_format),
            (&self.log_level, &mut config.log_level),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if let Some(path) = &self.storage_path {
            config.storage_path = path.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.flow_config()?;

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    authmatech_utils::init_tracing(format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Detect { user_agent } => {
            let flow = root_flow(&config, user_agent)?;
            flow.start().await?;
            print!("{}", flow.view());
        }
        Command::Confirm { user_agent } => {
            let flow = root_flow(&config, user_agent)?;
            if flow.start().await? == FlowState::Confirming {
                print!("{}", flow.view());
                match flow.confirm().await? {
                    ConfirmOutcome::Confirmed => {}
                    outcome => tracing::info!(?outcome, "confirmation did not complete"),
                }
            }
            print!("{}", flow.view());
        }
        Command::Submit { country, phone } => {
            let selected = filter_countries(&country)
                .into_iter()
                .next()
                .ok_or_else(|| AuthError::UnknownCountry(country.clone()))?;

            let screen = verify_screen(&config)?;
            screen.select_country(selected);
            screen.set_phone_input(phone);
            match screen.submit() {
                SubmitOutcome::Redirected(_) => {}
                SubmitOutcome::EmptyInput => return Err(AuthError::EmptyPhoneNumber.into()),
                SubmitOutcome::Busy | SubmitOutcome::Failed => {
                    print!("{}", screen.view());
                    anyhow::bail!("submission failed");
                }
            }
        }
        Command::Return { url } => {
            let screen = verify_screen(&config)?;
            match screen.handle_location(&url).await {
                ReturnOutcome::Routed(_) => {}
                ReturnOutcome::NotAReturn => {
                    tracing::info!("no gateway parameters in {url}");
                    print!("{}", screen.view());
                }
                outcome => {
                    print!("{}", screen.view());
                    anyhow::bail!("verification did not complete: {outcome:?}");
                }
            }
        }
        Command::Countries { query } => {
            let query = query.unwrap_or_default();
            let countries = filter_countries(&query);
            if countries.is_empty() {
                println!("{}", authmatech_flow::views::NOTHING_FOUND);
            }
            for country in countries {
                println!("{:<4} {country}", country.country_code);
            }
        }
        Command::Qr => {
            let qr = QrImage::encode(&config.landing_url)?;
            print!(
                "{}",
                View::Desktop {
                    url: config.landing_url.clone(),
                    qr: Some(qr),
                }
            );
        }
    }

    Ok(())
}

fn http_client(config: &FlowConfig) -> anyhow::Result<Arc<HttpClient>> {
    Ok(Arc::new(HttpClient::new(
        config.endpoints(),
        config.request_timeout(),
    )?))
}

fn root_flow(config: &FlowConfig, user_agent: String) -> anyhow::Result<RootFlow> {
    let client = http_client(config)?;
    Ok(RootFlow::new(
        config.landing_url.clone(),
        RootDeps {
            device: Arc::new(UserAgentDetector::new(user_agent)),
            enrichment: client.clone(),
            confirmation: client,
            notifier: Arc::new(StderrNotifier),
        },
    ))
}

fn verify_screen(config: &FlowConfig) -> anyhow::Result<VerifyNumberScreen> {
    Ok(VerifyNumberScreen::new(
        config.clone(),
        VerifyDeps {
            store: Arc::new(FileStore::open(config.storage_path.clone())),
            navigator: Arc::new(StdoutNavigator),
            api: http_client(config)?,
        },
    ))
}
