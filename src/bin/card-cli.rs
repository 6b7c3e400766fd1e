use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use card_client::api::client::ApiClient;
use card_client::card::auth;
use card_client::card::secrets::CardSecretsClient;
use card_client::card::session::TransportKey;
use card_client::config::{load_config, ClientConfig};
use card_client::observability::init_logging;
use card_client::state::MarketIndex;
use card_client::tx::actions::{DepositParams, SpendLimitParams, TxAction, WithdrawParams};
use card_client::tx::pipeline::{SubmissionOutcome, SubmissionPipeline};
use card_client::tx::status::{StatusSink, TxStatusUpdate};
use card_client::wallet::gateway::SigningGateway;
use card_client::wallet::local::LocalWallet;

#[derive(Parser)]
#[command(name = "card-cli")]
#[command(about = "CLI for the lending/card backend", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch asset prices
    Prices,
    /// Fetch deposit/borrow rates
    Rates {
        #[arg(long, value_delimiter = ',', default_values_t = vec![0u16])]
        markets: Vec<u16>,
    },
    /// Fetch account balances for the local wallet
    Balances {
        #[arg(long, value_delimiter = ',', default_values_t = vec![0u16])]
        markets: Vec<u16>,
    },
    /// Fetch account status
    Status,
    /// Fetch account health
    Health,
    /// Deposit collateral
    Deposit {
        #[arg(long)]
        amount_base_units: u64,
        #[arg(long, default_value_t = 0)]
        market_index: u16,
        #[arg(long)]
        repaying_loan: bool,
        #[arg(long)]
        use_max_amount: bool,
    },
    /// Withdraw collateral
    Withdraw {
        #[arg(long)]
        amount_base_units: u64,
        #[arg(long, default_value_t = 0)]
        market_index: u16,
        #[arg(long)]
        allow_loan: bool,
        #[arg(long)]
        use_max_amount: bool,
    },
    /// Adjust the card spend limit
    SpendLimit {
        #[arg(long)]
        transaction_limit_base_units: u64,
        #[arg(long)]
        timeframe_limit_base_units: u64,
        #[arg(long, default_value_t = 86_400)]
        timeframe_secs: u64,
    },
    /// Reveal card PAN/CVC once
    RevealCard {
        #[arg(long)]
        card_id: String,
    },
}

/// Prints status transitions as the pipeline reports them.
struct StderrStatusSink;

impl StatusSink for StderrStatusSink {
    fn show(&self, update: TxStatusUpdate) {
        match update.signature {
            Some(signature) => eprintln!("status: {:?} ({})", update.status, signature),
            None => eprintln!("status: {:?}", update.status),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    init_logging(&config.observability.log_level);

    let api = Arc::new(ApiClient::new(&config.api, &config.retries)?);
    let wallet = LocalWallet::from_env()?;
    let address = wallet.pubkey().to_string();
    let gateway = SigningGateway::new(Arc::new(wallet));

    match cli.command {
        Commands::Prices => {
            print_json(&api.prices().await?)?;
        }
        Commands::Rates { markets } => {
            print_json(&api.rates(&markets).await?)?;
        }
        Commands::Balances { markets } => {
            print_json(&api.balances(&address, &markets).await?)?;
        }
        Commands::Status => {
            println!("{}", api.account_status(&address).await?);
        }
        Commands::Health => {
            println!("{}", api.health(&address).await?);
        }
        Commands::Deposit {
            amount_base_units,
            market_index,
            repaying_loan,
            use_max_amount,
        } => {
            let action = TxAction::Deposit(DepositParams {
                address,
                amount_base_units,
                market_index: MarketIndex(market_index),
                repaying_loan,
                use_max_amount,
            });
            submit(&config, api, gateway, action).await?;
        }
        Commands::Withdraw {
            amount_base_units,
            market_index,
            allow_loan,
            use_max_amount,
        } => {
            let action = TxAction::Withdraw(WithdrawParams {
                address,
                amount_base_units,
                market_index: MarketIndex(market_index),
                allow_loan,
                use_max_amount,
            });
            submit(&config, api, gateway, action).await?;
        }
        Commands::SpendLimit {
            transaction_limit_base_units,
            timeframe_limit_base_units,
            timeframe_secs,
        } => {
            let action = TxAction::AdjustSpendLimit(SpendLimitParams {
                address,
                transaction_limit_base_units,
                timeframe_limit_base_units,
                timeframe_secs,
            });
            submit(&config, api, gateway, action).await?;
        }
        Commands::RevealCard { card_id } => {
            let bearer = auth::login(api.as_ref(), &gateway).await?;
            let transport_key = TransportKey::from_env()?;
            let secrets =
                CardSecretsClient::new(api, transport_key, config.retries.clone());
            let revealed = secrets.reveal(&card_id, &bearer).await?;
            println!("PAN: {}", revealed.pan);
            println!("CVC: {}", revealed.cvc);
        }
    }

    Ok(())
}

async fn submit(
    config: &ClientConfig,
    api: Arc<ApiClient>,
    gateway: SigningGateway,
    action: TxAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = SubmissionPipeline::new(
        api,
        gateway,
        Arc::new(StderrStatusSink),
        config.retries.clone(),
        config.submission.clone(),
    );

    match pipeline.run(action).await? {
        SubmissionOutcome::Sent { signature } => {
            println!("sent: {}", signature);
        }
        SubmissionOutcome::BlockhashExpired => {
            eprintln!("blockhash expired; re-run to fetch a fresh transaction");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
