use std::io;

use anyhow::Context;
use clap::Parser;
use lead_cli::{config, Config, UreqTransport};
use lead_core::{CepClient, LeadClient, LeadService, Session};
use tracing_subscriber::EnvFilter;

/// Cadastro de leads por CNPJ no terminal
#[derive(Parser)]
#[command(name = "leads", version)]
struct Args {
    /// URL base da API de leads (sobrepõe LEADS_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// URL base do serviço de CEP (sobrepõe CEP_API_URL)
    #[arg(long)]
    cep_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let dotenv_error = config::load_dotenv();

    // Logs go to stderr so they never interleave with the rendered screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    if let Some(err) = dotenv_error {
        tracing::warn!(%err, "ignoring unreadable .env file");
    }

    let mut config = Config::from_env();
    if let Some(url) = args.api_url {
        config.leads_api_url = url;
    }
    if let Some(url) = args.cep_url {
        config.cep_api_url = url;
    }
    tracing::info!(leads = %config.leads_api_url, cep = %config.cep_api_url, "configuration loaded");

    let service = LeadService::new(
        LeadClient::new(&config.leads_api_url),
        CepClient::new(&config.cep_api_url),
        UreqTransport::new(),
    );
    let mut session = Session::new(service);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    lead_cli::run(&mut session, stdin.lock(), &mut stdout).context("terminal I/O failed")?;
    Ok(())
}
