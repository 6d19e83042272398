use std::io;
use std::process;

use tokio_stream::wrappers::ReceiverStream;
use tracing_subscriber::EnvFilter;
use wallet_recon::config::{Backend, Config};
use wallet_recon::csv::write_summaries;
use wallet_recon::ledger::{InMemoryLedger, JsonLedger, LedgerSource};
use wallet_recon::{ShortfallPolicy, WalletService};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    match config.backend {
        Backend::Memory { accounts, seed } => {
            run(InMemoryLedger::seeded(accounts, seed), config.policy).await;
        }
        Backend::Json { dir } => match JsonLedger::open(&dir) {
            Ok(ledger) => run(ledger, config.policy).await,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
    }
}

async fn run<L: LedgerSource>(ledger: L, policy: ShortfallPolicy) {
    let uids: Vec<_> = match ledger.accounts().await {
        Ok(accounts) => accounts.into_iter().map(|a| a.uid).collect(),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let service = WalletService::new(ledger, policy);
    let (uid_sender, uid_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for uid in uids {
            uid_sender.send(uid).await.unwrap();
        }
    });

    let summaries = service.summarize(ReceiverStream::new(uid_receiver)).await;

    write_summaries(io::stdout().lock(), &summaries).expect("failed to write csv output");
}
