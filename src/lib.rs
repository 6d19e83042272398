pub mod amount;
pub mod config;
pub mod csv;
pub mod ledger;
pub mod model;
pub mod recon;
pub mod service;
pub mod snapshot;

pub use amount::Amount;
pub use model::{AccountId, BalanceSplit, ShortfallPolicy, TopUp, Transfer, WalletSummary};
pub use recon::reconcile;
pub use service::WalletService;
