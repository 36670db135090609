use super::config::Config;
use crate::access::AccessVerifier;
use crate::auth::AuthService;
use crate::clients::{BoothClient, IdentityClient, LedgerClient, UserClient};
use crate::import::Importer;
use crate::model::{Booth, BoothFilter, TransactionFilter, TransactionRecord, User, UserFilter};
use crate::purchase::PurchaseOrchestrator;
use crate::store::{RecordClient, StoreError};
use crate::{booth_actor, identity_actor, ledger_actor, user_actor};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

/// Every stored record, for export.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub booths: Vec<Booth>,
    pub transactions: Vec<TransactionRecord>,
}

/// The running set of stores plus the services built on them.
///
/// Services returned by [`access`](Self::access), [`purchases`](Self::purchases)
/// and friends hold clients; drop them before calling [`shutdown`](Self::shutdown).
pub struct FraserPaySystem {
    config: Config,
    pub users: UserClient,
    pub booths: BoothClient,
    pub ledger: LedgerClient,
    pub identity: IdentityClient,
    handles: Vec<JoinHandle<()>>,
}

impl FraserPaySystem {
    /// Spawns every store. Must be called inside a Tokio runtime.
    pub fn start(config: Config) -> Self {
        info!("Starting FraserPay");
        let mailbox = config.mailbox_size;

        let (user_actor, users) = user_actor::new(mailbox);
        let (booth_actor, booths) = booth_actor::new(mailbox);
        let (ledger_actor, ledger) = ledger_actor::new(mailbox);
        let (identity_actor, identity) = identity_actor::new(mailbox);

        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(booth_actor.run(())),
            tokio::spawn(ledger_actor.run((users.clone(), booths.clone()))),
            tokio::spawn(identity_actor.run(())),
        ];

        Self {
            config,
            users,
            booths,
            ledger,
            identity,
            handles,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn access(&self) -> AccessVerifier {
        AccessVerifier::new(
            self.users.clone(),
            self.booths.clone(),
            self.config.admin_pin.clone(),
            self.config.retry_policy(),
        )
    }

    pub fn purchases(&self) -> PurchaseOrchestrator {
        PurchaseOrchestrator::new(self.users.clone(), self.ledger.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.users.clone(), self.identity.clone(), self.config.retry_policy())
    }

    pub fn importer(&self) -> Importer {
        Importer::new(self.users.clone(), self.booths.clone())
    }

    /// Reads every user, booth and ledger entry, in a stable order.
    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let mut users = self.users.inner().find(UserFilter::All).await?;
        let mut booths = self.booths.inner().find(BoothFilter::All).await?;
        let mut transactions = self.ledger.inner().find(TransactionFilter::All).await?;
        users.sort_by(|a, b| a.student_number.cmp(&b.student_number));
        booths.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        transactions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(Snapshot {
            users,
            booths,
            transactions,
        })
    }

    /// Drops this system's clients and waits for every store to stop.
    ///
    /// The ledger holds user and booth clients, so those two stores stop
    /// only after the ledger has.
    pub async fn shutdown(self) {
        info!("Shutting down");
        drop(self.users);
        drop(self.booths);
        drop(self.ledger);
        drop(self.identity);

        for handle in self.handles {
            let _ = handle.await;
        }
        info!("Shutdown complete");
    }
}
