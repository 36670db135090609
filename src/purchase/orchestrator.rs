//! Turns a cart into a ledger submission.
//!
//! The ledger does the money movement atomically. This side only checks
//! the cheap preconditions, computes the total for the local balance check
//! and re-reads the buyer afterwards so the balance shown is the stored one.

use super::cart::CartItem;
use super::error::PurchaseError;
use crate::clients::{LedgerClient, UserClient};
use crate::model::{cart_total, BoothId, CartLine, Cents, PurchaseRequest, TransactionId, User, UserId};
use crate::store::RecordClient;
use tracing::{info, instrument, warn};

/// The part of a user record the booth terminal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: UserId,
    pub name: String,
    pub student_number: String,
    pub balance: Cents,
}

impl From<User> for StudentSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            student_number: user.student_number,
            balance: user.balance,
        }
    }
}

/// Everything needed to submit one purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    /// Reuse the same id when resubmitting after an uncertain failure.
    pub request_id: TransactionId,
    pub booth_id: BoothId,
    pub booth_name: String,
    pub buyer: StudentSummary,
    pub actor_id: UserId,
    pub actor_name: String,
    pub items: Vec<CartItem>,
}

/// A committed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub transaction_id: TransactionId,
    pub total: Cents,
    /// The buyer's balance as re-read after the purchase; `None` if that
    /// read failed (the purchase itself still went through).
    pub buyer_balance: Option<Cents>,
    /// The request had already been committed; nothing was charged now.
    pub replayed: bool,
}

#[derive(Clone, Debug)]
pub struct PurchaseOrchestrator {
    users: UserClient,
    ledger: LedgerClient,
}

impl PurchaseOrchestrator {
    pub fn new(users: UserClient, ledger: LedgerClient) -> Self {
        Self { users, ledger }
    }

    /// Looks a student up by student number.
    #[instrument(skip(self))]
    pub async fn find_student(&self, student_number: &str) -> Result<StudentSummary, PurchaseError> {
        self.users
            .find_by_student_number(student_number.trim())
            .await
            .map_err(PurchaseError::Lookup)?
            .map(StudentSummary::from)
            .ok_or_else(|| PurchaseError::StudentNotFound(student_number.to_string()))
    }

    /// Submits `checkout` to the ledger. Never retried here.
    #[instrument(skip(self, checkout), fields(request_id = %checkout.request_id, buyer_id = %checkout.buyer.id))]
    pub async fn process_purchase(&self, checkout: Checkout) -> Result<PurchaseOutcome, PurchaseError> {
        if checkout.items.is_empty() {
            return Err(PurchaseError::EmptyCart);
        }
        if checkout.booth_id.as_str().is_empty() {
            return Err(PurchaseError::BoothNotFound);
        }
        if checkout.buyer.id.as_str().is_empty() {
            return Err(PurchaseError::StudentNotFound(checkout.buyer.student_number));
        }

        let total = cart_total(checkout.items.iter().map(|i| (i.product.price, i.quantity)))
            .ok_or(PurchaseError::TotalOverflow)?;
        if checkout.buyer.balance < total {
            return Err(PurchaseError::InsufficientBalance {
                total,
                balance: checkout.buyer.balance,
            });
        }

        let buyer_id = checkout.buyer.id.clone();
        let request = PurchaseRequest {
            request_id: checkout.request_id,
            booth_id: checkout.booth_id,
            booth_name: checkout.booth_name,
            buyer_id: checkout.buyer.id,
            buyer_name: checkout.buyer.name,
            actor_id: checkout.actor_id,
            actor_name: checkout.actor_name,
            items: checkout
                .items
                .iter()
                .map(|i| CartLine {
                    product_id: i.product.id.clone(),
                    quantity: i.quantity,
                })
                .collect(),
        };

        let receipt = self.ledger.submit(request).await.map_err(|e| {
            warn!(error = %e, "Purchase failed");
            PurchaseError::from(e)
        })?;

        let buyer_balance = match self.users.get(buyer_id).await {
            Ok(Some(buyer)) => Some(buyer.balance),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not refresh buyer balance");
                None
            }
        };

        info!(
            transaction_id = %receipt.record.id,
            total = receipt.record.total,
            replayed = receipt.replayed,
            "Purchase complete"
        );
        Ok(PurchaseOutcome {
            transaction_id: receipt.record.id,
            total: receipt.record.total,
            buyer_balance,
            replayed: receipt.replayed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger_actor::LedgerError;
    use crate::model::{Product, ProductId, TransactionRecord, UserCreate};
    use crate::store::mock::MockStore;
    use crate::store::StoreError;

    fn checkout(balance: Cents, items: Vec<CartItem>) -> Checkout {
        Checkout {
            request_id: TransactionId::from("t1"),
            booth_id: BoothId::from("b1"),
            booth_name: "Snacks".into(),
            buyer: StudentSummary {
                id: UserId::from("u1"),
                name: "Ann".into(),
                student_number: "100".into(),
                balance,
            },
            actor_id: UserId::from("staff"),
            actor_name: "Bob".into(),
            items,
        }
    }

    fn chips(quantity: u32) -> CartItem {
        CartItem {
            product: Product {
                id: ProductId::from("chips"),
                name: "Chips".into(),
                price: 150,
                image: None,
            },
            quantity,
        }
    }

    fn orchestrator(users: &MockStore<User>, ledger: &MockStore<TransactionRecord>) -> PurchaseOrchestrator {
        PurchaseOrchestrator::new(UserClient::new(users.client()), LedgerClient::new(ledger.client()))
    }

    #[tokio::test]
    async fn test_preconditions_send_nothing() {
        let users = MockStore::<User>::new();
        let ledger = MockStore::<TransactionRecord>::new();
        let service = orchestrator(&users, &ledger);

        let result = service.process_purchase(checkout(1000, vec![])).await;
        assert_eq!(result, Err(PurchaseError::EmptyCart));

        let mut no_booth = checkout(1000, vec![chips(1)]);
        no_booth.booth_id = BoothId::from("");
        assert_eq!(service.process_purchase(no_booth).await, Err(PurchaseError::BoothNotFound));

        let result = service.process_purchase(checkout(299, vec![chips(2)])).await;
        assert_eq!(
            result,
            Err(PurchaseError::InsufficientBalance {
                total: 300,
                balance: 299
            })
        );

        users.verify();
        ledger.verify();
    }

    #[tokio::test]
    async fn test_success_reports_refreshed_balance() {
        let mut users = MockStore::<User>::new();
        let mut ledger = MockStore::<TransactionRecord>::new();

        let mut record = TransactionRecord::from_request(
            TransactionId::from("t1"),
            PurchaseRequest {
                request_id: TransactionId::from("t1"),
                booth_id: BoothId::from("b1"),
                booth_name: "Snacks".into(),
                buyer_id: UserId::from("u1"),
                buyer_name: "Ann".into(),
                actor_id: UserId::from("staff"),
                actor_name: "Bob".into(),
                items: vec![],
            },
        );
        record.total = 300;
        ledger.expect_create().return_ok(TransactionId::from("t1"));
        ledger.expect_get(TransactionId::from("t1")).return_ok(Some(record));

        let buyer = User::from_parts(
            UserId::from("u1"),
            UserCreate::student("100", "Ann", "ann@example.com").with_balance(650),
        );
        users.expect_get(UserId::from("u1")).return_ok(Some(buyer));

        let outcome = orchestrator(&users, &ledger)
            .process_purchase(checkout(1000, vec![chips(2)]))
            .await
            .unwrap();
        assert_eq!(outcome.total, 300);
        // The stored balance wins over the locally assumed 700.
        assert_eq!(outcome.buyer_balance, Some(650));
        assert!(!outcome.replayed);
        users.verify();
        ledger.verify();
    }

    #[tokio::test]
    async fn test_ledger_failure_is_remote_failure() {
        let users = MockStore::<User>::new();
        let mut ledger = MockStore::<TransactionRecord>::new();
        ledger.expect_create().return_err(StoreError::Rejected(Box::new(
            LedgerError::InsufficientBalance {
                requested: 150,
                available: 0,
            },
        )));

        let result = orchestrator(&users, &ledger)
            .process_purchase(checkout(1000, vec![chips(1)]))
            .await;
        assert!(matches!(
            result,
            Err(PurchaseError::RemoteFailure(LedgerError::InsufficientBalance { .. }))
        ));
        ledger.verify();
    }

    #[tokio::test]
    async fn test_find_student_miss() {
        let mut users = MockStore::<User>::new();
        let ledger = MockStore::<TransactionRecord>::new();
        users.expect_find().return_ok(vec![]);

        let result = orchestrator(&users, &ledger).find_student("404").await;
        assert_eq!(result, Err(PurchaseError::StudentNotFound("404".into())));
        users.verify();
    }
}
