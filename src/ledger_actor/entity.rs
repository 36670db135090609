//! Record trait implementation for [`TransactionRecord`].
//!
//! Creating a ledger entry *is* the purchase. `on_create` prices the cart
//! from the booth catalog, debits the buyer and credits the booth; the
//! entry is stored only if all of that succeeded. The entry id is the
//! client's request id, so the store refuses a second create for the same
//! request before any money moves.

use super::error::LedgerError;
use crate::clients::{BoothClient, UserClient};
use crate::model::{cart_total, LineItem, PurchaseRequest, TransactionFilter, TransactionId, TransactionRecord};
use crate::store::{Record, RecordClient};
use async_trait::async_trait;
use tracing::{error, info, warn};

#[async_trait]
impl Record for TransactionRecord {
    type Id = TransactionId;
    type Create = PurchaseRequest;
    type Update = ();
    type Filter = TransactionFilter;
    type Action = ();
    type ActionResult = ();
    type Context = (UserClient, BoothClient);
    type Error = LedgerError;

    fn requested_id(params: &PurchaseRequest) -> Option<TransactionId> {
        Some(params.request_id.clone())
    }

    fn from_create_params(id: TransactionId, params: PurchaseRequest) -> Result<Self, LedgerError> {
        if params.items.is_empty() {
            return Err(LedgerError::ValidationError("purchase has no items".into()));
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
            return Err(LedgerError::ValidationError(format!(
                "quantity for {} must be at least 1",
                line.product_id
            )));
        }
        Ok(TransactionRecord::from_request(id, params))
    }

    fn matches(&self, filter: &TransactionFilter) -> bool {
        match filter {
            TransactionFilter::All => true,
            TransactionFilter::Buyer(id) => &self.buyer_id == id,
            TransactionFilter::Booth(id) => &self.booth_id == id,
        }
    }

    /// Prices the cart, then moves the money.
    ///
    /// # Steps
    /// 1. Load the booth and snapshot each line's price from its catalog.
    /// 2. Debit the buyer (rejected if the balance does not cover it).
    /// 3. Credit the booth's sales total, refunding the buyer on failure.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), LedgerError> {
        let (users, booths) = ctx;

        let booth = booths
            .get(self.booth_id.clone())
            .await?
            .ok_or_else(|| LedgerError::BoothNotFound(self.booth_id.to_string()))?;

        let mut items = Vec::with_capacity(self.pending.len());
        for line in &self.pending {
            let product = booth
                .product(&line.product_id)
                .ok_or_else(|| LedgerError::UnknownProduct {
                    booth: booth.id.to_string(),
                    product: line.product_id.to_string(),
                })?;
            items.push(LineItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price,
                quantity: line.quantity,
            });
        }
        let total = cart_total(items.iter().map(|i| (i.unit_price, i.quantity)))
            .ok_or_else(|| LedgerError::ValidationError("purchase total overflows".into()))?;

        users.debit(self.buyer_id.clone(), total).await?;

        if let Err(e) = booths.record_sale(self.booth_id.clone(), total).await {
            warn!(id = %self.id, booth_id = %self.booth_id, error = %e, "Booth credit failed, refunding buyer");
            let refunded = match users.credit(self.buyer_id.clone(), total).await {
                Ok(_) => true,
                Err(refund_error) => {
                    error!(
                        id = %self.id,
                        buyer_id = %self.buyer_id,
                        total,
                        error = %refund_error,
                        "Refund failed; buyer was debited without a sale"
                    );
                    false
                }
            };
            return Err(LedgerError::CreditFailed {
                reason: e.to_string(),
                refunded,
            });
        }

        self.items = items;
        self.total = total;
        self.pending.clear();
        info!(id = %self.id, buyer_id = %self.buyer_id, booth_id = %self.booth_id, total, "Purchase recorded");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), LedgerError> {
        Err(LedgerError::Immutable)
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), LedgerError> {
        Err(LedgerError::Immutable)
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), LedgerError> {
        Err(LedgerError::Immutable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoothId, CartLine, ProductId, UserId};

    fn request(items: Vec<CartLine>) -> PurchaseRequest {
        PurchaseRequest {
            request_id: TransactionId::from("t1"),
            booth_id: BoothId::from("b1"),
            booth_name: "Snacks".into(),
            buyer_id: UserId::from("u1"),
            buyer_name: "Ann".into(),
            actor_id: UserId::from("u2"),
            actor_name: "Bob".into(),
            items,
        }
    }

    #[test]
    fn test_request_id_becomes_record_id() {
        let req = request(vec![CartLine {
            product_id: ProductId::from("p1"),
            quantity: 1,
        }]);
        assert_eq!(TransactionRecord::requested_id(&req), Some(TransactionId::from("t1")));
    }

    #[test]
    fn test_empty_and_zero_quantity_carts_are_rejected() {
        let empty = TransactionRecord::from_create_params(TransactionId::from("t1"), request(vec![]));
        assert!(matches!(empty, Err(LedgerError::ValidationError(_))));

        let zero = TransactionRecord::from_create_params(
            TransactionId::from("t1"),
            request(vec![CartLine {
                product_id: ProductId::from("p1"),
                quantity: 0,
            }]),
        );
        assert!(matches!(zero, Err(LedgerError::ValidationError(_))));
    }
}
