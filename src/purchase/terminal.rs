//! Session state for a booth ringing up sales.
//!
//! A [`Terminal`] remembers the selected booth, the student being served
//! and their cart. It also remembers the request id of a submission that
//! failed, so pressing submit again after an uncertain failure reuses it
//! and cannot charge twice.

use super::cart::Cart;
use super::error::PurchaseError;
use super::orchestrator::{Checkout, PurchaseOrchestrator, PurchaseOutcome, StudentSummary};
use crate::model::{Booth, ProductId, TransactionId, UserId};
use tracing::debug;

#[derive(Debug)]
pub struct Terminal {
    orchestrator: PurchaseOrchestrator,
    actor_id: UserId,
    actor_name: String,
    booth: Option<Booth>,
    student: Option<StudentSummary>,
    cart: Cart,
    pending_request: Option<TransactionId>,
}

impl Terminal {
    /// A terminal operated by `actor_id` (the staff member or administrator).
    pub fn new(orchestrator: PurchaseOrchestrator, actor_id: UserId, actor_name: impl Into<String>) -> Self {
        Self {
            orchestrator,
            actor_id,
            actor_name: actor_name.into(),
            booth: None,
            student: None,
            cart: Cart::new(),
            pending_request: None,
        }
    }

    /// Switches booth. The cart is emptied since its products belong to the old booth.
    pub fn select_booth(&mut self, booth: Booth) {
        debug!(booth_id = %booth.id, "Booth selected");
        self.booth = Some(booth);
        self.clear_cart();
    }

    /// Looks up and selects the student to charge.
    ///
    /// The previous student is deselected first, so a failed lookup leaves
    /// nobody selected.
    pub async fn lookup_student(&mut self, student_number: &str) -> Result<&StudentSummary, PurchaseError> {
        self.student = None;
        self.pending_request = None;
        let student = self.orchestrator.find_student(student_number).await?;
        Ok(self.student.insert(student))
    }

    /// Adds one of a product from the selected booth's menu.
    pub fn add_product(&mut self, product_id: &ProductId) -> Result<(), PurchaseError> {
        let booth = self.booth.as_ref().ok_or(PurchaseError::BoothNotFound)?;
        let product = booth
            .product(product_id)
            .cloned()
            .ok_or_else(|| PurchaseError::UnknownProduct(product_id.clone()))?;
        self.cart.add(product);
        self.pending_request = None;
        Ok(())
    }

    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        self.pending_request = None;
        self.cart.set_quantity(product_id, quantity)
    }

    pub fn remove_product(&mut self, product_id: &ProductId) -> bool {
        self.pending_request = None;
        self.cart.remove(product_id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.pending_request = None;
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn student(&self) -> Option<&StudentSummary> {
        self.student.as_ref()
    }

    pub fn booth(&self) -> Option<&Booth> {
        self.booth.as_ref()
    }

    /// Submits the cart for the selected student.
    ///
    /// On success the cart is cleared and the student's balance replaced by
    /// the stored one. On failure the cart is kept and the request id is
    /// remembered for the next attempt.
    pub async fn submit(&mut self) -> Result<PurchaseOutcome, PurchaseError> {
        let booth = self.booth.as_ref().ok_or(PurchaseError::BoothNotFound)?;
        let student = self
            .student
            .clone()
            .ok_or(PurchaseError::NoStudentSelected)?;
        let request_id = self
            .pending_request
            .get_or_insert_with(TransactionId::generate)
            .clone();

        let checkout = Checkout {
            request_id,
            booth_id: booth.id.clone(),
            booth_name: booth.name.clone(),
            buyer: student,
            actor_id: self.actor_id.clone(),
            actor_name: self.actor_name.clone(),
            items: self.cart.items().to_vec(),
        };

        let outcome = self.orchestrator.process_purchase(checkout).await?;
        self.cart.clear();
        self.pending_request = None;
        if let (Some(student), Some(balance)) = (self.student.as_mut(), outcome.buyer_balance) {
            student.balance = balance;
        }
        Ok(outcome)
    }

    /// Forgets the student, cart and any pending request; keeps the booth.
    pub fn reset(&mut self) {
        self.student = None;
        self.clear_cart();
    }
}
