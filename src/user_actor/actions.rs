//! Custom actions for the user store.
//!
//! Balance changes and booth-access grants are actions rather than plain
//! updates so the check and the write happen in one step inside the store
//! task: a debit can never race another debit past zero.

use crate::model::{BoothId, Cents};

/// Record-specific operations on a [`User`](crate::model::User).
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Subtracts from the balance; fails if the balance is too small.
    Debit(Cents),
    /// Adds to the balance (top-ups and refunds).
    Credit(Cents),
    /// Adds a booth to the access set. Students become booth staff.
    GrantBoothAccess(BoothId),
}

/// Results from [`UserAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    /// Balance after the debit.
    Debit(Cents),
    /// Balance after the credit.
    Credit(Cents),
    /// `true` if the booth was newly added.
    GrantBoothAccess(bool),
}
