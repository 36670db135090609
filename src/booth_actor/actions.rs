//! Custom actions for the booth store.

use crate::model::{Cents, UserId};

/// Record-specific operations on a [`Booth`](crate::model::Booth).
#[derive(Debug, Clone, PartialEq)]
pub enum BoothAction {
    /// Adds a staff member. Adding an existing member is a no-op.
    AddMember(UserId),
    /// Removes a staff member; used to undo a half-finished join.
    RemoveMember(UserId),
    /// Adds a committed sale to `sales_total`.
    RecordSale(Cents),
}

/// Results from [`BoothAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq)]
pub enum BoothActionResult {
    /// `true` if the member was newly added.
    AddMember(bool),
    /// `true` if the member was present.
    RemoveMember(bool),
    /// The new sales total.
    RecordSale(u64),
}
