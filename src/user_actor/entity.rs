//! Record trait implementation for [`User`].
//!
//! Enforces the user invariants inside the store: student numbers and
//! emails are unique, and the balance never goes below zero.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::model::{Role, User, UserCreate, UserFilter, UserId, UserUpdate};
use crate::store::Record;
use async_trait::async_trait;

fn validate(name: &str, email: &str, student_number: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::ValidationError("name is required".into()));
    }
    if student_number.trim().is_empty() {
        return Err(UserError::ValidationError("student number is required".into()));
    }
    if !email.contains('@') {
        return Err(UserError::ValidationError(format!("invalid email: {email:?}")));
    }
    Ok(())
}

#[async_trait]
impl Record for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Filter = UserFilter;
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    fn requested_id(params: &UserCreate) -> Option<UserId> {
        params.id.clone()
    }

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        validate(&params.name, &params.email, &params.student_number)?;
        Ok(User::from_parts(id, params))
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        if self.student_number == other.student_number {
            return Some(format!("student number {} already registered", self.student_number));
        }
        if self.email.eq_ignore_ascii_case(&other.email) {
            return Some(format!("email {} already registered", self.email));
        }
        None
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::All => true,
            UserFilter::StudentNumber(number) => &self.student_number == number,
            UserFilter::Email(email) => self.email.eq_ignore_ascii_case(email),
        }
    }

    /// # Fields Updated
    /// - `name`, `email`: profile details (re-validated)
    /// - `role`: set by access verification
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        validate(&self.name, &self.email, &self.student_number)
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<UserActionResult, UserError> {
        match action {
            UserAction::Debit(amount) => {
                let remaining = self.balance.checked_sub(amount).ok_or(
                    UserError::InsufficientBalance {
                        requested: amount,
                        available: self.balance,
                    },
                )?;
                self.balance = remaining;
                Ok(UserActionResult::Debit(remaining))
            }
            UserAction::Credit(amount) => {
                self.balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(UserError::BalanceOverflow)?;
                Ok(UserActionResult::Credit(self.balance))
            }
            UserAction::GrantBoothAccess(booth_id) => {
                if self.has_booth_access(&booth_id) {
                    return Ok(UserActionResult::GrantBoothAccess(false));
                }
                self.booth_access.push(booth_id);
                if self.role == Role::Student {
                    self.role = Role::BoothStaff;
                }
                Ok(UserActionResult::GrantBoothAccess(true))
            }
        }
    }
}
