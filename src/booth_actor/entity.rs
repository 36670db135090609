//! Record trait implementation for [`Booth`].
//!
//! PINs are unique among booths: joining a booth is a PIN lookup, so two
//! booths sharing one would make the lookup ambiguous.

use super::actions::{BoothAction, BoothActionResult};
use super::error::BoothError;
use crate::model::{Booth, BoothCreate, BoothFilter, BoothId, BoothUpdate, ProductCreate};
use crate::store::Record;
use async_trait::async_trait;

fn validate(name: &str, pin: &str) -> Result<(), BoothError> {
    if name.trim().is_empty() {
        return Err(BoothError::ValidationError("booth name is required".into()));
    }
    if pin.trim().is_empty() {
        return Err(BoothError::ValidationError("booth PIN is required".into()));
    }
    Ok(())
}

fn validate_product(product: &ProductCreate) -> Result<(), BoothError> {
    if product.name.trim().is_empty() {
        return Err(BoothError::ValidationError("product name is required".into()));
    }
    Ok(())
}

#[async_trait]
impl Record for Booth {
    type Id = BoothId;
    type Create = BoothCreate;
    type Update = BoothUpdate;
    type Filter = BoothFilter;
    type Action = BoothAction;
    type ActionResult = BoothActionResult;
    type Context = ();
    type Error = BoothError;

    fn from_create_params(id: BoothId, params: BoothCreate) -> Result<Self, BoothError> {
        validate(&params.name, &params.pin)?;
        params.products.iter().try_for_each(validate_product)?;
        Ok(Booth::from_parts(id, params))
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.pin == other.pin).then(|| format!("PIN already used by booth {}", other.name))
    }

    fn matches(&self, filter: &BoothFilter) -> bool {
        match filter {
            BoothFilter::All => true,
            BoothFilter::Pin(pin) => &self.pin == pin,
        }
    }

    async fn on_update(&mut self, update: BoothUpdate, _ctx: &()) -> Result<(), BoothError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(pin) = update.pin {
            self.pin = pin;
        }
        validate(&self.name, &self.pin)
    }

    async fn handle_action(
        &mut self,
        action: BoothAction,
        _ctx: &(),
    ) -> Result<BoothActionResult, BoothError> {
        match action {
            BoothAction::AddMember(user_id) => {
                if self.has_member(&user_id) {
                    return Ok(BoothActionResult::AddMember(false));
                }
                self.members.push(user_id);
                Ok(BoothActionResult::AddMember(true))
            }
            BoothAction::RemoveMember(user_id) => {
                let before = self.members.len();
                self.members.retain(|m| m != &user_id);
                Ok(BoothActionResult::RemoveMember(before != self.members.len()))
            }
            BoothAction::RecordSale(amount) => {
                self.sales_total = self
                    .sales_total
                    .checked_add(amount)
                    .ok_or(BoothError::SalesOverflow)?;
                Ok(BoothActionResult::RecordSale(self.sales_total))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn snacks() -> Booth {
        Booth::from_parts(
            BoothId::from("b1"),
            BoothCreate::new("Snacks", "Chips and pop", "123456")
                .with_product(ProductCreate::new("Chips", 150)),
        )
    }

    #[tokio::test]
    async fn test_members_have_set_semantics() {
        let mut booth = snacks();
        let ann = UserId::from("u1");

        for expected in [true, false] {
            let result = booth
                .handle_action(BoothAction::AddMember(ann.clone()), &())
                .await;
            assert_eq!(result, Ok(BoothActionResult::AddMember(expected)));
        }
        assert_eq!(booth.members, vec![ann.clone()]);

        let result = booth.handle_action(BoothAction::RemoveMember(ann), &()).await;
        assert_eq!(result, Ok(BoothActionResult::RemoveMember(true)));
        assert!(booth.members.is_empty());
    }

    #[tokio::test]
    async fn test_sales_total_accumulates() {
        let mut booth = snacks();
        booth.handle_action(BoothAction::RecordSale(300), &()).await.unwrap();
        let result = booth.handle_action(BoothAction::RecordSale(450), &()).await;
        assert_eq!(result, Ok(BoothActionResult::RecordSale(750)));

        booth.sales_total = u64::MAX;
        let result = booth.handle_action(BoothAction::RecordSale(1), &()).await;
        assert_eq!(result, Err(BoothError::SalesOverflow));
    }

    #[test]
    fn test_pin_conflict() {
        let a = snacks();
        let mut b = Booth::from_parts(BoothId::from("b2"), BoothCreate::new("Drinks", "", "123456"));
        assert!(b.conflicts_with(&a).is_some());
        b.pin = "654321".into();
        assert!(b.conflicts_with(&a).is_none());
    }

    #[test]
    fn test_blank_pin_is_rejected() {
        let result = Booth::from_create_params(BoothId::from("b1"), BoothCreate::new("Snacks", "", " "));
        assert!(matches!(result, Err(BoothError::ValidationError(_))));
    }
}
