//! The booth-side cart: products picked for the current student.

use crate::model::{cart_total, Cents, Product, ProductId};

/// A product snapshot and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1; a line dropping to 0 is removed.
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one of `product`, or bumps the quantity if it is already in the cart.
    pub fn add(&mut self, product: Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem { product, quantity: 1 }),
        }
    }

    /// Returns `true` if the product was in the cart.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        before != self.items.len()
    }

    /// Sets a line's quantity; 0 removes the line. Returns `false` if the
    /// product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| &i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// `Σ price × quantity`, or `None` on overflow.
    pub fn total(&self) -> Option<Cents> {
        cart_total(self.items.iter().map(|i| (i.product.price, i.quantity)))
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: Cents) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_uppercase(),
            price,
            image: None,
        }
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = Cart::new();
        cart.add(product("chips", 150));
        cart.add(product("pop", 200));
        cart.add(product("chips", 150));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Some(500));
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("chips", 150));
        assert!(cart.set_quantity(&ProductId::from("chips"), 4));
        assert_eq!(cart.total(), Some(600));

        assert!(cart.set_quantity(&ProductId::from("chips"), 0));
        assert!(cart.is_empty());
        assert!(!cart.set_quantity(&ProductId::from("chips"), 2));
    }
}
