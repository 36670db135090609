use super::ids::{BoothId, ProductId, UserId};
use super::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item on a booth's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in cents.
    pub price: Cents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Payload for adding a product to a booth.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub name: String,
    pub price: Cents,
    pub image: Option<String>,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Cents) -> Self {
        Self {
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub(crate) fn into_product(self) -> Product {
        Product {
            id: ProductId::generate(),
            name: self.name,
            price: self.price,
            image: self.image,
        }
    }
}

/// An event booth: who staffs it, what it sells and how much it has taken.
///
/// # Store
/// Managed by a [`StoreActor`](crate::store::StoreActor); see
/// [`impl Record for Booth`](#impl-Record-for-Booth).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Booth {
    pub id: BoothId,
    pub name: String,
    pub description: String,
    /// Shared secret staff enter to join the booth. Unique among booths.
    pub pin: String,
    #[serde(default)]
    pub members: Vec<UserId>,
    #[serde(default)]
    pub products: Vec<Product>,
    /// Sum of every committed sale, in cents.
    #[serde(default)]
    pub sales_total: Cents,
    pub created_at: DateTime<Utc>,
}

impl Booth {
    pub fn from_parts(id: BoothId, params: BoothCreate) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            pin: params.pin,
            members: Vec::new(),
            products: params
                .products
                .into_iter()
                .map(ProductCreate::into_product)
                .collect(),
            sales_total: 0,
            created_at: Utc::now(),
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn has_member(&self, user_id: &UserId) -> bool {
        self.members.contains(user_id)
    }
}

/// Payload for creating a booth, optionally with its catalog.
#[derive(Debug, Clone)]
pub struct BoothCreate {
    pub name: String,
    pub description: String,
    pub pin: String,
    pub products: Vec<ProductCreate>,
}

impl BoothCreate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            pin: pin.into(),
            products: Vec::new(),
        }
    }

    pub fn with_product(mut self, product: ProductCreate) -> Self {
        self.products.push(product);
        self
    }
}

/// Payload for updating a booth's details.
#[derive(Debug, Clone, Default)]
pub struct BoothUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub pin: Option<String>,
}

/// Exact-match lookups over booths.
#[derive(Debug, Clone, PartialEq)]
pub enum BoothFilter {
    All,
    Pin(String),
}
