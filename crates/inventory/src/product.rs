//! Product record: one inventory line item and its derived value.

use ims_core::{Entity, Money, ProductId};

/// Inventory line item.
///
/// A plain record: it accepts any values, including ones the manager would
/// reject. Validation happens when a product enters the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: i32,
    unit_price: Money,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: i32,
        unit_price: impl Into<Money>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price: unit_price.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `quantity × unit_price`, computed on every call.
    ///
    /// Saturates for records the manager would reject as out of range.
    pub fn total_value(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Same product with a different stock quantity.
    pub fn with_quantity(self, quantity: i32) -> Self {
        Self { quantity, ..self }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
