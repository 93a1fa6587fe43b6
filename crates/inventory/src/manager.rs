//! In-memory inventory manager.
//!
//! The manager is the only owner of product state. Every mutation is validated
//! here and reported back as a [`DomainResult`]; nothing panics on a rejected
//! operation.

use tracing::debug;

use ims_core::{DomainError, DomainResult, Entity, Money, ProductId};

use crate::product::Product;

/// One line of a listing: the stored fields plus the derived total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Money,
    pub total_value: Money,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            quantity: product.quantity(),
            unit_price: product.unit_price(),
            total_value: product.total_value(),
        }
    }
}

/// Snapshot returned by [`InventoryManager::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// No products are stored.
    Empty,
    /// Every stored product, ascending by id. Never empty.
    Products(Vec<ProductRow>),
}

/// Insertion-ordered product collection with validated mutations.
#[derive(Debug, Default)]
pub struct InventoryManager {
    products: Vec<Product>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.is(id))
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.is(id))
    }

    /// Store a new product.
    ///
    /// Rejected when the id is not positive or already taken, when the price
    /// or quantity is negative, or when its line value or the new inventory
    /// total would overflow the decimal range.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        let result = self.validate_new(&product);
        match &result {
            Ok(()) => {
                debug!(id = %product.id(), name = product.name(), "product added");
                self.products.push(product);
            }
            Err(err) => debug!(id = %product.id(), %err, "add rejected"),
        }
        result
    }

    fn validate_new(&self, product: &Product) -> DomainResult<()> {
        let id = product.id();
        if !id.is_positive() {
            return Err(DomainError::invalid_identifier(format!(
                "{id} is not a positive integer"
            )));
        }
        if self.get(id).is_some() {
            return Err(DomainError::invalid_identifier(format!("{id} is already in use")));
        }
        if product.unit_price().is_negative() {
            return Err(DomainError::negative_value(format!(
                "unit price {}",
                product.unit_price()
            )));
        }
        if product.quantity() < 0 {
            return Err(DomainError::negative_value(format!(
                "quantity {}",
                product.quantity()
            )));
        }
        Self::ensure_representable(product, self.total_inventory_value())
    }

    /// The product's line value, and `others` plus that value, must both fit.
    fn ensure_representable(product: &Product, others: Money) -> DomainResult<()> {
        let line = product
            .unit_price()
            .checked_times(product.quantity())
            .ok_or_else(|| {
                DomainError::value_out_of_range(format!(
                    "{} x {} overflows",
                    product.quantity(),
                    product.unit_price()
                ))
            })?;
        others.checked_add(line).ok_or_else(|| {
            DomainError::value_out_of_range(format!(
                "inventory total {others} + {line} overflows"
            ))
        })?;
        Ok(())
    }

    /// Delete the product with this id.
    pub fn remove(&mut self, id: ProductId) -> DomainResult<()> {
        let Some(index) = self.position(id) else {
            debug!(%id, "remove rejected: not found");
            return Err(DomainError::not_found(id));
        };
        let removed = self.products.remove(index);
        debug!(%id, name = removed.name(), "product removed");
        Ok(())
    }

    /// Replace the stored quantity of a product. Name and price are kept.
    pub fn update_quantity(&mut self, id: ProductId, new_quantity: i32) -> DomainResult<()> {
        if new_quantity < 0 {
            debug!(%id, new_quantity, "update rejected: negative quantity");
            return Err(DomainError::negative_value(format!("quantity {new_quantity}")));
        }
        let Some(index) = self.position(id) else {
            debug!(%id, "update rejected: not found");
            return Err(DomainError::not_found(id));
        };

        let updated = self.products[index].clone().with_quantity(new_quantity);
        let others: Money = self
            .products
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| p.total_value())
            .sum();
        if let Err(err) = Self::ensure_representable(&updated, others) {
            debug!(%id, new_quantity, %err, "update rejected");
            return Err(err);
        }

        let previous = std::mem::replace(&mut self.products[index], updated);
        let old_quantity = previous.quantity();

        debug!(%id, old_quantity, new_quantity, "quantity updated");
        Ok(())
    }

    /// All products ordered by ascending id, or [`Listing::Empty`].
    ///
    /// Storage order is untouched; sorting happens on the snapshot.
    pub fn list(&self) -> Listing {
        if self.products.is_empty() {
            return Listing::Empty;
        }
        let mut rows: Vec<ProductRow> = self.products.iter().map(ProductRow::from).collect();
        rows.sort_by_key(|row| row.id);
        Listing::Products(rows)
    }

    /// Sum of every product's total value; zero when empty.
    pub fn total_inventory_value(&self) -> Money {
        self.products.iter().map(Product::total_value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn price(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn ids(listing: &Listing) -> Vec<i32> {
        match listing {
            Listing::Empty => Vec::new(),
            Listing::Products(rows) => rows.iter().map(|row| row.id.get()).collect(),
        }
    }

    #[test]
    fn add_then_list_returns_the_product_with_its_total() {
        let mut inventory = InventoryManager::new();
        inventory
            .add(Product::new(1, "Widget", 5, price("2.00")))
            .unwrap();

        let err = inventory
            .add(Product::new(1, "Other", 1, price("1.00")))
            .unwrap_err();
        match err {
            DomainError::InvalidIdentifier(_) => {}
            _ => panic!("Expected InvalidIdentifier for duplicate id"),
        }

        assert_eq!(
            inventory.list(),
            Listing::Products(vec![ProductRow {
                id: ProductId::new(1),
                name: "Widget".to_string(),
                quantity: 5,
                unit_price: price("2.00"),
                total_value: price("10.00"),
            }])
        );
        assert_eq!(inventory.total_inventory_value(), price("10.00"));
    }

    #[test]
    fn add_rejects_non_positive_ids() {
        let mut inventory = InventoryManager::new();
        for id in [0, -1, i32::MIN] {
            let err = inventory
                .add(Product::new(id, "Widget", 1, price("1.00")))
                .unwrap_err();
            assert!(matches!(err, DomainError::InvalidIdentifier(_)));
        }
        assert!(inventory.is_empty());
    }

    #[test]
    fn add_rejects_negative_price_and_quantity() {
        let mut inventory = InventoryManager::new();

        let err = inventory
            .add(Product::new(1, "Widget", 1, price("-0.01")))
            .unwrap_err();
        assert!(matches!(err, DomainError::NegativeValue(_)));

        let err = inventory
            .add(Product::new(1, "Widget", -1, price("1.00")))
            .unwrap_err();
        assert!(matches!(err, DomainError::NegativeValue(_)));

        assert!(inventory.is_empty());
    }

    #[test]
    fn add_accepts_zero_price_and_quantity() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(3, "Freebie", 0, Money::ZERO)).unwrap();
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn duplicate_add_leaves_original_untouched() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(7, "Original", 2, price("3.00"))).unwrap();
        let _ = inventory.add(Product::new(7, "Impostor", 99, price("0.50")));

        let stored = inventory.get(ProductId::new(7)).unwrap();
        assert_eq!(stored.name(), "Original");
        assert_eq!(stored.quantity(), 2);
        assert_eq!(stored.unit_price(), price("3.00"));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn same_name_different_id_is_not_a_duplicate() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Widget", 1, price("1.00"))).unwrap();
        inventory.add(Product::new(2, "Widget", 1, price("1.00"))).unwrap();
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn remove_missing_id_is_not_found() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Widget", 1, price("1.00"))).unwrap();

        let err = inventory.remove(ProductId::new(2)).unwrap_err();
        assert_eq!(err, DomainError::NotFound(ProductId::new(2)));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn remove_existing_id_drops_exactly_that_product() {
        let mut inventory = InventoryManager::new();
        for id in [3, 1, 2] {
            inventory.add(Product::new(id, "Item", 1, price("1.00"))).unwrap();
        }

        inventory.remove(ProductId::new(1)).unwrap();

        assert_eq!(inventory.len(), 2);
        assert_eq!(ids(&inventory.list()), vec![2, 3]);
        assert!(inventory.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn removing_the_last_product_lists_empty() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Widget", 1, price("1.00"))).unwrap();
        inventory.remove(ProductId::new(1)).unwrap();
        assert_eq!(inventory.list(), Listing::Empty);
    }

    #[test]
    fn update_negative_quantity_is_rejected_and_keeps_stock() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Widget", 5, price("2.00"))).unwrap();

        let err = inventory.update_quantity(ProductId::new(1), -1).unwrap_err();
        assert!(matches!(err, DomainError::NegativeValue(_)));
        assert_eq!(inventory.get(ProductId::new(1)).unwrap().quantity(), 5);
    }

    #[test]
    fn update_changes_only_quantity() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Widget", 5, price("2.00"))).unwrap();
        inventory.add(Product::new(2, "Gadget", 1, price("4.00"))).unwrap();

        inventory.update_quantity(ProductId::new(1), 0).unwrap();

        let stored = inventory.get(ProductId::new(1)).unwrap();
        assert_eq!(stored.quantity(), 0);
        assert_eq!(stored.name(), "Widget");
        assert_eq!(stored.unit_price(), price("2.00"));
        assert_eq!(inventory.total_inventory_value(), price("4.00"));
    }

    #[test]
    fn update_on_empty_inventory_is_not_found() {
        let mut inventory = InventoryManager::new();
        let err = inventory.update_quantity(ProductId::new(99), 5).unwrap_err();
        assert_eq!(err, DomainError::NotFound(ProductId::new(99)));
    }

    #[test]
    fn update_keeps_storage_position() {
        let mut inventory = InventoryManager::new();
        for id in [5, 2, 9] {
            inventory.add(Product::new(id, "Item", 1, price("1.00"))).unwrap();
        }
        inventory.update_quantity(ProductId::new(2), 8).unwrap();

        let stored: Vec<i32> = inventory.products.iter().map(|p| p.id().get()).collect();
        assert_eq!(stored, vec![5, 2, 9]);
    }

    #[test]
    fn empty_inventory_lists_empty_and_values_zero() {
        let inventory = InventoryManager::new();
        assert_eq!(inventory.list(), Listing::Empty);
        assert!(ids(&inventory.list()).is_empty());
        assert_eq!(inventory.total_inventory_value(), Money::ZERO);
    }

    #[test]
    fn total_value_sums_every_product() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "A", 3, price("2.50"))).unwrap();
        inventory.add(Product::new(2, "B", 1, price("10.00"))).unwrap();
        assert_eq!(inventory.total_inventory_value(), price("17.50"));
    }

    fn max_price() -> Money {
        Money::new(Decimal::MAX)
    }

    #[test]
    fn add_rejects_line_value_beyond_decimal_range() {
        let mut inventory = InventoryManager::new();

        let err = inventory.add(Product::new(1, "Big", 2, max_price())).unwrap_err();
        assert!(matches!(err, DomainError::ValueOutOfRange(_)));
        assert!(inventory.is_empty());
        assert_eq!(inventory.list(), Listing::Empty);
        assert_eq!(inventory.total_inventory_value(), Money::ZERO);
    }

    #[test]
    fn add_accepts_the_largest_representable_line() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Big", 1, max_price())).unwrap();
        assert_eq!(inventory.total_inventory_value(), max_price());
    }

    #[test]
    fn add_rejects_product_that_would_overflow_the_total() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Big", 1, max_price())).unwrap();

        let err = inventory.add(Product::new(2, "One more", 1, price("1"))).unwrap_err();
        assert!(matches!(err, DomainError::ValueOutOfRange(_)));
        assert_eq!(inventory.len(), 1);
        assert_eq!(ids(&inventory.list()), vec![1]);
        assert_eq!(inventory.total_inventory_value(), max_price());

        // Zero-value lines still fit.
        inventory.add(Product::new(3, "Free", 1, Money::ZERO)).unwrap();
    }

    #[test]
    fn update_rejects_quantity_that_would_overflow() {
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "Big", 1, max_price())).unwrap();

        let err = inventory.update_quantity(ProductId::new(1), i32::MAX).unwrap_err();
        assert!(matches!(err, DomainError::ValueOutOfRange(_)));
        assert_eq!(inventory.get(ProductId::new(1)).unwrap().quantity(), 1);
        assert_eq!(inventory.total_inventory_value(), max_price());
    }

    #[test]
    fn update_checks_total_against_the_other_products() {
        let half = Money::new(Decimal::MAX / Decimal::from(2));
        let mut inventory = InventoryManager::new();
        inventory.add(Product::new(1, "A", 1, half)).unwrap();
        inventory.add(Product::new(2, "B", 0, half)).unwrap();

        let err = inventory.update_quantity(ProductId::new(2), 2).unwrap_err();
        assert!(matches!(err, DomainError::ValueOutOfRange(_)));
        assert_eq!(inventory.get(ProductId::new(2)).unwrap().quantity(), 0);

        // Lowering the line being replaced is always fine.
        inventory.update_quantity(ProductId::new(1), 0).unwrap();
        inventory.update_quantity(ProductId::new(2), 1).unwrap();
        assert_eq!(inventory.total_inventory_value(), half);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any non-positive id is rejected and nothing is stored.
        #[test]
        fn non_positive_ids_are_always_rejected(id in i32::MIN..=0, quantity in 0i32..1000) {
            let mut inventory = InventoryManager::new();
            let result = inventory.add(Product::new(id, "X", quantity, Money::ZERO));
            prop_assert!(result.is_err());
            prop_assert!(inventory.is_empty());
        }

        /// Property: listing is ascending by id regardless of insertion order.
        #[test]
        fn listing_is_sorted_by_id(
            ids_in in prop::collection::hash_set(1i32..10_000, 1..40)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut inventory = InventoryManager::new();
            for id in &ids_in {
                prop_assert!(inventory.add(Product::new(*id, "Item", 1, Money::ZERO)).is_ok());
            }

            let mut expected = ids_in.clone();
            expected.sort_unstable();
            prop_assert_eq!(ids(&inventory.list()), expected);
        }

        /// Property: with prices and quantities up to the type limits, every add
        /// either fits or is rejected as out of range, and the total never panics.
        #[test]
        fn adds_near_the_limits_never_overflow_the_total(
            lines in prop::collection::vec((0i32..=i32::MAX, any::<u64>(), any::<u16>()), 1..12)
        ) {
            let mut inventory = InventoryManager::new();
            let mut expected = Money::ZERO;
            for (index, (quantity, mantissa, factor)) in lines.iter().enumerate() {
                let unit_price = Money::new(Decimal::from(*mantissa) * Decimal::from(*factor));
                let fits = unit_price
                    .checked_times(*quantity)
                    .and_then(|line| expected.checked_add(line));

                let id = i32::try_from(index).unwrap() + 1;
                let result = inventory.add(Product::new(id, "Item", *quantity, unit_price));
                match fits {
                    Some(total) => {
                        prop_assert!(result.is_ok());
                        expected = total;
                    }
                    None => {
                        prop_assert!(matches!(result, Err(DomainError::ValueOutOfRange(_))));
                    }
                }
            }

            prop_assert_eq!(inventory.total_inventory_value(), expected);
            if let Listing::Products(rows) = inventory.list() {
                let listed: Money = rows.iter().map(|row| row.total_value).sum();
                prop_assert_eq!(listed, expected);
            }
        }

        /// Property: the inventory total equals the sum of quantity × price.
        #[test]
        fn total_is_sum_of_line_values(
            lines in prop::collection::vec((0i32..1_000, 0i64..1_000_000), 0..20)
        ) {
            let mut inventory = InventoryManager::new();
            let mut expected = Decimal::ZERO;
            for (index, (quantity, cents)) in lines.iter().enumerate() {
                let unit_price = Decimal::new(*cents, 2);
                expected += unit_price * Decimal::from(*quantity);
                let id = i32::try_from(index).unwrap() + 1;
                inventory.add(Product::new(id, "Item", *quantity, unit_price)).unwrap();
            }
            prop_assert_eq!(inventory.total_inventory_value().amount(), expected);
        }
    }
}
