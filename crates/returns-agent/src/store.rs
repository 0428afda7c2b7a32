//! The read-only order store that the tools operate on.

use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

/// A purchased order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRecord {
    /// The unique order identifier, e.g. `ORD-001`.
    pub order_id: String,
    /// The purchased product.
    pub product_name: String,
    /// The calendar date of the purchase.
    pub purchase_date: NaiveDate,
    /// The purchase price.
    pub price: f64,
    /// The purchasing customer.
    pub customer_name: String,
}

/// A static mapping from order identifier to order record.
///
/// The store is seeded once at startup and read-only thereafter; lookups
/// are case-insensitive. Any backing store that preserves this contract
/// could substitute the in-memory map.
#[derive(Clone, Debug, Default)]
pub struct OrderStore {
    orders: HashMap<String, OrderRecord>,
}

impl OrderStore {
    /// Creates a store seeded with the demo purchases, dated relative
    /// to today.
    #[inline]
    pub fn mock() -> Self {
        Self::mock_at(Local::now().date_naive())
    }

    /// Creates a store seeded with the demo purchases, dated relative
    /// to the given day. Useful for deterministic tests.
    pub fn mock_at(today: NaiveDate) -> Self {
        let seed = [
            ("ORD-001", "Wireless Bluetooth Headphones", 10, 79.99, "John Smith"),
            ("ORD-002", "Smart Fitness Watch", 35, 199.99, "Sarah Johnson"),
            ("ORD-003", "USB-C Charging Cable", 5, 15.99, "Mike Davis"),
            ("ORD-004", "Portable Power Bank", 45, 49.99, "Emily Chen"),
            ("ORD-005", "Laptop Case", 20, 24.99, "Alex Rodriguez"),
        ];

        let orders = seed
            .into_iter()
            .map(|(order_id, product_name, days_ago, price, customer_name)| {
                let record = OrderRecord {
                    order_id: order_id.to_owned(),
                    product_name: product_name.to_owned(),
                    purchase_date: today - Days::new(days_ago),
                    price,
                    customer_name: customer_name.to_owned(),
                };
                (order_id.to_owned(), record)
            })
            .collect();
        Self { orders }
    }

    /// Looks up an order by its identifier, case-insensitively.
    pub fn get(&self, order_id: &str) -> Option<&OrderRecord> {
        self.orders.get(&order_id.to_uppercase())
    }

    /// Returns all orders, sorted by identifier.
    pub fn orders(&self) -> Vec<&OrderRecord> {
        let mut orders: Vec<_> = self.orders.values().collect();
        orders.sort_by(|a, b| a.order_id.cmp(&b.order_id));
        orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = OrderStore::mock_at(today());
        for id in ["ORD-003", "ord-003", "Ord-003"] {
            let order = store.get(id).unwrap();
            assert_eq!(order.product_name, "USB-C Charging Cable");
            assert_eq!(order.price, 15.99);
        }
    }

    #[test]
    fn test_unknown_order_is_none() {
        let store = OrderStore::mock_at(today());
        assert!(store.get("ORD-999").is_none());
    }

    #[test]
    fn test_purchase_dates_are_relative() {
        let store = OrderStore::mock_at(today());
        assert_eq!(
            store.get("ORD-003").unwrap().purchase_date,
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
        );
        assert_eq!(
            store.get("ORD-004").unwrap().purchase_date,
            NaiveDate::from_ymd_opt(2026, 7, 16).unwrap()
        );
    }

    #[test]
    fn test_orders_are_sorted() {
        let store = OrderStore::mock_at(today());
        let ids: Vec<_> =
            store.orders().iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(
            ids,
            ["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"]
        );
    }
}
