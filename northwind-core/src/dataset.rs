//! Data source abstraction and the in-memory dataset.
//!
//! Queries are written against the [`DataSource`] trait so they can run over any
//! read-only set of records. [`Dataset`] is the in-memory implementation that is
//! loaded once and never mutated afterwards.

use serde::Deserialize;

use crate::error::{QueryError, QueryResult};
use crate::model::{Customer, Order, Product, Supplier};

/// Trait for read-only record sources that queries can run against.
///
/// Implementations must return the same records, in the same order, on every
/// call. Queries rely on that for repeatable results.
pub trait DataSource {
    /// All customers, in load order.
    fn customers(&self) -> &[Customer];

    /// All suppliers, in load order.
    fn suppliers(&self) -> &[Supplier];

    /// All products, in load order.
    fn products(&self) -> &[Product];

    /// Every order, flattened through its owning customer.
    fn orders(&self) -> Box<dyn Iterator<Item = &Order> + '_> {
        Box::new(self.customers().iter().flat_map(|c| c.orders.iter()))
    }
}

/// Immutable in-memory dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    customers: Vec<Customer>,
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
}

/// On-disk JSON layout of a dataset document.
#[derive(Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    suppliers: Vec<Supplier>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Dataset {
    /// Build a dataset from its three collections.
    ///
    /// # Errors
    /// Returns `QueryError::InvalidDataset` if an order total or a product unit
    /// price is negative or not a finite number.
    pub fn new(
        customers: Vec<Customer>,
        suppliers: Vec<Supplier>,
        products: Vec<Product>,
    ) -> QueryResult<Self> {
        let dataset = Self {
            customers,
            suppliers,
            products,
        };
        dataset.check_invariants()?;
        Ok(dataset)
    }

    /// Parse a dataset from a JSON document with `customers`, `suppliers` and
    /// `products` arrays. Missing arrays are treated as empty.
    pub fn from_json(json: &str) -> QueryResult<Self> {
        let doc: DatasetDocument = serde_json::from_str(json)?;
        Self::new(doc.customers, doc.suppliers, doc.products)
    }

    /// Number of orders across all customers.
    pub fn order_count(&self) -> usize {
        self.customers.iter().map(|c| c.orders.len()).sum()
    }

    fn check_invariants(&self) -> QueryResult<()> {
        for customer in &self.customers {
            for order in &customer.orders {
                if !order.total.is_finite() || order.total < 0.0 {
                    return Err(QueryError::InvalidDataset(format!(
                        "order {} of customer '{}' has invalid total {}",
                        order.id, customer.id, order.total
                    )));
                }
            }
        }

        for product in &self.products {
            if !product.unit_price.is_finite() || product.unit_price < 0.0 {
                return Err(QueryError::InvalidDataset(format!(
                    "product {} has invalid unit price {}",
                    product.id, product.unit_price
                )));
            }
        }

        Ok(())
    }
}

impl DataSource for Dataset {
    fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let doc = json!({
            "customers": [
                {"id": "ALFKI", "company_name": "Alfreds Futterkiste", "city": "Berlin", "country": "Germany",
                 "orders": [
                    {"id": 10643, "order_date": "1997-08-25T00:00:00", "total": 814.5},
                    {"id": 10692, "order_date": "1997-10-03T00:00:00", "total": 878.0}
                 ]},
                {"id": "FISSA", "company_name": "FISSA", "city": "Madrid", "country": "Spain"}
            ],
            "suppliers": [
                {"id": 11, "name": "Heli Süßwaren GmbH & Co. KG", "city": "Berlin", "country": "Germany"}
            ],
            "products": [
                {"id": 1, "name": "Chai", "category": "Beverages", "unit_price": 18.0, "units_in_stock": 39}
            ]
        });

        let ds = Dataset::from_json(&doc.to_string()).unwrap();
        assert_eq!(ds.customers().len(), 2);
        assert_eq!(ds.suppliers().len(), 1);
        assert_eq!(ds.products().len(), 1);
        assert_eq!(ds.order_count(), 2);
        assert_eq!(ds.orders().count(), 2);
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let ds = Dataset::from_json("{}").unwrap();
        assert!(ds.customers().is_empty());
        assert!(ds.suppliers().is_empty());
        assert!(ds.products().is_empty());
        assert_eq!(ds, Dataset::default());
    }

    #[test]
    fn test_negative_order_total_rejected() {
        let doc = json!({
            "customers": [
                {"id": "BAD", "company_name": "Bad", "city": "X", "country": "Y",
                 "orders": [{"id": 1, "order_date": "1997-01-01T00:00:00", "total": -5.0}]}
            ]
        });
        let err = Dataset::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDataset(_)));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let err = Dataset::new(
            vec![],
            vec![],
            vec![Product {
                id: 7,
                name: "Broken".to_string(),
                category: "Misc".to_string(),
                unit_price: -1.0,
                units_in_stock: 1,
            }],
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidDataset(_)));
        assert!(err.to_string().contains("product 7"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Dataset::from_json("{\"customers\": 3}").unwrap_err();
        assert!(matches!(err, QueryError::Json(_)));
    }
}
