//! Northwind Core - Storage-independent queries over the Northwind sample records.
//!
//! This crate holds the record types, the read-only [`DataSource`] seam and the
//! fixed catalogue of queries (filters, joins, groupings and aggregates) that run
//! against it. It has no I/O beyond parsing a JSON document and does no printing.
//!
//! # Main Components
//!
//! - **Model**: `Customer`, `Order`, `Supplier` and `Product` records
//! - **Dataset**: immutable in-memory implementation of `DataSource`
//! - **Queries**: one function per task, returning lazy iterators or groupings
//!
//! # Example
//!
//! ```rust
//! use northwind_core::{queries, Dataset};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "customers": [
//!         {"id": "ALFKI", "company_name": "Alfreds Futterkiste", "city": "Berlin", "country": "Germany",
//!          "orders": [{"id": 10643, "order_date": "1997-08-25T00:00:00", "total": 814.5}]},
//!         {"id": "FISSA", "company_name": "FISSA", "city": "Madrid", "country": "Spain"}
//!     ]
//! });
//! let dataset = Dataset::from_json(&doc.to_string()).unwrap();
//!
//! let ids: Vec<&str> = queries::customers_by_turnover(&dataset, 100.0)
//!     .unwrap()
//!     .map(|c| c.id.as_str())
//!     .collect();
//! assert_eq!(ids, vec!["ALFKI"]);
//! ```

pub mod dataset;
pub mod error;
pub mod model;
pub mod queries;

// Re-export main types for convenience
pub use dataset::{DataSource, Dataset};
pub use error::{QueryError, QueryResult};
pub use model::{Customer, Order, Product, Supplier};
pub use queries::{
    CategoryGroup, CityProfitability, ContactIssue, FirstOrderDate, FirstOrderSummary,
    IncompleteContact, Period, PeriodStatistic, PriceBand, PriceBandGroup, PricedProduct,
    Statistic, StockGroup, TemporalStatistics,
};
