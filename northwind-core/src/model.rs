//! Record types of the Northwind dataset.
//!
//! Orders are owned by exactly one customer. Suppliers are independent records
//! that relate to customers only through a shared country and city.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A customer and the orders it placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Customer {
    /// Sum of all order totals.
    pub fn turnover(&self) -> f64 {
        self.orders.iter().map(|o| o.total).sum()
    }

    /// Date of the chronologically earliest order, if any.
    pub fn first_order_date(&self) -> Option<NaiveDateTime> {
        self.orders.iter().map(|o| o.order_date).min()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub order_date: NaiveDateTime,
    pub total: f64,
}

impl Order {
    pub fn year(&self) -> i32 {
        self.order_date.year()
    }

    pub fn month(&self) -> u32 {
        self.order_date.month()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub unit_price: f64,
    pub units_in_stock: u32,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.units_in_stock > 0
    }
}
