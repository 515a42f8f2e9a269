//! Per-city profitability.

use serde::Serialize;

use super::helpers::{average, group_by_first_appearance};
use crate::dataset::DataSource;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityProfitability<'a> {
    pub city: &'a str,
    pub customer_count: usize,
    /// Mean over the city's customers of each customer's summed order totals.
    pub average_total: f64,
    /// Mean over the city's customers of each customer's order count.
    pub average_order_count: f64,
}

/// Customers grouped by city, cities in order of first appearance.
///
/// Averages are taken per customer, not per order: a city with two customers
/// whose orders sum to 100 and 300 reports 200 regardless of how many orders
/// each placed.
pub fn city_profitability<D: DataSource>(source: &D) -> Vec<CityProfitability<'_>> {
    group_by_first_appearance(source.customers(), |c| c.city.as_str())
        .into_iter()
        .map(|(city, customers)| CityProfitability {
            city,
            customer_count: customers.len(),
            average_total: average(customers.iter().map(|c| c.turnover())).unwrap_or(0.0),
            average_order_count: average(customers.iter().map(|c| c.orders.len() as f64))
                .unwrap_or(0.0),
        })
        .collect()
}
