//! Query catalogue.
//!
//! Every query is a pure function of a [`DataSource`](crate::DataSource) and
//! its parameters. Argument checks run before any record is read. Filters and
//! projections return lazy iterators borrowing the source; sorts and groupings
//! return materialized vectors.

mod cities;
mod customers;
mod helpers;
mod products;
mod statistics;
mod suppliers;

pub use cities::{city_profitability, CityProfitability};
pub use customers::{
    compare_first_order_summaries, contact_issues, customers_by_large_order,
    customers_by_turnover, customers_with_incomplete_contacts, first_order_dates,
    first_order_summary, ContactIssue, FirstOrderDate, FirstOrderSummary, IncompleteContact,
};
pub use helpers::{
    average, ensure_threshold, group_by_first_appearance, LARGE_ORDER_THRESHOLD, TURNOVER_THRESHOLD,
};
pub use products::{
    price_bands, products_by_category_and_stock, products_by_price_band, products_sorted,
    CategoryGroup, PriceBand, PriceBandGroup, PricedProduct, StockGroup,
};
pub use statistics::{
    average_orders_per_customer, order_years, period_statistic, statistics_by,
    temporal_statistics, Period, PeriodStatistic, Statistic, TemporalStatistics,
};
pub use suppliers::{
    customers_with_local_suppliers_join, customers_with_local_suppliers_nested,
    local_supplier_pairs,
};
