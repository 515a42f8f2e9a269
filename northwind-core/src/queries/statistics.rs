//! Order statistics per calendar period.
//!
//! A [`Statistic`] pairs a customer with the subset of its orders matching a
//! predicate. Averages are taken over every customer, so customers without a
//! matching order count as zero instead of being left out.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::helpers::average;
use crate::dataset::DataSource;
use crate::error::{QueryError, QueryResult};
use crate::model::{Customer, Order};

/// A customer and those of its orders that matched a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistic<'a> {
    pub customer: &'a Customer,
    pub orders: Vec<&'a Order>,
}

/// Pair every customer with its orders matching `predicate`.
///
/// # Errors
/// `QueryError::MissingPredicate` if no predicate is given.
pub fn statistics_by<'a, D, F>(
    source: &'a D,
    predicate: Option<F>,
) -> QueryResult<impl Iterator<Item = Statistic<'a>> + 'a>
where
    D: DataSource,
    F: Fn(&Order) -> bool + 'a,
{
    let predicate =
        predicate.ok_or_else(|| QueryError::MissingPredicate("order_predicate".to_string()))?;

    Ok(source.customers().iter().map(move |customer| Statistic {
        customer,
        orders: customer.orders.iter().filter(|o| predicate(*o)).collect(),
    }))
}

/// Mean number of matched orders per customer; 0 when there are no customers.
pub fn average_orders_per_customer<'a, I>(statistics: I) -> f64
where
    I: IntoIterator<Item = Statistic<'a>>,
{
    average(statistics.into_iter().map(|s| s.orders.len() as f64)).unwrap_or(0.0)
}

/// Distinct order years, ascending.
pub fn order_years<D: DataSource>(source: &D) -> Vec<i32> {
    source
        .orders()
        .map(|o| o.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Calendar period an order statistic is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    Month { month: u32 },
    Year { year: i32 },
    YearMonth { year: i32, month: u32 },
}

impl Period {
    pub fn matches(&self, order: &Order) -> bool {
        match *self {
            Period::Month { month } => order.month() == month,
            Period::Year { year } => order.year() == year,
            Period::YearMonth { year, month } => order.year() == year && order.month() == month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month { month } => write!(f, "Month: {}", month),
            Period::Year { year } => write!(f, "Year: {}", year),
            Period::YearMonth { year, month } => write!(f, "Year: {}, month: {}", year, month),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStatistic {
    pub period: Period,
    pub average_orders: f64,
}

impl PeriodStatistic {
    pub fn has_orders(&self) -> bool {
        self.average_orders > 0.0
    }
}

/// Average orders per customer within one period.
pub fn period_statistic<D: DataSource>(
    source: &D,
    period: Period,
) -> QueryResult<PeriodStatistic> {
    let statistics = statistics_by(source, Some(move |o: &Order| period.matches(o)))?;
    Ok(PeriodStatistic {
        period,
        average_orders: average_orders_per_customer(statistics),
    })
}

/// The three sections of the order statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalStatistics {
    /// Months 1 to 12, across all years.
    pub by_month: Vec<PeriodStatistic>,
    /// Each year that has at least one order, ascending.
    pub by_year: Vec<PeriodStatistic>,
    /// Every month of every year in `by_year`.
    pub by_year_and_month: Vec<PeriodStatistic>,
}

pub fn temporal_statistics<D: DataSource>(source: &D) -> QueryResult<TemporalStatistics> {
    let years = order_years(source);

    let by_month = (1..=12)
        .map(|month| period_statistic(source, Period::Month { month }))
        .collect::<QueryResult<Vec<_>>>()?;

    let by_year = years
        .iter()
        .map(|&year| period_statistic(source, Period::Year { year }))
        .collect::<QueryResult<Vec<_>>>()?;

    let mut by_year_and_month = Vec::with_capacity(years.len() * 12);
    for &year in &years {
        for month in 1..=12 {
            by_year_and_month.push(period_statistic(source, Period::YearMonth { year, month })?);
        }
    }

    Ok(TemporalStatistics {
        by_month,
        by_year,
        by_year_and_month,
    })
}
