//! Task catalogue
//!
//! Each task names one query of `northwind_core::queries` and the way its
//! result is handed to the [`Reporter`].

use std::io::Write;
use std::str::FromStr;

use northwind_core::{queries, Dataset};

use crate::config::{DEFAULT_LARGE_ORDER_THRESHOLD, DEFAULT_TURNOVER_THRESHOLD};
use crate::error::{AppError, AppResult};
use crate::report::{LocalSupplier, Reporter};

/// Parameters of the threshold queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskParams {
    pub turnover_threshold: f64,
    pub large_order_threshold: f64,
}

impl TaskParams {
    /// Reject negative or NaN thresholds, whichever task will use them.
    pub fn validate(&self) -> AppResult<()> {
        queries::ensure_threshold(queries::TURNOVER_THRESHOLD, self.turnover_threshold)?;
        queries::ensure_threshold(queries::LARGE_ORDER_THRESHOLD, self.large_order_threshold)?;
        Ok(())
    }
}

impl Default for TaskParams {
    fn default() -> Self {
        Self {
            turnover_threshold: DEFAULT_TURNOVER_THRESHOLD,
            large_order_threshold: DEFAULT_LARGE_ORDER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Turnover,
    LocalSuppliers,
    LocalSuppliersNested,
    LargeOrders,
    FirstOrderDates,
    FirstOrderSummary,
    IncompleteContacts,
    ProductsSorted,
    ProductsGrouped,
    PriceBands,
    PriceBandGroups,
    CityProfitability,
    TemporalStatistics,
}

impl Task {
    /// Every task, in catalogue order.
    pub const ALL: [Task; 13] = [
        Task::Turnover,
        Task::LocalSuppliers,
        Task::LocalSuppliersNested,
        Task::LargeOrders,
        Task::FirstOrderDates,
        Task::FirstOrderSummary,
        Task::IncompleteContacts,
        Task::ProductsSorted,
        Task::ProductsGrouped,
        Task::PriceBands,
        Task::PriceBandGroups,
        Task::CityProfitability,
        Task::TemporalStatistics,
    ];

    /// Name used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Task::Turnover => "1",
            Task::LocalSuppliers => "2",
            Task::LocalSuppliersNested => "2-alt",
            Task::LargeOrders => "3",
            Task::FirstOrderDates => "4",
            Task::FirstOrderSummary => "5",
            Task::IncompleteContacts => "6",
            Task::ProductsSorted => "7-sort",
            Task::ProductsGrouped => "7-group",
            Task::PriceBands => "8-sort",
            Task::PriceBandGroups => "8-group",
            Task::CityProfitability => "9",
            Task::TemporalStatistics => "10",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Task::Turnover => "Task 1",
            Task::LocalSuppliers => "Task 2",
            Task::LocalSuppliersNested => "Task 2 (nested)",
            Task::LargeOrders => "Task 3",
            Task::FirstOrderDates => "Task 4",
            Task::FirstOrderSummary => "Task 5",
            Task::IncompleteContacts => "Task 6",
            Task::ProductsSorted => "Task 7 (sorting)",
            Task::ProductsGrouped => "Task 7 (grouping)",
            Task::PriceBands => "Task 8 (labels)",
            Task::PriceBandGroups => "Task 8 (grouping)",
            Task::CityProfitability => "Task 9",
            Task::TemporalStatistics => "Task 10",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Task::Turnover => "Customers whose total order amount exceeds the turnover threshold",
            Task::LocalSuppliers => "Customers with a supplier in the same country and city (join)",
            Task::LocalSuppliersNested => {
                "Customers with a supplier in the same country and city (nested filter)"
            }
            Task::LargeOrders => "Customers with an order above the large-order threshold",
            Task::FirstOrderDates => "Year and month of each customer's first order",
            Task::FirstOrderSummary => {
                "First order date with turnover, sorted by year, month, turnover and name"
            }
            Task::IncompleteContacts => {
                "Customers with a non-digit or missing postal code, no region or no phone area code"
            }
            Task::ProductsSorted => "Products sorted by category, stock availability and price",
            Task::ProductsGrouped => "Products grouped by category, then by stock availability",
            Task::PriceBands => "Products labelled cheap, medium or expensive",
            Task::PriceBandGroups => "Products grouped into cheap, medium and expensive",
            Task::CityProfitability => "Average turnover and order count of customers per city",
            Task::TemporalStatistics => {
                "Average order count per customer by month, by year and by year and month"
            }
        }
    }
}

impl FromStr for Task {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Task::ALL
            .iter()
            .copied()
            .find(|task| task.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| AppError::UnknownTask(s.to_string()))
    }
}

/// Run one task against `dataset`, writing its result to `reporter`.
///
/// Returns the number of records (or groups) written.
pub fn run_task<W: Write>(
    task: Task,
    dataset: &Dataset,
    params: &TaskParams,
    reporter: &mut Reporter<W>,
) -> AppResult<usize> {
    tracing::info!("Running {} ({})", task.title(), task.key());

    let written = match task {
        Task::Turnover => reporter.records(queries::customers_by_turnover(
            dataset,
            params.turnover_threshold,
        )?)?,
        Task::LocalSuppliers => reporter.records(
            queries::local_supplier_pairs(dataset).map(LocalSupplier::from),
        )?,
        Task::LocalSuppliersNested => {
            reporter.records(queries::customers_with_local_suppliers_nested(dataset))?
        }
        Task::LargeOrders => reporter.records(queries::customers_by_large_order(
            dataset,
            params.large_order_threshold,
        )?)?,
        Task::FirstOrderDates => reporter.records(queries::first_order_dates(dataset))?,
        Task::FirstOrderSummary => reporter.records(queries::first_order_summary(dataset))?,
        Task::IncompleteContacts => {
            reporter.records(queries::customers_with_incomplete_contacts(dataset))?
        }
        Task::ProductsSorted => reporter.records(queries::products_sorted(dataset))?,
        Task::ProductsGrouped => {
            reporter.category_groups(&queries::products_by_category_and_stock(dataset))?
        }
        Task::PriceBands => reporter.records(queries::price_bands(dataset))?,
        Task::PriceBandGroups => {
            reporter.price_band_groups(&queries::products_by_price_band(dataset))?
        }
        Task::CityProfitability => reporter.records(queries::city_profitability(dataset))?,
        Task::TemporalStatistics => {
            reporter.temporal_statistics(&queries::temporal_statistics(dataset)?)?
        }
    };

    tracing::debug!(task = task.key(), written, "Task finished");
    Ok(written)
}

/// Run every task in catalogue order, each under its own heading.
///
/// Thresholds are validated before the first task runs, so invalid arguments
/// produce no output at all. Otherwise stops at the first failing task.
pub fn run_all<W: Write>(
    dataset: &Dataset,
    params: &TaskParams,
    reporter: &mut Reporter<W>,
) -> AppResult<usize> {
    params.validate()?;

    let mut total = 0;
    for task in Task::ALL {
        reporter.heading(task)?;
        total += run_task(task, dataset, params, reporter)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::OutputFormat;
    use std::collections::HashSet;

    #[test]
    fn test_task_keys_unique_and_parseable() {
        let keys: HashSet<&str> = Task::ALL.iter().map(|t| t.key()).collect();
        assert_eq!(keys.len(), Task::ALL.len());

        for task in Task::ALL {
            assert_eq!(task.key().parse::<Task>().unwrap(), task);
        }
        assert_eq!("7-SORT".parse::<Task>().unwrap(), Task::ProductsSorted);
    }

    #[test]
    fn test_unknown_task() {
        let err = "11".parse::<Task>().unwrap_err();
        assert!(matches!(err, AppError::UnknownTask(ref key) if key == "11"));
    }

    #[test]
    fn test_negative_threshold_writes_nothing() {
        let dataset = crate::data::embedded_dataset().unwrap();
        let params = TaskParams {
            turnover_threshold: -1.0,
            ..TaskParams::default()
        };
        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Text);

        let err = run_task(Task::Turnover, &dataset, &params, &mut reporter).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(reporter.into_inner().is_empty());
    }

    #[test]
    fn test_run_all_rejects_bad_threshold_before_output() {
        let dataset = crate::data::embedded_dataset().unwrap();
        let params = TaskParams {
            large_order_threshold: -1.0,
            ..TaskParams::default()
        };
        let mut reporter = Reporter::new(Vec::new(), OutputFormat::Text);

        let err = run_all(&dataset, &params, &mut reporter).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("large order threshold"));
        assert!(reporter.into_inner().is_empty());
    }

    #[test]
    fn test_validate_params() {
        assert!(TaskParams::default().validate().is_ok());

        let params = TaskParams {
            turnover_threshold: f64::NAN,
            ..TaskParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("turnover threshold"));
    }
}
