//! Reporter for query results.
//!
//! Text output dumps each record as one line of `key=value` pairs, with a
//! header line per group and indented member lines for grouped results. JSON
//! output writes one JSON document per record or group (JSON lines).

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use northwind_core::{
    CategoryGroup, CityProfitability, Customer, FirstOrderDate, FirstOrderSummary,
    IncompleteContact, PeriodStatistic, PriceBandGroup, PricedProduct, Product, Supplier,
    TemporalStatistics,
};

use crate::error::{AppError, AppResult};
use crate::tasks::Task;

/// Width of the separator line between report sections.
const SEPARATOR_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Records that can be dumped as a line of `key=value` pairs.
pub trait Dump {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl<T: Dump + ?Sized> Dump for &T {
    fn fields(&self) -> Vec<(&'static str, String)> {
        (**self).fields()
    }
}

fn opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

impl Dump for Customer {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("company_name", self.company_name.clone()),
            ("address", opt(self.address.as_deref())),
            ("city", self.city.clone()),
            ("country", self.country.clone()),
            ("fax", opt(self.fax.as_deref())),
            ("turnover", money(self.turnover())),
            ("orders", self.orders.len().to_string()),
        ]
    }
}

impl Dump for FirstOrderDate<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("customer_id", self.customer_id.to_string()),
            ("year", opt(self.year)),
            ("month", opt(self.month)),
        ]
    }
}

impl Dump for FirstOrderSummary<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("customer_id", self.customer_id.to_string()),
            ("company_name", self.company_name.to_string()),
            ("total", money(self.total)),
            ("year", opt(self.year)),
            ("month", opt(self.month)),
        ]
    }
}

impl Dump for IncompleteContact<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let issues: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        vec![
            ("customer_id", self.customer_id.to_string()),
            ("postal_code", opt(self.postal_code)),
            ("region", opt(self.region)),
            ("phone", opt(self.phone)),
            ("issues", issues.join(", ")),
        ]
    }
}

impl Dump for Product {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("category", self.category.clone()),
            ("unit_price", money(self.unit_price)),
            ("units_in_stock", self.units_in_stock.to_string()),
        ]
    }
}

impl Dump for PricedProduct<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("product_id", self.product_id.to_string()),
            ("product_name", self.product_name.to_string()),
            ("price_band", self.band.to_string()),
        ]
    }
}

impl Dump for CityProfitability<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("city", self.city.to_string()),
            ("customers", self.customer_count.to_string()),
            ("average_total", money(self.average_total)),
            ("average_order_count", self.average_order_count.to_string()),
        ]
    }
}

/// A customer together with a supplier located in the same city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalSupplier<'a> {
    pub customer_id: &'a str,
    pub company_name: &'a str,
    pub country: &'a str,
    pub city: &'a str,
    pub supplier_id: u32,
    pub supplier_name: &'a str,
    pub supplier_address: Option<&'a str>,
}

impl<'a> From<(&'a Customer, &'a Supplier)> for LocalSupplier<'a> {
    fn from((customer, supplier): (&'a Customer, &'a Supplier)) -> Self {
        Self {
            customer_id: &customer.id,
            company_name: &customer.company_name,
            country: &customer.country,
            city: &customer.city,
            supplier_id: supplier.id,
            supplier_name: &supplier.name,
            supplier_address: supplier.address.as_deref(),
        }
    }
}

impl Dump for LocalSupplier<'_> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("customer_id", self.customer_id.to_string()),
            ("company_name", self.company_name.to_string()),
            ("country", self.country.to_string()),
            ("city", self.city.to_string()),
            ("supplier_id", self.supplier_id.to_string()),
            ("supplier_name", self.supplier_name.to_string()),
            ("supplier_address", opt(self.supplier_address)),
        ]
    }
}

/// Writes query results to an output stream.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Section heading for a task. Text output only.
    pub fn heading(&mut self, task: Task) -> AppResult<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
            writeln!(self.out, "{}: {}", task.title(), task.description())?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn json_line<T: Serialize + ?Sized>(&mut self, value: &T) -> AppResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Dump a flat sequence of records. Returns the number written.
    pub fn records<I, T>(&mut self, items: I) -> AppResult<usize>
    where
        I: IntoIterator<Item = T>,
        T: Dump + Serialize,
    {
        let mut count = 0;
        for item in items {
            match self.format {
                OutputFormat::Text => {
                    let line: Vec<String> = item
                        .fields()
                        .into_iter()
                        .map(|(k, v)| format!("{}={}", k, v))
                        .collect();
                    writeln!(self.out, "{}", line.join("  "))?;
                }
                OutputFormat::Json => self.json_line(&item)?,
            }
            count += 1;
        }
        Ok(count)
    }

    /// Products grouped by category and stock state. Returns the number of
    /// category groups written.
    pub fn category_groups(&mut self, groups: &[CategoryGroup<'_>]) -> AppResult<usize> {
        for group in groups {
            match self.format {
                OutputFormat::Text => {
                    writeln!(self.out, "Category: {}", group.category)?;
                    for stock_group in &group.stock_groups {
                        writeln!(self.out, "  Out of stock: {}", stock_group.out_of_stock)?;
                        for p in &stock_group.products {
                            writeln!(
                                self.out,
                                "    Product id: {}, price: {}",
                                p.id,
                                money(p.unit_price)
                            )?;
                        }
                    }
                    writeln!(self.out)?;
                }
                OutputFormat::Json => self.json_line(group)?,
            }
        }
        Ok(groups.len())
    }

    /// Products grouped by price band. Returns the number of groups written.
    pub fn price_band_groups(&mut self, groups: &[PriceBandGroup<'_>]) -> AppResult<usize> {
        for group in groups {
            match self.format {
                OutputFormat::Text => {
                    writeln!(self.out, "{} group:", group.band)?;
                    for p in &group.products {
                        writeln!(
                            self.out,
                            "  - Product id: {}, price: {}",
                            p.id,
                            money(p.unit_price)
                        )?;
                    }
                }
                OutputFormat::Json => self.json_line(group)?,
            }
        }
        Ok(groups.len())
    }

    fn statistic_section(&mut self, title: &str, section: &[PeriodStatistic]) -> AppResult<()> {
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        writeln!(self.out, "Statistic by {}.", title)?;
        for stat in section {
            writeln!(self.out)?;
            writeln!(self.out, "{}", stat.period)?;
            if stat.has_orders() {
                writeln!(
                    self.out,
                    "Average orders count by one customer: {}",
                    stat.average_orders
                )?;
            } else {
                writeln!(self.out, "There are no orders.")?;
            }
        }
        Ok(())
    }

    /// Order statistics by month, by year and by year and month. Returns the
    /// number of periods written.
    pub fn temporal_statistics(&mut self, stats: &TemporalStatistics) -> AppResult<usize> {
        let sections: [(&str, &[PeriodStatistic]); 3] = [
            ("months", &stats.by_month),
            ("years", &stats.by_year),
            ("years and months", &stats.by_year_and_month),
        ];

        let mut count = 0;
        for (title, section) in sections {
            match self.format {
                OutputFormat::Text => self.statistic_section(title, section)?,
                OutputFormat::Json => {
                    for stat in section {
                        self.json_line(stat)?;
                    }
                }
            }
            count += section.len();
        }
        Ok(count)
    }

    /// The list of runnable tasks.
    pub fn catalogue(&mut self, tasks: &[Task]) -> AppResult<()> {
        for task in tasks {
            match self.format {
                OutputFormat::Text => writeln!(
                    self.out,
                    "{:<8} {:<24} {}",
                    task.key(),
                    task.title(),
                    task.description()
                )?,
                OutputFormat::Json => self.json_line(&serde_json::json!({
                    "key": task.key(),
                    "title": task.title(),
                    "description": task.description(),
                }))?,
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> AppResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
