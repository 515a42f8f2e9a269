//! Customer-centric queries: turnover and large-order filters, first-order
//! summaries and the contact data check.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::helpers::{ensure_threshold, LARGE_ORDER_THRESHOLD, TURNOVER_THRESHOLD};
use crate::dataset::DataSource;
use crate::error::QueryResult;
use crate::model::Customer;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("static regex"));
static NO_AREA_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^(]").expect("static regex"));

/// Customers whose summed order totals strictly exceed `threshold`.
///
/// # Errors
/// `QueryError::InvalidArgument` if `threshold` is negative.
pub fn customers_by_turnover<'a, D: DataSource>(
    source: &'a D,
    threshold: f64,
) -> QueryResult<impl Iterator<Item = &'a Customer> + 'a> {
    ensure_threshold(TURNOVER_THRESHOLD, threshold)?;

    Ok(source
        .customers()
        .iter()
        .filter(move |c| c.turnover() > threshold))
}

/// Customers with at least one order whose total exceeds `threshold`.
///
/// Customers are deduplicated by identifier; the first record with a given id
/// wins.
///
/// # Errors
/// `QueryError::InvalidArgument` if `threshold` is negative.
pub fn customers_by_large_order<'a, D: DataSource>(
    source: &'a D,
    threshold: f64,
) -> QueryResult<impl Iterator<Item = &'a Customer> + 'a> {
    ensure_threshold(LARGE_ORDER_THRESHOLD, threshold)?;

    let mut seen: HashSet<&'a str> = HashSet::new();
    Ok(source
        .customers()
        .iter()
        .filter(move |c| c.orders.iter().any(|o| o.total > threshold))
        .filter(move |c| seen.insert(c.id.as_str())))
}

/// Year and month of a customer's first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstOrderDate<'a> {
    pub customer_id: &'a str,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub fn first_order_dates<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = FirstOrderDate<'a>> + 'a {
    source.customers().iter().map(|c| {
        let first = c.first_order_date();
        FirstOrderDate {
            customer_id: &c.id,
            year: first.map(|d| d.year()),
            month: first.map(|d| d.month()),
        }
    })
}

/// First-order date extended with turnover and company name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstOrderSummary<'a> {
    pub customer_id: &'a str,
    pub company_name: &'a str,
    pub total: f64,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Ordering used by [`first_order_summary`]: year ascending, month ascending,
/// total descending, company name ascending. Customers without orders have no
/// year or month and sort before everyone else.
pub fn compare_first_order_summaries(
    a: &FirstOrderSummary<'_>,
    b: &FirstOrderSummary<'_>,
) -> Ordering {
    a.year
        .cmp(&b.year)
        .then_with(|| a.month.cmp(&b.month))
        .then_with(|| b.total.total_cmp(&a.total))
        .then_with(|| a.company_name.cmp(b.company_name))
}

pub fn first_order_summary<D: DataSource>(source: &D) -> Vec<FirstOrderSummary<'_>> {
    let mut rows: Vec<FirstOrderSummary<'_>> = first_order_dates(source)
        .zip(source.customers())
        .map(|(first, c)| FirstOrderSummary {
            customer_id: first.customer_id,
            company_name: &c.company_name,
            total: c.turnover(),
            year: first.year,
            month: first.month,
        })
        .collect();

    rows.sort_by(compare_first_order_summaries);
    rows
}

/// Reason a customer's contact details were flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactIssue {
    PostalCodeMissing,
    PostalCodeNotNumeric,
    RegionMissing,
    PhoneMissing,
    PhoneWithoutAreaCode,
}

impl std::fmt::Display for ContactIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ContactIssue::PostalCodeMissing => "postal code missing",
            ContactIssue::PostalCodeNotNumeric => "postal code not numeric",
            ContactIssue::RegionMissing => "region missing",
            ContactIssue::PhoneMissing => "phone missing",
            ContactIssue::PhoneWithoutAreaCode => "phone without area code",
        };
        f.write_str(text)
    }
}

/// Every contact issue of a customer; empty when the record is complete.
///
/// A postal code is flagged when it holds any non-digit character, a region
/// when it is absent or empty, and a phone number when it does not start
/// with an opening parenthesis. Empty postal codes and phone numbers pass.
pub fn contact_issues(customer: &Customer) -> Vec<ContactIssue> {
    let mut issues = Vec::new();

    match customer.postal_code.as_deref() {
        None => issues.push(ContactIssue::PostalCodeMissing),
        Some(code) if NON_DIGIT.is_match(code) => issues.push(ContactIssue::PostalCodeNotNumeric),
        Some(_) => {}
    }

    if customer.region.as_deref().map_or(true, str::is_empty) {
        issues.push(ContactIssue::RegionMissing);
    }

    match customer.phone.as_deref() {
        None => issues.push(ContactIssue::PhoneMissing),
        Some(phone) if NO_AREA_CODE.is_match(phone) => {
            issues.push(ContactIssue::PhoneWithoutAreaCode)
        }
        Some(_) => {}
    }

    issues
}

/// A customer flagged by the contact data check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteContact<'a> {
    pub customer_id: &'a str,
    pub postal_code: Option<&'a str>,
    pub region: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub issues: Vec<ContactIssue>,
}

/// Customers with at least one contact issue.
pub fn customers_with_incomplete_contacts<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = IncompleteContact<'a>> + 'a {
    source.customers().iter().filter_map(|c| {
        let issues = contact_issues(c);
        if issues.is_empty() {
            return None;
        }
        Some(IncompleteContact {
            customer_id: &c.id,
            postal_code: c.postal_code.as_deref(),
            region: c.region.as_deref(),
            phone: c.phone.as_deref(),
            issues,
        })
    })
}
