//! Common test utilities for the query task tests
//!
//! Provides shared helper functions for:
//! - Building small fixture datasets from `json!` documents
//! - Running a task into an in-memory reporter

#![allow(dead_code)]

use northwind_core::Dataset;
use northwind_queries::{run_task, AppResult, OutputFormat, Reporter, Task, TaskParams};
use serde_json::{json, Value};

pub fn dataset_from(doc: Value) -> Dataset {
    Dataset::from_json(&doc.to_string()).expect("Failed to build fixture dataset")
}

pub fn order(id: u32, date: &str, total: f64) -> Value {
    json!({"id": id, "order_date": format!("{}T00:00:00", date), "total": total})
}

/// Three customers in two cities, two suppliers and a handful of products.
pub fn create_fixture_dataset() -> Dataset {
    dataset_from(json!({
        "customers": [
            {
                "id": "ALFKI", "company_name": "Alfreds Futterkiste",
                "address": "Obere Str. 57", "city": "Berlin", "country": "Germany", "postal_code": "12209",
                "region": "Berlin", "phone": "(030) 0074321",
                "orders": [order(1, "1997-08-25", 60.0), order(2, "1997-10-03", 50.0)]
            },
            {
                "id": "BONAP", "company_name": "Bon app'",
                "city": "Marseille", "country": "France", "postal_code": "13008",
                "phone": "91.24.45.40", "fax": "91.24.45.41",
                "orders": [order(3, "1996-10-16", 12000.0)]
            },
            {
                "id": "FISSA", "company_name": "FISSA Fabrica",
                "city": "Berlin", "country": "Germany", "postal_code": "28034",
                "region": "Berlin", "phone": "(91) 555 94 44"
            }
        ],
        "suppliers": [
            {
                "id": 11, "name": "Heli Süßwaren", "address": "Tiergartenstraße 5",
                "city": "Berlin", "country": "Germany"
            },
            {"id": 12, "name": "Plutzer", "city": "Frankfurt", "country": "Germany"}
        ],
        "products": [
            {"id": 1, "name": "Chai", "category": "Beverages", "unit_price": 18.0, "units_in_stock": 39},
            {"id": 3, "name": "Aniseed Syrup", "category": "Condiments", "unit_price": 10.0, "units_in_stock": 13},
            {"id": 5, "name": "Chef Anton's Gumbo Mix", "category": "Condiments", "unit_price": 21.35, "units_in_stock": 0},
            {"id": 24, "name": "Guaraná Fantástica", "category": "Beverages", "unit_price": 4.5, "units_in_stock": 20}
        ]
    }))
}

pub fn run_to_string(
    task: Task,
    dataset: &Dataset,
    params: &TaskParams,
    format: OutputFormat,
) -> AppResult<String> {
    let mut reporter = Reporter::new(Vec::new(), format);
    run_task(task, dataset, params, &mut reporter)?;
    Ok(String::from_utf8(reporter.into_inner()).expect("report output is UTF-8"))
}

pub fn run_text(task: Task, dataset: &Dataset) -> String {
    run_to_string(task, dataset, &TaskParams::default(), OutputFormat::Text)
        .expect("Task failed")
}

pub fn run_json(task: Task, dataset: &Dataset) -> Vec<Value> {
    run_to_string(task, dataset, &TaskParams::default(), OutputFormat::Json)
        .expect("Task failed")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}
