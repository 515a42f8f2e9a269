//! Dataset loading.
//!
//! The Northwind sample data is compiled into the binary; a JSON file with the
//! same layout can replace it.

use std::path::Path;

use northwind_core::{DataSource, Dataset};

use crate::error::AppResult;

/// The bundled Northwind sample dataset, as JSON.
pub const EMBEDDED_DATASET: &str = include_str!("../data/northwind.json");

/// Parse the bundled dataset.
pub fn embedded_dataset() -> AppResult<Dataset> {
    Ok(Dataset::from_json(EMBEDDED_DATASET)?)
}

/// Load the dataset from `path`, or the embedded one when no path is given.
pub fn load_dataset(path: Option<&Path>) -> AppResult<Dataset> {
    let dataset = match path {
        Some(path) => {
            tracing::info!("Loading dataset from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            Dataset::from_json(&content)?
        }
        None => {
            tracing::info!("Loading embedded dataset");
            embedded_dataset()?
        }
    };

    tracing::info!(
        customers = dataset.customers().len(),
        orders = dataset.order_count(),
        suppliers = dataset.suppliers().len(),
        products = dataset.products().len(),
        "Dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_dataset_parses() {
        let ds = embedded_dataset().unwrap();
        assert_eq!(ds.customers().len(), 16);
        assert_eq!(ds.suppliers().len(), 12);
        assert_eq!(ds.products().len(), 20);
        assert_eq!(ds.order_count(), 40);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"products": [
                {"id": 1, "name": "Chai", "category": "Beverages",
                 "unit_price": 18.0, "units_in_stock": 39}
            ]}"#,
        )
        .unwrap();

        let ds = load_dataset(Some(&path)).unwrap();
        assert!(ds.customers().is_empty());
        assert_eq!(ds.products().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
