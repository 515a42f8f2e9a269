//! Product sorting, stock grouping and price bands.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::helpers::group_by_first_appearance;
use crate::dataset::DataSource;
use crate::model::Product;

/// Upper bound (inclusive) of the cheap band.
pub const CHEAP_LIMIT: f64 = 10.0;
/// Upper bound (inclusive) of the medium band.
pub const MEDIUM_LIMIT: f64 = 20.0;

fn compare_products(a: &Product, b: &Product) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.in_stock().cmp(&b.in_stock()))
        .then_with(|| a.unit_price.total_cmp(&b.unit_price))
}

/// Products ordered by category, then out-of-stock before in-stock, then unit
/// price ascending.
pub fn products_sorted<D: DataSource>(source: &D) -> Vec<&Product> {
    let mut products: Vec<&Product> = source.products().iter().collect();
    products.sort_by(|a, b| compare_products(a, b));
    products
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockGroup<'a> {
    pub out_of_stock: bool,
    pub products: Vec<&'a Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub stock_groups: Vec<StockGroup<'a>>,
}

/// Products grouped by category, then by whether they are out of stock.
///
/// Categories and stock groups appear in the order their first product does;
/// products inside a stock group are ordered by unit price.
pub fn products_by_category_and_stock<D: DataSource>(source: &D) -> Vec<CategoryGroup<'_>> {
    group_by_first_appearance(source.products(), |p| p.category.as_str())
        .into_iter()
        .map(|(category, products)| CategoryGroup {
            category,
            stock_groups: group_by_first_appearance(products, |p| !p.in_stock())
                .into_iter()
                .map(|(out_of_stock, mut products)| {
                    products.sort_by(|a, b| a.unit_price.total_cmp(&b.unit_price));
                    StockGroup {
                        out_of_stock,
                        products,
                    }
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceBand {
    Cheap,
    Medium,
    Expensive,
}

impl PriceBand {
    /// Band of a unit price. Band bounds are inclusive on the upper side, so
    /// 10 is cheap and 20 is medium.
    pub fn classify(unit_price: f64) -> Self {
        if unit_price <= CHEAP_LIMIT {
            PriceBand::Cheap
        } else if unit_price <= MEDIUM_LIMIT {
            PriceBand::Medium
        } else {
            PriceBand::Expensive
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PriceBand::Cheap => "Cheap",
            PriceBand::Medium => "Medium",
            PriceBand::Expensive => "Expensive",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedProduct<'a> {
    pub product_id: u32,
    pub product_name: &'a str,
    pub band: PriceBand,
}

pub fn price_bands<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = PricedProduct<'a>> + 'a {
    source.products().iter().map(|p| PricedProduct {
        product_id: p.id,
        product_name: &p.name,
        band: PriceBand::classify(p.unit_price),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBandGroup<'a> {
    pub band: PriceBand,
    pub products: Vec<&'a Product>,
}

/// Products grouped by price band, bands in order of first appearance.
pub fn products_by_price_band<D: DataSource>(source: &D) -> Vec<PriceBandGroup<'_>> {
    group_by_first_appearance(source.products(), |p| PriceBand::classify(p.unit_price))
        .into_iter()
        .map(|(band, products)| PriceBandGroup { band, products })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use serde_json::json;

    fn create_test_dataset() -> Dataset {
        let doc = json!({
            "products": [
                {"id": 1, "name": "Chai", "category": "Beverages", "unit_price": 18.0, "units_in_stock": 39},
                {"id": 5, "name": "Gumbo Mix", "category": "Condiments", "unit_price": 21.35, "units_in_stock": 0},
                {"id": 3, "name": "Aniseed Syrup", "category": "Condiments", "unit_price": 10.0, "units_in_stock": 13},
                {"id": 24, "name": "Guaraná", "category": "Beverages", "unit_price": 4.5, "units_in_stock": 20},
                {"id": 8, "name": "Cranberry Sauce", "category": "Condiments", "unit_price": 40.0, "units_in_stock": 0},
                {"id": 49, "name": "Maxilaku", "category": "Confections", "unit_price": 20.0, "units_in_stock": 10},
                {"id": 4, "name": "Cajun Seasoning", "category": "Condiments", "unit_price": 22.0, "units_in_stock": 53}
            ]
        });
        Dataset::from_json(&doc.to_string()).unwrap()
    }

    #[test]
    fn test_products_sorted() {
        let ds = create_test_dataset();
        let ids: Vec<u32> = products_sorted(&ds).iter().map(|p| p.id).collect();
        // Beverages: 24, 1; Condiments out of stock: 5, 8, then in stock: 3, 4; Confections: 49
        assert_eq!(ids, vec![24, 1, 5, 8, 3, 4, 49]);
    }

    #[test]
    fn test_products_by_category_and_stock() {
        let ds = create_test_dataset();
        let groups = products_by_category_and_stock(&ds);

        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Beverages", "Condiments", "Confections"]);

        let condiments = &groups[1];
        assert_eq!(condiments.stock_groups.len(), 2);
        assert!(condiments.stock_groups[0].out_of_stock);
        let out: Vec<u32> = condiments.stock_groups[0].products.iter().map(|p| p.id).collect();
        assert_eq!(out, vec![5, 8]);
        assert!(!condiments.stock_groups[1].out_of_stock);
        let stocked: Vec<u32> = condiments.stock_groups[1].products.iter().map(|p| p.id).collect();
        assert_eq!(stocked, vec![3, 4]);

        let beverages: Vec<u32> = groups[0].stock_groups[0].products.iter().map(|p| p.id).collect();
        assert_eq!(beverages, vec![24, 1]);
    }

    #[test]
    fn test_price_band_boundaries() {
        assert_eq!(PriceBand::classify(0.0), PriceBand::Cheap);
        assert_eq!(PriceBand::classify(10.0), PriceBand::Cheap);
        assert_eq!(PriceBand::classify(10.01), PriceBand::Medium);
        assert_eq!(PriceBand::classify(20.0), PriceBand::Medium);
        assert_eq!(PriceBand::classify(20.01), PriceBand::Expensive);
        assert_eq!(PriceBand::Expensive.to_string(), "Expensive");
    }

    #[test]
    fn test_price_bands_flat() {
        let ds = create_test_dataset();
        let bands: Vec<(u32, PriceBand)> =
            price_bands(&ds).map(|p| (p.product_id, p.band)).collect();
        assert_eq!(
            bands,
            vec![
                (1, PriceBand::Medium),
                (5, PriceBand::Expensive),
                (3, PriceBand::Cheap),
                (24, PriceBand::Cheap),
                (8, PriceBand::Expensive),
                (49, PriceBand::Medium),
                (4, PriceBand::Expensive)
            ]
        );
    }

    #[test]
    fn test_products_by_price_band() {
        let ds = create_test_dataset();
        let groups = products_by_price_band(&ds);

        let bands: Vec<PriceBand> = groups.iter().map(|g| g.band).collect();
        assert_eq!(bands, vec![PriceBand::Medium, PriceBand::Expensive, PriceBand::Cheap]);

        let expensive: Vec<u32> = groups[1].products.iter().map(|p| p.id).collect();
        assert_eq!(expensive, vec![5, 8, 4]);
        assert_eq!(groups.iter().map(|g| g.products.len()).sum::<usize>(), 7);
    }
}
