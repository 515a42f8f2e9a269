//! Customers paired with suppliers based in the same country and city.
//!
//! Two formulations are kept side by side: a hash join keyed on
//! (country, city) and a nested filter. Both emit one customer per matching
//! supplier, in customer order then supplier order, and must agree.

use std::collections::HashMap;

use crate::dataset::DataSource;
use crate::model::{Customer, Supplier};

/// (customer, supplier) pairs sharing exact country and city.
pub fn local_supplier_pairs<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = (&'a Customer, &'a Supplier)> + 'a {
    let mut index: HashMap<(&'a str, &'a str), Vec<&'a Supplier>> = HashMap::new();
    for supplier in source.suppliers() {
        index
            .entry((supplier.country.as_str(), supplier.city.as_str()))
            .or_default()
            .push(supplier);
    }

    source.customers().iter().flat_map(move |c| {
        index
            .get(&(c.country.as_str(), c.city.as_str()))
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(move |s| (c, s))
    })
}

/// Join formulation: one customer per co-located supplier.
pub fn customers_with_local_suppliers_join<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = &'a Customer> + 'a {
    local_supplier_pairs(source).map(|(c, _)| c)
}

/// Nested-filter formulation of [`customers_with_local_suppliers_join`].
pub fn customers_with_local_suppliers_nested<'a, D: DataSource>(
    source: &'a D,
) -> impl Iterator<Item = &'a Customer> + 'a {
    source.customers().iter().flat_map(move |c| {
        source
            .suppliers()
            .iter()
            .filter(move |s| s.country == c.country && s.city == c.city)
            .map(move |_| c)
    })
}
