//! Product catalog with filter/sort queries over a seeded list.

use models::product::Product;

use crate::query::{self, Catalog, Criteria};

impl Catalog for Product {
    fn text(&self) -> &str {
        &self.name
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn price(&self) -> f64 {
        self.price
    }
}

pub struct ProductService {
    catalog: Vec<Product>,
}

impl ProductService {
    pub fn new(catalog: Vec<Product>) -> Self {
        Self { catalog }
    }

    pub fn seeded() -> Self {
        let p = |id, name: &str, category: &str, price| Product {
            id,
            name: name.into(),
            category: category.into(),
            price,
        };
        Self::new(vec![
            p(1, "Smartphone Alpha", "Electronics", 550.0),
            p(2, "ProBook Laptop", "Electronics", 1200.0),
            p(3, "SoundWave Wireless Earbuds", "Electronics", 150.0),
            p(4, "Code T-Shirt", "Clothing", 25.0),
            p(5, "Classic Jeans", "Clothing", 75.0),
            p(6, "Design Patterns", "Books", 40.0),
            p(7, "Clean Code", "Books", 35.0),
            p(8, "Chronos Smartwatch", "Electronics", 300.0),
            p(9, "Logo Hoodie", "Clothing", 60.0),
        ])
    }

    pub fn filter(&self, criteria: &Criteria) -> Vec<Product> {
        query::apply(self.catalog.clone(), criteria)
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self.catalog.iter().map(|p| p.category.clone()).collect();
        cats.sort();
        cats.dedup();
        cats
    }
}
