//! In-memory catalog store.
//!
//! Populated once at start-up from a JSON fixture and never mutated; shared
//! behind an `Arc` by every request.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::{CatalogError, Product, Result};

const EMBEDDED_FIXTURE: &str = include_str!("../data/catalog.json");

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting records that break product invariants.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            validate(product)?;
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::InvalidFixture(format!("duplicate product id `{}`", product.id)));
            }
        }
        Ok(Self { products, index })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The course fixture compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_FIXTURE)
    }

    /// Loads from `path` when given, else the embedded fixture.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json(&std::fs::read_to_string(path)?),
            None => Self::embedded(),
        }
    }

    pub fn products(&self) -> &[Product] { &self.products }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolves ids in the order given. Unknown ids are dropped.
    pub fn resolve<I>(&self, ids: I) -> Vec<&Product>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ids.into_iter().filter_map(|id| self.get(id.as_ref())).collect()
    }

    /// Resolves a set of ids, returning matches in catalog order.
    pub fn resolve_in_catalog_order<I>(&self, ids: I) -> Vec<&Product>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let wanted: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
        self.products.iter().filter(|p| wanted.contains(&p.id)).collect()
    }

    /// Other products in the same category, best rated first.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        let mut related: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.id != product.id && p.category.eq_ignore_ascii_case(&product.category))
            .collect();
        related.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        related.truncate(limit);
        related
    }
}

fn validate(product: &Product) -> Result<()> {
    let invalid = |reason: String| Err(CatalogError::InvalidFixture(reason));
    if product.id.trim().is_empty() {
        return invalid("product with empty id".into());
    }
    if !(0.0..=5.0).contains(&product.rating) {
        return invalid(format!("product `{}` rating {} outside 0..=5", product.id, product.rating));
    }
    if let Some(original) = product.original_price {
        if original < product.price {
            return invalid(format!("product `{}` originalPrice {} below price {}", product.id, original, product.price));
        }
    }
    if let Some(review) = product.reviews.iter().flatten().find(|r| r.rating > 5) {
        return invalid(format!("review `{}` on product `{}` rated {}", review.id, product.id, review.rating));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;

    #[test]
    fn test_embedded_fixture_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 30);
        assert!(catalog.get("1").is_some());
        assert!(catalog.products().iter().all(|p| p.original_price.map_or(true, |o| o >= p.price)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::new(vec![product("1", 100), product("1", 200)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFixture(_)));
    }

    #[test]
    fn test_invariants_rejected() {
        let mut cheap_original = product("1", 500);
        cheap_original.original_price = Some(400);
        assert!(Catalog::new(vec![cheap_original]).is_err());

        let mut overrated = product("2", 500);
        overrated.rating = 5.5;
        assert!(Catalog::new(vec![overrated]).is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Catalog::from_json("{not json"), Err(CatalogError::Serialization(_))));
    }

    #[test]
    fn test_resolve_drops_dangling_ids() {
        let catalog = Catalog::new(vec![product("a", 1), product("b", 2), product("c", 3)]).unwrap();
        let ids: Vec<&str> = catalog.resolve(["c", "zzz", "a"]).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
        let ids: Vec<&str> = catalog.resolve_in_catalog_order(["c", "zzz", "a"]).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_related_same_category_by_rating() {
        let mut a = product("a", 1);
        let mut b = product("b", 2);
        let mut c = product("c", 3);
        let mut d = product("d", 4);
        b.rating = 4.9;
        c.rating = 3.0;
        d.category = "Grammar".into();
        a.rating = 4.5;
        let catalog = Catalog::new(vec![a, b, c, d]).unwrap();
        let anchor = catalog.get("a").unwrap();
        let related: Vec<&str> = catalog.related(anchor, 4).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(related, ["b", "c"]);
    }
}
