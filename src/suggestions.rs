//! Suggestions derived from what a user viewed and favorited.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::query::pagination::{paginate, Page, PageRequest};
use crate::Product;

/// Default number of suggestions kept before pagination.
pub const DEFAULT_CAP: usize = 6;

/// Products sharing a category or a tag with anything in `viewed ∪ favorites`,
/// excluding those products themselves, best rated first and capped.
/// Unknown ids contribute nothing.
pub fn suggest<'a, S: AsRef<str>>(catalog: &'a Catalog, viewed: &[S], favorites: &[S], cap: usize) -> Vec<&'a Product> {
    let seen: HashSet<&str> = viewed.iter().chain(favorites).map(AsRef::as_ref).collect();

    let mut categories = HashSet::new();
    let mut tags = HashSet::new();
    for product in seen.iter().filter_map(|id| catalog.get(id)) {
        categories.insert(product.category.to_lowercase());
        tags.extend(product.tags.iter().map(|t| t.to_lowercase()));
    }
    if categories.is_empty() {
        return vec![];
    }

    let mut suggestions: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|p| !seen.contains(p.id.as_str()))
        .filter(|p| categories.contains(&p.category.to_lowercase()) || p.tags.iter().any(|t| tags.contains(&t.to_lowercase())))
        .collect();
    suggestions.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    suggestions.truncate(cap);
    suggestions
}

/// [`suggest`] followed by the shared pagination.
pub fn suggest_page<'a, S: AsRef<str>>(
    catalog: &'a Catalog,
    viewed: &[S],
    favorites: &[S],
    cap: usize,
    page: PageRequest,
) -> Page<&'a Product> {
    paginate(suggest(catalog, viewed, favorites, cap), page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;

    fn catalog() -> Catalog {
        let mut products = vec![];
        for (id, category, tag, rating) in [
            ("1", "IELTS", "Speaking", 4.0),
            ("2", "IELTS", "Writing", 4.5),
            ("3", "Business", "Speaking", 4.8),
            ("4", "Business", "Email", 4.9),
            ("5", "Grammar", "Basics", 3.0),
            ("6", "IELTS", "Listening", 4.5),
        ] {
            let mut p = product(id, 100);
            p.category = category.into();
            p.tags = vec![tag.into()];
            p.rating = rating;
            products.push(p);
        }
        Catalog::new(products).unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_inputs_give_nothing() {
        let catalog = catalog();
        let none: [&str; 0] = [];
        assert!(suggest(&catalog, &none, &none, DEFAULT_CAP).is_empty());
    }

    #[test]
    fn test_category_or_tag_match_ranked_by_rating() {
        let catalog = catalog();
        let suggestions = suggest(&catalog, &["1"], &[], DEFAULT_CAP);
        // 2 and 6 share the category and tie on rating, so catalog order holds.
        assert_eq!(ids(&suggestions), ["3", "2", "6"]);
    }

    #[test]
    fn test_excludes_viewed_and_favorites() {
        let catalog = catalog();
        let suggestions = suggest(&catalog, &["1"], &["3"], DEFAULT_CAP);
        assert_eq!(ids(&suggestions), ["4", "2", "6"]);
    }

    #[test]
    fn test_unknown_ids_ignored_and_cap_applies() {
        let catalog = catalog();
        let suggestions = suggest(&catalog, &["404", "1"], &["4"], 2);
        assert_eq!(ids(&suggestions), ["3", "2"]);
        let none = suggest(&catalog, &["404"], &[], DEFAULT_CAP);
        assert!(none.is_empty());
    }

    #[test]
    fn test_suggest_page() {
        let catalog = catalog();
        let page = suggest_page(&catalog, &["1"], &[], DEFAULT_CAP, PageRequest::new(2, 2));
        assert_eq!(ids(&page.items), ["6"]);
        assert_eq!(page.pagination.total_items, 3);
        assert!(!page.pagination.has_next_page);
    }
}
