//! Free-text product search.

use ekart_core::CatalogItem;

/// Items whose title, description or category contains `query`, ignoring
/// case. An empty query matches nothing; whitespace is matched literally.
#[must_use]
pub fn search<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| {
            [&item.title, &item.description, &item.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Human-readable result count, e.g. "1 result found".
#[must_use]
pub fn results_label(count: usize) -> String {
    if count == 1 {
        "1 result found".to_string()
    } else {
        format!("{count} results found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ekart_core::ProductId;
    use rust_decimal::Decimal;

    fn item(id: i64, title: &str, category: &str) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Decimal::ONE,
            category: category.to_string(),
            description: format!("About {title}"),
            image: String::new(),
            rating: None,
        }
    }

    #[test]
    fn test_matches_any_field_case_insensitively() {
        let items = vec![
            item(1, "Fjallraven Backpack", "men's clothing"),
            item(2, "Gold Ring", "jewelery"),
            item(3, "SSD", "electronics"),
        ];

        let ids = |query| {
            search(&items, query)
                .into_iter()
                .map(|i| i.id.as_i64())
                .collect::<Vec<_>>()
        };

        assert_eq!(ids("backpack"), vec![1]);
        assert_eq!(ids("JEWEL"), vec![2]);
        assert_eq!(ids("about"), vec![1, 2, 3]);
        assert!(ids("laptop").is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let items = vec![item(1, "Ring", "jewelery")];
        assert!(search(&items, "").is_empty());
    }

    #[test]
    fn test_whitespace_is_part_of_the_query() {
        let items = vec![item(1, "Gold Ring", "jewelery"), item(2, "Earring", "jewelery")];

        let hits: Vec<i64> = search(&items, " ring").iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(hits, vec![1]);
        assert_eq!(search(&items, "ring").len(), 2);
        assert!(search(&items, "ring  ").is_empty());
        assert!(search(&items, "   ").is_empty());
    }

    #[test]
    fn test_results_label() {
        assert_eq!(results_label(0), "0 results found");
        assert_eq!(results_label(1), "1 result found");
        assert_eq!(results_label(12), "12 results found");
    }
}
