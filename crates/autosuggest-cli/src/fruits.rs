// Built-in suggestion catalog served when no --url is given

use autosuggest_core::SuggestionItem;

const FRUITS: &[(u64, &str, &str)] = &[
    (6, "Apple", "Rosaceae"),
    (35, "Apricot", "Rosaceae"),
    (84, "Avocado", "Lauraceae"),
    (1, "Banana", "Musaceae"),
    (33, "Blackberry", "Rosaceae"),
    (64, "Blueberry", "Ericaceae"),
    (9, "Cherry", "Rosaceae"),
    (72, "Durian", "Malvaceae"),
    (76, "Dragonfruit", "Cactaceae"),
    (68, "Fig", "Moraceae"),
    (69, "Gooseberry", "Grossulariaceae"),
    (87, "Grape", "Vitaceae"),
    (86, "Guava", "Myrtaceae"),
    (66, "Kiwi", "Actinidiaceae"),
    (26, "Lemon", "Rutaceae"),
    (44, "Lime", "Rutaceae"),
    (67, "Lychee", "Sapindaceae"),
    (27, "Mango", "Anacardiaceae"),
    (41, "Melon", "Cucurbitaceae"),
    (2, "Orange", "Rutaceae"),
    (42, "Papaya", "Caricaceae"),
    (70, "Passionfruit", "Passifloraceae"),
    (37, "Peach", "Rosaceae"),
    (4, "Pear", "Rosaceae"),
    (52, "Persimmon", "Ebenaceae"),
    (10, "Pineapple", "Bromeliaceae"),
    (71, "Plum", "Rosaceae"),
    (79, "Pomegranate", "Lythraceae"),
    (23, "Raspberry", "Rosaceae"),
    (3, "Strawberry", "Rosaceae"),
    (77, "Tomato", "Solanaceae"),
    (25, "Watermelon", "Cucurbitaceae"),
];

/// The built-in fruit records, each carrying its botanical family
pub fn catalog() -> Vec<SuggestionItem> {
    FRUITS
        .iter()
        .map(|(id, name, family)| SuggestionItem::new(*id, *name).with_attribute("family", *family))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosuggest_core::filter_and_rank;

    #[test]
    fn test_catalog_has_family() {
        let catalog = catalog();
        assert_eq!(catalog.len(), FRUITS.len());
        assert!(catalog.iter().all(|item| item.attribute("family").is_some()));
    }

    #[test]
    fn test_catalog_prefix_search() {
        let names: Vec<String> = filter_and_rank(catalog(), "p", 5)
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Papaya", "Passionfruit", "Peach", "Pear", "Persimmon"]);
    }
}
