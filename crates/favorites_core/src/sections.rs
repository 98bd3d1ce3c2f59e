use shared::domain::{FavoriteItem, FavoriteSection, CATEGORIES};

/// Folds per-category collections (index-aligned with `CATEGORIES`) into the
/// published section list. Empty categories are skipped entirely; item order
/// is kept exactly as the repository returned it. Pure compute, cannot fail.
pub(crate) fn build_sections(collections: Vec<Vec<FavoriteItem>>) -> Vec<FavoriteSection> {
    CATEGORIES
        .iter()
        .zip(collections)
        .filter(|(_, items)| !items.is_empty())
        .map(|(category, items)| FavoriteSection {
            section: category.section,
            label: category.label,
            items,
        })
        .collect()
}
