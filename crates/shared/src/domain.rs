use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Kind tag passed to the repository when fetching favorited items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteKind {
    Movie,
    Series,
    Episode,
}

/// Type tag carried by a published section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Movies,
    Shows,
    Episodes,
}

/// Opaque label identifier; the localization layer resolves it to a display
/// string at render time. Never resolved by the aggregation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelId {
    MoviesLabel,
    ShowsLabel,
    EpisodesLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: ItemId,
    pub name: String,
    pub kind: FavoriteKind,
    pub played: bool,
    pub premiere_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub kind: FavoriteKind,
    /// Per-category fetch cap; `None` is unbounded.
    pub limit: Option<u32>,
    pub section: SectionKind,
    pub label: LabelId,
}

/// The fixed set of aggregated categories. The order here is both the fetch
/// order and the order sections appear in the published result.
pub const CATEGORIES: [Category; 3] = [
    Category {
        kind: FavoriteKind::Movie,
        limit: None,
        section: SectionKind::Movies,
        label: LabelId::MoviesLabel,
    },
    Category {
        kind: FavoriteKind::Series,
        limit: Some(20),
        section: SectionKind::Shows,
        label: LabelId::ShowsLabel,
    },
    Category {
        kind: FavoriteKind::Episode,
        limit: Some(20),
        section: SectionKind::Episodes,
        label: LabelId::EpisodesLabel,
    },
];

/// One non-empty category in the published result. Built fresh on every
/// refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSection {
    pub section: SectionKind,
    pub label: LabelId,
    pub items: Vec<FavoriteItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_cover_every_kind_once_in_display_order() {
        let kinds: Vec<_> = CATEGORIES.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FavoriteKind::Movie,
                FavoriteKind::Series,
                FavoriteKind::Episode
            ]
        );
        assert_eq!(CATEGORIES[0].limit, None);
        assert_eq!(CATEGORIES[1].limit, Some(20));
        assert_eq!(CATEGORIES[2].limit, Some(20));
        let sections: Vec<_> = CATEGORIES.iter().map(|c| c.section).collect();
        assert_eq!(
            sections,
            vec![
                SectionKind::Movies,
                SectionKind::Shows,
                SectionKind::Episodes
            ]
        );
    }

    #[test]
    fn label_identifiers_serialize_as_stable_snake_case_keys() {
        assert_eq!(
            serde_json::to_value(LabelId::MoviesLabel).expect("serialize"),
            serde_json::json!("movies_label")
        );
        assert_eq!(
            serde_json::to_value(LabelId::ShowsLabel).expect("serialize"),
            serde_json::json!("shows_label")
        );
        assert_eq!(
            serde_json::to_value(LabelId::EpisodesLabel).expect("serialize"),
            serde_json::json!("episodes_label")
        );
    }
}
