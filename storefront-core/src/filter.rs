//! Category tab filtering

/// Tag that shows every card.
pub const ALL_CATEGORIES: &str = "all";

/// The selected category of one filter group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    tag: String,
}

impl CategoryFilter {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether a card tagged `card_category` stays visible.
    #[must_use]
    pub fn shows(&self, card_category: Option<&str>) -> bool {
        self.tag == ALL_CATEGORIES || card_category == Some(self.tag.as_str())
    }

    /// Visibility of each card in a group, in order.
    pub fn visibility<'a, I>(&self, cards: I) -> Vec<bool>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        cards.into_iter().map(|c| self.shows(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shows_everything() {
        let f = CategoryFilter::new(ALL_CATEGORIES);
        assert_eq!(
            f.visibility([Some("mugs"), None, Some("plates")]),
            vec![true, true, true]
        );
    }

    #[test]
    fn tag_matches_exactly() {
        let f = CategoryFilter::new("mugs");
        assert_eq!(
            f.visibility([Some("mugs"), None, Some("Mugs"), Some("plates")]),
            vec![true, false, false, false]
        );
        assert_eq!(f.tag(), "mugs");
    }
}
