use crate::card::{ColorSet, Rarity};

/// Structured card search criteria, translated into the Scryfall
/// full-text query syntax by [`CardSearchCriteria::to_query`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardSearchCriteria {
    /// Free-text name fragment, included in the query as-is.
    pub name: Option<String>,
    /// Target format, mapped to `f:<format>`.
    pub format: Option<String>,
    /// Requested colors (`c:` clause); the empty set means colorless.
    pub colors: Option<ColorSet>,
    /// Minimum mana value, inclusive (`cmc>=`).
    pub min_cmc: Option<u32>,
    /// Maximum mana value, inclusive (`cmc<=`).
    pub max_cmc: Option<u32>,
    /// Rarity filter (`r:<rarity>`).
    pub rarity: Option<Rarity>,
}

impl CardSearchCriteria {
    /// Builds the Scryfall query string.
    ///
    /// Pure and total: any combination of criteria, including none, yields
    /// a deterministic string. Clause order is fixed for testability.
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            parts.push(name.to_string());
        }

        if let Some(format) = self
            .format
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
        {
            parts.push(format!("f:{}", format.to_lowercase()));
        }

        if let Some(colors) = self.colors {
            if colors.is_empty() {
                parts.push("c:c".to_string());
            } else {
                let symbols: String = colors
                    .iter()
                    .map(|c| c.symbol().to_ascii_lowercase())
                    .collect();
                parts.push(format!("c:{symbols}"));
            }
        }

        if let Some(min) = self.min_cmc {
            parts.push(format!("cmc>={min}"));
        }

        if let Some(max) = self.max_cmc {
            parts.push(format!("cmc<={max}"));
        }

        if let Some(rarity) = self.rarity {
            parts.push(format!("r:{}", rarity.as_str()));
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;

    #[test]
    fn combined_criteria_produce_expected_clauses() {
        let criteria = CardSearchCriteria {
            format: Some("standard".to_string()),
            colors: Some(ColorSet::EMPTY.with(Color::Blue).with(Color::Red)),
            max_cmc: Some(2),
            rarity: Some(Rarity::Rare),
            ..Default::default()
        };
        assert_eq!(criteria.to_query(), "f:standard c:ur cmc<=2 r:rare");
    }

    #[test]
    fn empty_criteria_produce_empty_query() {
        assert_eq!(CardSearchCriteria::default().to_query(), "");
    }

    #[test]
    fn colorless_maps_to_fixed_literal() {
        let criteria = CardSearchCriteria {
            colors: Some(ColorSet::EMPTY),
            ..Default::default()
        };
        assert_eq!(criteria.to_query(), "c:c");
    }

    #[test]
    fn name_only_is_passed_through_verbatim() {
        let criteria = CardSearchCriteria {
            name: Some("  Lightning Bolt ".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.to_query(), "Lightning Bolt");
    }

    #[test]
    fn format_is_lowercased_and_trimmed() {
        let criteria = CardSearchCriteria {
            format: Some(" Modern ".to_string()),
            min_cmc: Some(3),
            ..Default::default()
        };
        assert_eq!(criteria.to_query(), "f:modern cmc>=3");
    }

    #[test]
    fn build_is_deterministic() {
        let criteria = CardSearchCriteria {
            name: Some("bolt".to_string()),
            format: Some("pioneer".to_string()),
            colors: Some(ColorSet::EMPTY.with(Color::Red)),
            min_cmc: Some(1),
            max_cmc: Some(3),
            rarity: Some(Rarity::Common),
        };
        assert_eq!(criteria.to_query(), criteria.to_query());
        assert_eq!(criteria.to_query(), "bolt f:pioneer c:r cmc>=1 cmc<=3 r:common");
    }
}
