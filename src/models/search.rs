use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

use super::patron::{Patron, PatronId};

/// Fuzzy name filter over the roster.
///
/// Smart case: case-insensitive unless the query has uppercase letters.
/// Matches keep roster order; scores only decide membership.
pub struct NameFilter {
    matcher: Matcher,
}

impl NameFilter {
    pub fn new() -> Self {
        NameFilter {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Ids of patrons whose name matches `query`, in roster order
    pub fn filter(&mut self, patrons: &[Patron], query: &str) -> Vec<PatronId> {
        if query.is_empty() {
            return patrons.iter().map(|p| p.id).collect();
        }

        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);

        patrons
            .iter()
            .filter(|patron| {
                let name = Utf32String::from(patron.name.as_str());
                pattern.score(name.slice(..), &mut self.matcher).is_some()
            })
            .map(|patron| patron.id)
            .collect()
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Patron> {
        ["John Doe", "Jane Smith", "Joan Dough"]
            .iter()
            .enumerate()
            .map(|(i, name)| Patron {
                id: i as PatronId + 1,
                name: name.to_string(),
                body_mass: 70.0,
                alcohol_saturation_level: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let mut filter = NameFilter::new();
        assert_eq!(filter.filter(&roster(), ""), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_keeps_roster_order() {
        let mut filter = NameFilter::new();
        // "jo d" matches both John Doe and Joan Dough, but not Jane Smith
        let ids = filter.filter(&roster(), "jo d");
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_smart_case() {
        let mut filter = NameFilter::new();
        assert_eq!(filter.filter(&roster(), "smith"), vec![2]);
        assert!(filter.filter(&roster(), "SMITH").is_empty());
    }
}
