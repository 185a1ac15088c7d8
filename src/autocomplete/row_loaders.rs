use std::collections::HashSet;

use crate::types::suggestion::Suggestion;

use super::config::AutocompleteConfig;

/// Identity of a row for loading state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    CurrentLocation,
    Place(String),
}

impl RowKey {
    pub fn of(row: &Suggestion) -> Option<RowKey> {
        if row.is_current_location {
            return Some(RowKey::CurrentLocation);
        }
        row.place_id().map(|id| RowKey::Place(id.to_string()))
    }
}

/// Rows currently showing a loading indicator.
#[derive(Debug, Default)]
pub struct RowLoaders {
    loading: HashSet<RowKey>,
}

impl RowLoaders {
    pub fn enable(&mut self, key: RowKey) {
        self.loading.insert(key);
    }

    pub fn is_loading(&self, key: &RowKey) -> bool {
        self.loading.contains(key)
    }

    /// Returns whether any row was loading.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.loading.is_empty();
        self.loading.clear();
        had_any
    }

    pub fn is_empty(&self) -> bool {
        self.loading.is_empty()
    }
}

/// The list the UI renders: predefined rows (and the current-location row)
/// ahead of the dynamic results, with loading flags applied.
pub fn build_rows(
    config: &AutocompleteConfig,
    has_geolocation: bool,
    results: &[Suggestion],
    loaders: &RowLoaders,
) -> Vec<Suggestion> {
    let mut rows = Vec::with_capacity(results.len() + config.predefined_places.len() + 1);

    if results.is_empty() || config.predefined_places_always_visible {
        if config.current_location && has_geolocation {
            let mut row = Suggestion::current_location(&config.current_location_label);
            row.is_predefined_place = true;
            rows.push(row);
        }
        rows.extend(config.predefined_places.iter().map(|place| Suggestion {
            is_predefined_place: true,
            ..place.clone()
        }));
    }

    rows.extend(results.iter().cloned());

    for row in rows.iter_mut() {
        row.is_loading = RowKey::of(row).map_or(false, |key| loaders.is_loading(&key));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AutocompleteConfig {
        AutocompleteConfig {
            predefined_places: vec![Suggestion {
                description: "Home".to_string(),
                ..Default::default()
            }],
            current_location: true,
            ..Default::default()
        }
    }

    #[test]
    fn predefined_rows_lead_when_results_empty() {
        let rows = build_rows(&config(), true, &[], &RowLoaders::default());

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_current_location);
        assert_eq!(rows[0].description, "Current location");
        assert_eq!(rows[1].description, "Home");
        assert!(rows.iter().all(|r| r.is_predefined_place));
    }

    #[test]
    fn predefined_rows_hidden_behind_results() {
        let results = vec![Suggestion::new("Mall", "m")];
        let rows = build_rows(&config(), true, &results, &RowLoaders::default());

        assert_eq!(rows, results);

        let always = AutocompleteConfig {
            predefined_places_always_visible: true,
            ..config()
        };
        let rows = build_rows(&always, false, &results, &RowLoaders::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description, "Home");
        assert_eq!(rows[1].description, "Mall");
    }

    #[test]
    fn current_location_needs_geolocation() {
        let rows = build_rows(&config(), false, &[], &RowLoaders::default());
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_current_location);
    }

    #[test]
    fn loading_flag_follows_place_id() {
        let results = vec![Suggestion::new("A", "a"), Suggestion::new("B", "b")];
        let mut loaders = RowLoaders::default();
        loaders.enable(RowKey::Place("b".to_string()));

        let rows = build_rows(&AutocompleteConfig::default(), false, &results, &loaders);
        assert!(!rows[0].is_loading);
        assert!(rows[1].is_loading);

        assert!(loaders.clear());
        assert!(!loaders.clear());
        assert!(loaders.is_empty());
    }
}
