use crate::color::CountryColors;
use crate::data::filter::{Selection, filtered_indices};
use crate::data::model::{
    CodebookEntry, EMISSION_METRICS, EmissionDataset, SHARE_METRICS, TEMPERATURE_METRICS,
};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The four analysis pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Emissions,
    Temperature,
    Correlation,
    Codebook,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Emissions,
        View::Temperature,
        View::Correlation,
        View::Codebook,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            View::Emissions => "Emission Analysis",
            View::Temperature => "Temperature Analysis",
            View::Correlation => "Correlation Analysis",
            View::Codebook => "Data Dictionary and Sources",
        }
    }

    /// The metric columns selectable on this page, if it has a metric picker.
    pub fn metric_group(&self) -> Option<&'static [&'static str]> {
        match self {
            View::Emissions => Some(EMISSION_METRICS),
            View::Temperature => Some(TEMPERATURE_METRICS),
            View::Correlation | View::Codebook => None,
        }
    }

    /// The columns summed for this page's composition treemap.
    pub fn share_group(&self) -> Option<&'static [&'static str]> {
        match self {
            View::Emissions => Some(SHARE_METRICS),
            View::Temperature => Some(TEMPERATURE_METRICS),
            View::Correlation | View::Codebook => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<EmissionDataset>,

    /// Data dictionary rows (empty if the codebook failed to load).
    pub codebook: Vec<CodebookEntry>,

    /// Active analysis page.
    pub view: View,

    /// Current filter state.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Stable per-country colours.
    pub country_colors: Option<CountryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            codebook: Vec::new(),
            view: View::Emissions,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            country_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, reconcile the selection and refilter.
    pub fn set_dataset(&mut self, dataset: EmissionDataset) {
        // Drop selected countries that don't exist in the new data; fall
        // back to "World", then to the first country.
        self.selection
            .countries
            .retain(|c| dataset.countries.contains(c));
        if self.selection.countries.is_empty() {
            let fallback = if dataset.countries.contains("World") {
                Some("World".to_string())
            } else {
                dataset.countries.iter().next().cloned()
            };
            if let Some(c) = fallback {
                self.selection.countries.insert(c);
            }
        }
        self.selection
            .clamp_years(dataset.year_min, dataset.year_max);

        self.country_colors = Some(CountryColors::new(&dataset.countries));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.selection);
        } else {
            self.visible_indices.clear();
        }
    }

    /// Switch page; chart pages get a metric from their own column group.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
        if let Some(group) = view.metric_group() {
            if !group.contains(&self.selection.metric.as_str()) {
                self.selection.metric = group[0].to_string();
            }
        }
    }

    /// Toggle a country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.countries.remove(country) {
            self.selection.countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Select every country in the dataset.
    pub fn select_all_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.countries = ds.countries.clone();
            self.refilter();
        }
    }

    /// Clear the country selection.
    pub fn select_no_countries(&mut self) {
        self.selection.countries.clear();
        self.refilter();
    }

    /// Toggle a column in the correlation column set.
    pub fn toggle_corr_column(&mut self, column: &str) {
        if !self.selection.corr_columns.remove(column) {
            self.selection.corr_columns.insert(column.to_string());
        }
    }

    /// Load the emissions table from disk; failures become a status message.
    pub fn load_dataset_from(&mut self, path: &std::path::Path) {
        match crate::data::loader::load_dataset(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows for {} countries ({}–{})",
                    dataset.len(),
                    dataset.countries.len(),
                    dataset.year_min,
                    dataset.year_max
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load the codebook from disk; failures become a status message.
    pub fn load_codebook_from(&mut self, path: &std::path::Path) {
        match crate::data::loader::load_codebook(path) {
            Ok(entries) => {
                log::info!("Loaded codebook with {} entries", entries.len());
                self.codebook = entries;
            }
            Err(e) => {
                log::error!("Failed to load codebook: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_dataset;

    #[test]
    fn set_dataset_reconciles_selection() {
        let mut state = AppState::default();
        state.selection.countries.insert("Atlantis".to_string());
        state.selection.years = (1800, 2100);
        state.set_dataset(sample_dataset());

        // Atlantis dropped, World kept, years clamped to data bounds.
        assert!(state.selection.countries.contains("World"));
        assert!(!state.selection.countries.contains("Atlantis"));
        assert_eq!(state.selection.years, (1990, 2023));
        assert!(!state.visible_indices.is_empty());
    }

    #[test]
    fn switching_view_resets_metric_to_its_group() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        assert_eq!(state.selection.metric, "co2");

        state.set_view(View::Temperature);
        assert_eq!(state.selection.metric, "temperature change from ghg");

        state.set_view(View::Emissions);
        assert_eq!(state.selection.metric, "co2");
    }

    #[test]
    fn toggling_countries_refilters() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        let world_only = state.visible_indices.len();

        state.toggle_country("China");
        assert_eq!(state.visible_indices.len(), world_only * 2);

        state.select_no_countries();
        assert!(state.visible_indices.is_empty());
    }
}
