use crate::chart::{PieChart, ScatterChart, payload_scatter, success_pie};
use crate::color::ColorMap;
use crate::config::PAYLOAD_SLIDER_SPAN;
use crate::data::filter::{Selection, SiteSelection, by_selection};
use crate::data::model::{LaunchDataset, PayloadRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Every control change goes through a setter that recomputes the cached
/// charts once; rendering only reads them.
pub struct AppState {
    /// Loaded dataset, never mutated once set.
    pub dataset: LaunchDataset,

    /// Current site selector and payload range values.
    pub selection: Selection,

    /// Indices of launches passing both controls (cached, drives the table).
    pub visible_indices: Vec<usize>,

    pub pie: PieChart,
    pub scatter: ScatterChart,

    /// Colours per launch site (pie) and per booster category (scatter).
    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Text typed into the site dropdown's search box.
    pub site_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset) -> Self {
        let selection = Selection::initial(&dataset, PAYLOAD_SLIDER_SPAN);
        let mut state = Self {
            visible_indices: Vec::new(),
            pie: success_pie(&dataset, &selection.site),
            scatter: payload_scatter(&dataset, &selection),
            site_colors: ColorMap::new(dataset.sites()),
            booster_colors: ColorMap::new(dataset.booster_categories()),
            selection,
            dataset,
            site_query: String::new(),
            status_message: None,
        };
        state.visible_indices = by_selection(&state.dataset, &state.selection);
        state
    }

    /// Swap in a newly loaded dataset and reset the controls to its extent.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        *self = Self::new(dataset);
    }

    pub fn set_site(&mut self, site: SiteSelection) {
        if self.selection.site == site {
            return;
        }
        self.selection.site = site;
        self.pie = success_pie(&self.dataset, &self.selection.site);
        self.refresh_scatter();
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload == range {
            return;
        }
        self.selection.payload = range;
        self.refresh_scatter();
    }

    /// Loaded / visible counts for the top bar.
    pub fn status_line(&self) -> String {
        if self.dataset.is_empty() {
            return "No launches in file".to_string();
        }
        format!(
            "{} launches loaded, {} visible, {} plotted",
            self.dataset.len(),
            self.visible_indices.len(),
            self.scatter.point_count()
        )
    }

    /// Payload extent of the whole dataset, whatever the selection.
    pub fn payload_summary(&self) -> Option<String> {
        let min = self.dataset.min_payload()?;
        let max = self.dataset.max_payload()?;
        Some(format!("Dataset payload: {min:.0} – {max:.0} kg"))
    }

    fn refresh_scatter(&mut self) {
        self.visible_indices = by_selection(&self.dataset, &self.selection);
        self.scatter = payload_scatter(&self.dataset, &self.selection);
        log::debug!(
            "selection {} / {}: {} of {} launches visible",
            self.selection.site,
            self.selection.payload,
            self.visible_indices.len(),
            self.dataset.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn starts_with_everything_visible() {
        let state = AppState::new(sample_dataset());
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.selection.payload, PayloadRange::new(0.0, 9600.0));
        assert_eq!(state.visible_indices.len(), 8);
        assert_eq!(state.scatter.point_count(), 8);
        assert_eq!(state.pie.slices.len(), 4);
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut state = AppState::new(sample_dataset());
        state.set_site(SiteSelection::from("KSC LC-39A"));
        assert_eq!(state.pie.title, "Total Success Launches for site KSC LC-39A");
        assert_eq!(state.visible_indices, vec![3, 5]);
        assert_eq!(state.scatter.point_count(), 2);
    }

    #[test]
    fn payload_change_leaves_pie_alone() {
        let mut state = AppState::new(sample_dataset());
        let pie_before = state.pie.clone();
        state.set_payload_range(PayloadRange::new(1000.0, 5000.0));
        assert_eq!(state.pie, pie_before);
        assert_eq!(state.visible_indices, vec![4, 6]);
        assert_eq!(state.dataset.min_payload(), Some(0.0));
        assert_eq!(state.dataset.max_payload(), Some(9600.0));
    }

    #[test]
    fn inverted_range_shows_nothing() {
        let mut state = AppState::new(sample_dataset());
        state.set_payload_range(PayloadRange::new(8000.0, 2000.0));
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.scatter.point_count(), 0);
    }

    #[test]
    fn empty_dataset_uses_slider_span() {
        let state = AppState::new(LaunchDataset::default());
        assert_eq!(state.selection.payload, PAYLOAD_SLIDER_SPAN);
        assert!(state.pie.shares().is_empty());
    }

    #[test]
    fn new_dataset_resets_selection() {
        let mut state = AppState::new(sample_dataset());
        state.set_site(SiteSelection::from("KSC LC-39A"));
        state.status_message = Some("Error: boom".into());
        state.set_dataset(sample_dataset());
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn status_line_counts_loaded_visible_and_plotted() {
        let mut state = AppState::new(sample_dataset());
        assert_eq!(state.status_line(), "8 launches loaded, 8 visible, 8 plotted");
        state.set_site(SiteSelection::from("KSC LC-39A"));
        assert_eq!(state.status_line(), "8 launches loaded, 2 visible, 2 plotted");

        let empty = AppState::new(LaunchDataset::default());
        assert_eq!(empty.status_line(), "No launches in file");
    }

    #[test]
    fn payload_summary_ignores_selection() {
        let mut state = AppState::new(sample_dataset());
        state.set_payload_range(PayloadRange::new(1000.0, 2000.0));
        assert_eq!(
            state.payload_summary().as_deref(),
            Some("Dataset payload: 0 – 9600 kg")
        );
        assert_eq!(AppState::new(LaunchDataset::default()).payload_summary(), None);
    }
}
