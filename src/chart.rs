//! Chart descriptions handed from the data layer to the plot widgets.
//!
//! These are plain values: the UI draws them, the export writes them as JSON,
//! and neither looks back into the dataset.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::aggregate::{Series, Slice, booster_series, success_slices};
use crate::data::filter::{Selection, SiteSelection, by_selection, by_site};
use crate::data::loader::{BOOSTER_COLUMN, CLASS_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN};
use crate::data::model::LaunchDataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Column the slices are named by.
    pub names: &'static str,
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Non-empty slices with their share of the total, largest first (ties
    /// keep dataset order). Empty when the total is zero.
    pub fn shares(&self) -> Vec<(&Slice, f64)> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        let mut shares: Vec<(&Slice, f64)> = self
            .slices
            .iter()
            .filter(|s| s.value > 0.0)
            .map(|s| (s, s.value / total))
            .collect();
        shares.sort_by(|a, b| b.1.total_cmp(&a.1));
        shares
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_field: &'static str,
    pub y_field: &'static str,
    pub color_field: &'static str,
    pub series: Vec<Series>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Proportion chart for the site selector. The payload range does not apply.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    let indices = by_site(dataset, site);
    let slices = success_slices(dataset, &indices, site);
    match site {
        SiteSelection::All => PieChart {
            title: "Total Success Launches by Site".to_string(),
            names: SITE_COLUMN,
            slices,
        },
        SiteSelection::Site(s) => PieChart {
            title: format!("Total Success Launches for site {s}"),
            names: CLASS_COLUMN,
            slices,
        },
    }
}

/// Payload vs. outcome scatter for both controls, coloured by booster category.
pub fn payload_scatter(dataset: &LaunchDataset, selection: &Selection) -> ScatterChart {
    let indices = by_selection(dataset, selection);
    let title = match &selection.site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(s) => format!("Correlation between Payload and Success for site {s}"),
    };
    ScatterChart {
        title,
        x_field: PAYLOAD_COLUMN,
        y_field: CLASS_COLUMN,
        color_field: BOOSTER_COLUMN,
        series: booster_series(dataset, &indices),
    }
}

/// Everything on screen for one selection, as written by "Export charts…".
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub selection: &'a Selection,
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}

impl DashboardSnapshot<'_> {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing charts")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }
}
