use serde::Serialize;

use super::filter::SiteSelection;
use super::model::{LaunchDataset, Outcome};

/// One labelled share of the proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Points of one colour group in the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    /// `[payload mass, outcome class]` pairs.
    pub points: Vec<[f64; 2]>,
}

/// Aggregate the proportion-chart slices for a site-filtered view.
///
/// With every site selected there is one slice per site, valued by its
/// number of successful launches. With one site selected there is one
/// slice per outcome class found at that site, valued by its launch count.
pub fn success_slices(
    dataset: &LaunchDataset,
    indices: &[usize],
    site: &SiteSelection,
) -> Vec<Slice> {
    match site {
        SiteSelection::All => dataset
            .sites()
            .iter()
            .map(|s| Slice {
                label: s.clone(),
                value: indices
                    .iter()
                    .map(|&i| dataset.record(i))
                    .filter(|rec| &rec.launch_site == s)
                    .map(|rec| rec.outcome.class() as f64)
                    .sum(),
            })
            .collect(),
        SiteSelection::Site(_) => {
            let mut counts: Vec<(Outcome, usize)> = Vec::new();
            for &i in indices {
                let outcome = dataset.record(i).outcome;
                match counts.iter_mut().find(|(o, _)| *o == outcome) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((outcome, 1)),
                }
            }
            counts
                .into_iter()
                .map(|(outcome, n)| Slice {
                    label: outcome.to_string(),
                    value: n as f64,
                })
                .collect()
        }
    }
}

/// Group a view into one series per booster category, in dataset category
/// order. Categories with no launches in the view are left out.
pub fn booster_series(dataset: &LaunchDataset, indices: &[usize]) -> Vec<Series> {
    dataset
        .booster_categories()
        .iter()
        .filter_map(|category| {
            let points: Vec<[f64; 2]> = indices
                .iter()
                .map(|&i| dataset.record(i))
                .filter(|rec| &rec.booster_category == category)
                .map(|rec| [rec.payload_mass_kg, rec.outcome.class() as f64])
                .collect();
            (!points.is_empty()).then(|| Series {
                label: category.clone(),
                points,
            })
        })
        .collect()
}
