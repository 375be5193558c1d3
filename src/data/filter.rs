use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{LaunchDataset, PayloadRange};

/// Dropdown value that stands for "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Selection: the current control values
// ---------------------------------------------------------------------------

/// Site selector value: the `ALL` sentinel or one site label.
///
/// Labels are not checked against the dataset; an unknown label simply
/// matches no launches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }

    pub fn site(&self) -> Option<&str> {
        match self {
            SiteSelection::All => None,
            SiteSelection::Site(s) => Some(s),
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        SiteSelection::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Both control values at the moment of a recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl Selection {
    /// Initial control values: all sites, full payload extent of the data.
    /// An empty dataset falls back to `fallback`.
    pub fn initial(dataset: &LaunchDataset, fallback: PayloadRange) -> Self {
        Self {
            site: SiteSelection::All,
            payload: dataset.payload_extent().unwrap_or(fallback),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters: index views over the immutable dataset
// ---------------------------------------------------------------------------

/// Indices of launches from the selected site, in dataset order.
/// `All` returns every index.
pub fn by_site(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(&rec.launch_site))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of launches whose payload lies in the inclusive range.
/// An inverted range (`low > high`) selects nothing.
pub fn by_payload(dataset: &LaunchDataset, range: PayloadRange) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// Indices passing the payload range, then the site selection.
pub fn by_selection(dataset: &LaunchDataset, selection: &Selection) -> Vec<usize> {
    by_payload(dataset, selection.payload)
        .into_iter()
        .filter(|&i| selection.site.matches(&dataset.record(i).launch_site))
        .collect()
}

/// Sites offered by the searchable dropdown: case-insensitive substring
/// match, dataset order. A blank query offers every site.
pub fn search_sites<'a>(sites: &'a [String], query: &str) -> Vec<&'a String> {
    let needle = query.trim().to_lowercase();
    sites
        .iter()
        .filter(|site| needle.is_empty() || site.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{launch, sample_dataset};

    #[test]
    fn all_is_identity() {
        let ds = sample_dataset();
        let idx = by_site(&ds, &SiteSelection::All);
        assert_eq!(idx, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn sites_partition_dataset() {
        let ds = sample_dataset();
        let mut seen = Vec::new();
        for site in ds.sites() {
            let sel = SiteSelection::from(site.as_str());
            let idx = by_site(&ds, &sel);
            assert!(!idx.is_empty());
            assert!(idx.iter().all(|&i| &ds.record(i).launch_site == site));
            seen.extend(idx);
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_site_is_silently_empty() {
        let ds = sample_dataset();
        assert!(by_site(&ds, &SiteSelection::from("Boca Chica")).is_empty());
    }

    #[test]
    fn payload_range_selects_exactly_in_range() {
        let ds = sample_dataset();
        let range = PayloadRange::new(500.0, 5300.0);
        let idx = by_payload(&ds, range);
        for (i, rec) in ds.records().iter().enumerate() {
            let inside = rec.payload_mass_kg >= 500.0 && rec.payload_mass_kg <= 5300.0;
            assert_eq!(idx.contains(&i), inside, "record {i}");
        }
        assert_eq!(idx, vec![1, 2, 3, 4, 6]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = sample_dataset();
        assert!(by_payload(&ds, PayloadRange::new(6000.0, 1000.0)).is_empty());
    }

    #[test]
    fn single_record_example() {
        let ds = LaunchDataset::from_records(vec![launch("CCAFS", 500.0, true, "FT")]);
        let hit = Selection {
            site: SiteSelection::from("CCAFS"),
            payload: PayloadRange::new(0.0, 1000.0),
        };
        assert_eq!(by_selection(&ds, &hit), vec![0]);

        let miss = Selection {
            site: SiteSelection::from("KSC"),
            ..hit
        };
        assert!(by_selection(&ds, &miss).is_empty());
    }

    #[test]
    fn filtering_leaves_derived_values_alone() {
        let ds = sample_dataset();
        let before = (ds.min_payload(), ds.max_payload());
        let _ = by_selection(
            &ds,
            &Selection {
                site: SiteSelection::from("KSC LC-39A"),
                payload: PayloadRange::new(6000.0, 7000.0),
            },
        );
        assert_eq!((ds.min_payload(), ds.max_payload()), before);
    }

    #[test]
    fn sentinel_round_trips_through_string() {
        assert_eq!(SiteSelection::from(ALL_SITES), SiteSelection::All);
        assert_eq!(String::from(SiteSelection::All), ALL_SITES);
        assert_eq!(SiteSelection::from("KSC LC-39A").site(), Some("KSC LC-39A"));
    }

    #[test]
    fn initial_selection_spans_payload_extent() {
        let fallback = PayloadRange::new(0.0, 10_000.0);
        let sel = Selection::initial(&sample_dataset(), fallback);
        assert_eq!(sel.site, SiteSelection::All);
        assert_eq!(sel.payload, PayloadRange::new(0.0, 9600.0));

        let empty = Selection::initial(&LaunchDataset::default(), fallback);
        assert_eq!(empty.payload, fallback);
    }

    #[test]
    fn site_search_is_case_insensitive_substring() {
        let ds = sample_dataset();
        assert_eq!(
            search_sites(ds.sites(), "ccafs"),
            ["CCAFS LC-40", "CCAFS SLC-40"]
        );
        assert_eq!(search_sites(ds.sites(), " slc-4 "), ["VAFB SLC-4E", "CCAFS SLC-40"]);
        assert_eq!(search_sites(ds.sites(), "").len(), ds.sites().len());
        assert!(search_sites(ds.sites(), "boca").is_empty());
    }
}
