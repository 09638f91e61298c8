//! Per-era country index
//!
//! Collapses an era's movement → country → artist tree into one list of
//! countries, each with its artists and the movements they are listed under.
//! Pure: no I/O, same input always gives the same output.

use std::collections::BTreeSet;

use crate::timeline::TimelineItem;
use crate::util::compare_locale;

/// Countries of one era, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraCountryIndex {
    pub countries: Vec<CountryArtists>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryArtists {
    pub country: String,
    /// Sorted by artist name
    pub artists: Vec<ArtistMovements>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistMovements {
    pub name: String,
    /// Sorted ascending, no duplicates
    pub movements: Vec<String>,
}

impl ArtistMovements {
    /// "Impressionism, Post-Impressionism"
    pub fn movements_label(&self) -> String {
        self.movements.join(", ")
    }
}

/// Build the country index for one era.
///
/// Artists are merged on the exact (country, name) pair: the first
/// occurrence creates the entry and later ones add their movement. Returns
/// `None` when the era lists no artists at all, so callers can skip the
/// summary entirely.
pub fn aggregate_era(era: &TimelineItem) -> Option<EraCountryIndex> {
    // Pass 1: insertion-ordered country -> artist -> movements
    let mut by_country: Vec<(&str, Vec<(&str, BTreeSet<&str>)>)> = Vec::new();

    for movement in &era.art_movements {
        for group in &movement.countries {
            for artist in &group.artists {
                let country_idx = match by_country
                    .iter()
                    .position(|(country, _)| *country == group.country)
                {
                    Some(idx) => idx,
                    None => {
                        by_country.push((group.country.as_str(), Vec::new()));
                        by_country.len() - 1
                    }
                };

                let artists = &mut by_country[country_idx].1;
                match artists.iter_mut().find(|(name, _)| *name == artist.name) {
                    Some((_, movements)) => {
                        movements.insert(movement.name.as_str());
                    }
                    None => {
                        let movements = BTreeSet::from([movement.name.as_str()]);
                        artists.push((artist.name.as_str(), movements));
                    }
                }
            }
        }
    }

    if by_country.is_empty() {
        return None;
    }

    // Pass 2: deterministic ordering
    let mut countries: Vec<CountryArtists> = by_country
        .into_iter()
        .map(|(country, artists)| {
            let mut artists: Vec<ArtistMovements> = artists
                .into_iter()
                .map(|(name, movements)| ArtistMovements {
                    name: name.to_string(),
                    movements: movements.into_iter().map(str::to_string).collect(),
                })
                .collect();
            artists.sort_by(|a, b| compare_locale(&a.name, &b.name));
            CountryArtists {
                country: country.to_string(),
                artists,
            }
        })
        .collect();
    countries.sort_by(|a, b| compare_locale(&a.country, &b.country));

    Some(EraCountryIndex { countries })
}
