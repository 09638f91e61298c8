//! Static movement catalog
//!
//! Date ranges and regions for the movements the timeline refers to, plus
//! localized display content where it exists.

/// A movement's active years (negative = BCE) and the ISO 3166 alpha-2
/// codes of the regions it is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementData {
    pub id: &'static str,
    pub start_year: i32,
    pub end_year: i32,
    pub region_codes: &'static [&'static str],
}

impl MovementData {
    /// Inclusive on both ends.
    pub fn is_active_in(&self, year: i32) -> bool {
        self.start_year <= year && year <= self.end_year
    }

    pub fn has_region(&self, code: &str) -> bool {
        self.region_codes
            .iter()
            .any(|r| r.eq_ignore_ascii_case(code))
    }
}

const fn movement(
    id: &'static str,
    start_year: i32,
    end_year: i32,
    region_codes: &'static [&'static str],
) -> MovementData {
    MovementData {
        id,
        start_year,
        end_year,
        region_codes,
    }
}

pub static MOVEMENTS: &[MovementData] = &[
    movement("prehistoric-art", -30000, -3000, &["FR", "ES", "IT", "CN", "IN"]),
    movement("ancient-egyptian-art", -3000, -30, &["EG"]),
    movement("mesopotamian-art", -4000, -500, &["IQ", "SY", "TR"]),
    movement("ancient-greek-art", -800, -100, &["GR"]),
    movement("ancient-roman-art", -500, 500, &["IT", "FR", "ES", "GB", "DE"]),
    movement("byzantine-art", 330, 1453, &["TR", "GR", "IT"]),
    movement("medieval-art", 500, 1400, &["FR", "DE", "IT", "GB"]),
    movement("romanesque-art", 1000, 1200, &["FR", "DE", "IT", "ES"]),
    movement("gothic-art", 1100, 1400, &["FR", "DE", "IT", "GB"]),
    movement("renaissance", 1400, 1600, &["IT", "FR", "DE", "NL"]),
    movement("mannerism", 1520, 1600, &["IT", "FR"]),
    movement("baroque", 1600, 1750, &["IT", "FR", "ES", "NL", "DE"]),
    movement("rococo", 1700, 1770, &["FR", "DE", "IT"]),
    movement("neoclassicism", 1750, 1850, &["FR", "IT", "GB", "US"]),
    movement("romanticism", 1800, 1850, &["FR", "DE", "GB", "US"]),
    movement("realism", 1840, 1880, &["FR", "GB", "US"]),
    movement("impressionism", 1860, 1890, &["FR", "US"]),
    movement("post-impressionism", 1880, 1900, &["FR", "NL", "GB"]),
    movement("symbolism", 1880, 1910, &["FR", "BE", "NL"]),
    movement("art-nouveau", 1890, 1910, &["FR", "BE", "ES", "AT"]),
    movement("fauvism", 1900, 1910, &["FR"]),
    movement("expressionism", 1905, 1930, &["DE", "AT", "NO"]),
    movement("cubism", 1907, 1920, &["FR", "ES"]),
    movement("futurism", 1909, 1940, &["IT", "RU"]),
    movement("constructivism", 1915, 1930, &["RU", "DE"]),
    movement("dada", 1916, 1924, &["CH", "DE", "FR", "US"]),
    movement("surrealism", 1920, 1960, &["FR", "ES", "BE", "US"]),
    movement("abstract-expressionism", 1940, 1960, &["US", "GB"]),
    movement("pop-art", 1950, 1970, &["US", "GB"]),
    movement("minimalism", 1960, 1970, &["US", "GB"]),
    movement("conceptual-art", 1960, 1970, &["US", "GB", "DE"]),
    movement("postmodernism", 1970, 1990, &["US", "FR", "GB"]),
    movement("contemporary-art", 1980, 2025, &["US", "GB", "DE", "FR", "CN"]),
    movement("chinese-ink-painting", 200, 2025, &["CN", "JP", "KR"]),
    movement("ukiyo-e", 1600, 1900, &["JP"]),
    movement("mughal-art", 1550, 1850, &["IN", "PK"]),
    movement("african-tribal-art", 1000, 2025, &["NG", "GH", "CI", "CM"]),
    movement("pre-columbian-art", -2000, 1500, &["MX", "PE", "GT"]),
    movement("islamic-art", 700, 1800, &["IR", "IQ", "SA", "TR"]),
    movement("harlem-renaissance", 1920, 1930, &["US"]),
    movement("mexican-muralism", 1920, 1950, &["MX"]),
    movement("socialist-realism", 1930, 1950, &["RU", "CN", "DE"]),
    movement("op-art", 1960, 1970, &["US", "GB"]),
    movement("land-art", 1960, 1970, &["US", "GB"]),
    movement("feminist-art", 1960, 1970, &["US", "GB", "DE"]),
    movement("photorealism", 1960, 1970, &["US", "GB"]),
    movement("street-art", 1970, 2025, &["US", "FR", "GB", "BR"]),
    movement("digital-art", 1980, 2025, &["US", "GB", "JP", "KR"]),
    movement("video-art", 1960, 2025, &["US", "GB", "DE"]),
    movement("installation-art", 1960, 2025, &["US", "GB", "DE", "JP"]),
    movement("performance-art", 1960, 2025, &["US", "GB", "DE", "JP"]),
];

pub fn movement_by_id(id: &str) -> Option<&'static MovementData> {
    MOVEMENTS.iter().find(|m| m.id == id)
}

/// Movements whose date range contains `year`, in catalog order.
pub fn active_in(year: i32) -> Vec<&'static MovementData> {
    MOVEMENTS.iter().filter(|m| m.is_active_in(year)).collect()
}

/// Movements associated with a region code (case-insensitive).
pub fn in_region(code: &str) -> Vec<&'static MovementData> {
    MOVEMENTS.iter().filter(|m| m.has_region(code)).collect()
}

// -- Localized content --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementContent {
    pub name: &'static str,
    pub description: &'static str,
    pub region: &'static str,
}

pub const DEFAULT_LOCALE: &str = "en";

static CONTENT_EN: &[(&str, MovementContent)] = &[
    (
        "renaissance",
        MovementContent {
            name: "Renaissance",
            description: "A period of cultural, artistic, political and economic 'rebirth' in Europe...",
            region: "Europe (primarily Italy)",
        },
    ),
    (
        "impressionism",
        MovementContent {
            name: "Impressionism",
            description: "A 19th-century art movement...",
            region: "France",
        },
    ),
];

fn locale_table(locale: &str) -> Option<&'static [(&'static str, MovementContent)]> {
    // Only the language subtag matters: "en-GB" -> "en"
    let language = locale.split(['-', '_']).next().unwrap_or(locale);
    match language.to_ascii_lowercase().as_str() {
        "en" => Some(CONTENT_EN),
        _ => None,
    }
}

/// Display content for a movement. Unknown locales fall back to English.
pub fn content(locale: &str, id: &str) -> Option<MovementContent> {
    let lookup = |table: &[(&str, MovementContent)]| {
        table
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, content)| *content)
    };

    locale_table(locale)
        .and_then(lookup)
        .or_else(|| locale_table(DEFAULT_LOCALE).and_then(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(movements: &[&MovementData]) -> Vec<&'static str> {
        movements.iter().map(|m| m.id).collect()
    }

    #[test]
    fn ids_are_unique() {
        let mut all: Vec<&str> = MOVEMENTS.iter().map(|m| m.id).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), MOVEMENTS.len());
    }

    #[test]
    fn ranges_are_ordered() {
        for m in MOVEMENTS {
            assert!(m.start_year <= m.end_year, "{}", m.id);
        }
    }

    #[test]
    fn lookup_by_id() {
        let impressionism = movement_by_id("impressionism").unwrap();
        assert_eq!(impressionism.start_year, 1860);
        assert_eq!(impressionism.region_codes, &["FR", "US"]);
        assert!(movement_by_id("vaporwave").is_none());
    }

    #[test]
    fn active_range_is_inclusive() {
        let in_1907 = ids(&active_in(1907));
        assert!(in_1907.contains(&"cubism"));
        assert!(in_1907.contains(&"expressionism"));
        assert!(!in_1907.contains(&"impressionism"));

        assert!(ids(&active_in(1890)).contains(&"impressionism"));
        assert!(!ids(&active_in(1891)).contains(&"impressionism"));
    }

    #[test]
    fn bce_years() {
        assert!(ids(&active_in(-2500)).contains(&"ancient-egyptian-art"));
    }

    #[test]
    fn region_match_ignores_case() {
        assert_eq!(ids(&in_region("jp")), ids(&in_region("JP")));
        assert!(ids(&in_region("NO")) == vec!["expressionism"]);
        assert!(in_region("AQ").is_empty());
    }

    #[test]
    fn content_falls_back_to_english() {
        let en = content("en", "renaissance").unwrap();
        assert_eq!(en.name, "Renaissance");
        assert_eq!(content("en-GB", "impressionism").unwrap().region, "France");
        assert_eq!(content("ru", "renaissance"), Some(en));
        assert_eq!(content("en", "cubism"), None);
    }
}
