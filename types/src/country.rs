//! Static country reference list and the combobox filter.

use std::fmt;

/// A selectable country: display name, ISO code and dialing prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Country {
    pub name: &'static str,
    /// ISO alpha-2 style code as shown to the user.
    pub country_code: &'static str,
    /// Dialing prefix, always with a leading `+`.
    pub code: &'static str,
}

/// The five supported countries. The first entry is the default selection.
pub static COUNTRIES: [Country; 5] = [
    Country {
        name: "Jordan",
        country_code: "JO",
        code: "+962",
    },
    Country {
        name: "United States",
        country_code: "US",
        code: "+1",
    },
    Country {
        name: "United Kingdom",
        country_code: "UK",
        code: "+44",
    },
    Country {
        name: "Canada",
        country_code: "CA",
        code: "+1",
    },
    Country {
        name: "Australia",
        country_code: "AU",
        code: "+61",
    },
];

impl Country {
    /// The default selection (Jordan).
    pub fn default_selection() -> &'static Country {
        &COUNTRIES[0]
    }

    /// Dialing prefix without the leading `+`.
    pub fn dial_digits(&self) -> &'static str {
        self.code.strip_prefix('+').unwrap_or(self.code)
    }

    /// Whether `query` (already lowercased) selects this country.
    ///
    /// Matches the name, the ISO code, or any of the three common ways of
    /// writing the dialing prefix: `+962`, `962`, `00962`.
    fn matches_lower(&self, query: &str) -> bool {
        let plain = self.dial_digits();
        let with_00 = format!("00{plain}");

        self.name.to_lowercase().contains(query)
            || self.country_code.to_lowercase().contains(query)
            || self.code.to_lowercase().contains(query)
            || plain.contains(query)
            || with_00.contains(query)
    }

    /// Whether `query` selects this country (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.matches_lower(&query.to_lowercase())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Filter the static country list by a free-text query, preserving order.
///
/// An empty query returns every country.
pub fn filter_countries(query: &str) -> Vec<&'static Country> {
    if query.is_empty() {
        return COUNTRIES.iter().collect();
    }
    let lower = query.to_lowercase();
    COUNTRIES.iter().filter(|c| c.matches_lower(&lower)).collect()
}
