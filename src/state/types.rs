//! Core value types exchanged with the chart service and held in state.

use serde::{Deserialize, Serialize};

/// One location candidate returned by the search service.
///
/// Order inside a result list is server relevance; the client never re-sorts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSuggestion {
    /// Human readable label, e.g. "Helsinki, Finland".
    pub display: String,
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// IANA timezone, e.g. "Europe/Helsinki".
    pub timezone: String,
}

/// A location the user explicitly committed from the suggestion list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// City name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// IANA timezone.
    pub timezone: String,
}

impl ResolvedLocation {
    /// `"<city>, <country>"`, the form the pillars service expects.
    #[must_use]
    pub fn service_city(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl From<&LocationSuggestion> for ResolvedLocation {
    fn from(s: &LocationSuggestion) -> Self {
        Self {
            city: s.city.clone(),
            country: s.country.clone(),
            timezone: s.timezone.clone(),
        }
    }
}

/// Location echoed back by the pillars service after geocoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceLocation {
    /// Canonical city name.
    pub city: String,
    /// Country name.
    pub country: String,
    /// IANA timezone.
    pub timezone: String,
}

/// A stem or branch glyph as returned by the pillars service.
///
/// Only `chinese` is consumed; the remaining fields ride along for logging.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Glyph {
    /// The Chinese character, e.g. "甲".
    pub chinese: String,
    /// Romanisation, when provided.
    pub pinyin: String,
    /// Element classification, when provided.
    pub element: String,
}

/// Stem + branch pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Pillar {
    /// Heavenly stem.
    pub stem: Glyph,
    /// Earthly branch.
    pub branch: Glyph,
}

impl Pillar {
    /// Two-glyph code (stem followed by branch), e.g. "丁卯".
    #[must_use]
    pub fn code(&self) -> String {
        format!("{}{}", self.stem.chinese, self.branch.chinese)
    }
}

/// The four pillars of a birth moment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PillarSet {
    /// Hour pillar.
    pub hour: Pillar,
    /// Day pillar.
    pub day: Pillar,
    /// Month pillar.
    pub month: Pillar,
    /// Year pillar.
    pub year: Pillar,
}

/// Identifies one pillar; declaration order is display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PillarKey {
    /// Hour pillar (leftmost).
    Hour,
    /// Day pillar.
    Day,
    /// Month pillar.
    Month,
    /// Year pillar (rightmost).
    Year,
}

impl PillarKey {
    /// Display order of the pillars in a rendered chart.
    pub const ALL: [Self; 4] = [Self::Hour, Self::Day, Self::Month, Self::Year];

    /// Wire name of the pillar.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Position of the pillar in display order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hour => 0,
            Self::Day => 1,
            Self::Month => 2,
            Self::Year => 3,
        }
    }
}

/// Stem card data from the chart-rendering service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StemCard {
    /// Glyph.
    pub char: String,
    /// Romanisation.
    pub pinyin: String,
    /// Element id (wood, fire, earth, metal, water).
    pub element: String,
    /// Yin/Yang label.
    pub polarity: String,
    /// Localized "polarity element" label.
    pub label: String,
    /// Trigram lines, top to bottom: `L` solid, `B` broken.
    pub lines: Vec<String>,
}

/// Branch card data from the chart-rendering service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BranchCard {
    /// Glyph.
    pub char: String,
    /// Romanisation.
    pub pinyin: String,
    /// Element id.
    pub element: String,
    /// Yin/Yang label.
    pub polarity: String,
    /// Localized animal name.
    pub animal_name: String,
    /// Older field name for the animal, still sent by some services.
    pub animal_fi: String,
    /// Localized "polarity element" label.
    pub element_label: String,
    /// Hexagram lines, top to bottom.
    pub lines: Vec<String>,
}

impl BranchCard {
    /// Animal label, preferring `animal_name` over the older `animal_fi`.
    #[must_use]
    pub fn animal(&self) -> &str {
        if self.animal_name.is_empty() {
            &self.animal_fi
        } else {
            &self.animal_name
        }
    }
}

/// One column of a rendered chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChartPillar {
    /// Localized pillar label ("Hour", "Tunti", ...).
    pub label: String,
    /// Display value (time, day, month name, year).
    pub value: String,
    /// Stem card.
    pub stem: StemCard,
    /// Branch card.
    pub branch: BranchCard,
}

/// Successful chart-rendering response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartPayload {
    /// Header line, e.g. "March 4, 1988 · 16:30".
    pub header: String,
    /// Pillars in display order (hour, day, month, year).
    pub pillars: Vec<ChartPillar>,
}

/// One hidden stem inside a branch.
///
/// The service either returns bare glyphs (`"乙"`) or described entries; both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HiddenStem {
    /// Bare stem glyph.
    Glyph(String),
    /// Stem with its elemental description.
    Described {
        /// Stem glyph, when supplied.
        #[serde(default)]
        stem: Option<String>,
        /// Element id (wood, fire, ...).
        #[serde(default)]
        element: String,
        /// Yin/Yang label.
        #[serde(default)]
        polarity: String,
        /// Qi strength: main, middle or residual.
        #[serde(default)]
        qi_type: String,
    },
}

/// Hidden stems of one pillar's branch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PillarHiddenStems {
    /// Hidden stems, strongest first.
    pub hidden_stems: Vec<HiddenStem>,
}

/// Enrichment payload keyed by pillar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HiddenStemsMap {
    /// Year pillar.
    pub year: Option<PillarHiddenStems>,
    /// Month pillar.
    pub month: Option<PillarHiddenStems>,
    /// Day pillar.
    pub day: Option<PillarHiddenStems>,
    /// Hour pillar.
    pub hour: Option<PillarHiddenStems>,
}

impl HiddenStemsMap {
    /// Hidden stems for `key`, if the service sent any.
    #[must_use]
    pub const fn get(&self, key: PillarKey) -> Option<&PillarHiddenStems> {
        match key {
            PillarKey::Hour => self.hour.as_ref(),
            PillarKey::Day => self.day.as_ref(),
            PillarKey::Month => self.month.as_ref(),
            PillarKey::Year => self.year.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Both hidden-stem shapes deserialize into one list.
    ///
    /// Inputs:
    /// - JSON mixing a bare glyph and a described entry
    ///
    /// Output:
    /// - `Glyph` and `Described` variants in order
    fn hidden_stems_accept_both_shapes() {
        let json = r#"{"year":{"hidden_stems":["乙",{"element":"wood","polarity":"Yin","qi_type":"main"}]}}"#;
        let map: HiddenStemsMap = serde_json::from_str(json).expect("parse hidden stems");
        let year = map.get(PillarKey::Year).expect("year present");
        assert_eq!(year.hidden_stems.len(), 2);
        assert_eq!(year.hidden_stems[0], HiddenStem::Glyph("乙".into()));
        assert!(matches!(
            &year.hidden_stems[1],
            HiddenStem::Described { element, qi_type, .. } if element == "wood" && qi_type == "main"
        ));
        assert!(map.get(PillarKey::Hour).is_none());
    }

    #[test]
    fn pillar_code_concatenates_glyphs() {
        let set: PillarSet = serde_json::from_str(
            r#"{
                "hour":{"stem":{"chinese":"壬","pinyin":"ren"},"branch":{"chinese":"申"}},
                "day":{"stem":{"chinese":"己"},"branch":{"chinese":"丑"}},
                "month":{"stem":{"chinese":"癸"},"branch":{"chinese":"丑"}},
                "year":{"stem":{"chinese":"丁"},"branch":{"chinese":"卯"}}
            }"#,
        )
        .expect("parse pillars");
        assert_eq!(set.year.code(), "丁卯");
        assert_eq!(set.hour.code(), "壬申");
        assert_eq!(set.hour.stem.pinyin, "ren");
    }

    #[test]
    fn branch_card_reads_legacy_animal_field() {
        let both: BranchCard =
            serde_json::from_str(r#"{"animal_name":"Rabbit","animal_fi":"Rabbit"}"#)
                .expect("parse branch with both names");
        assert_eq!(both.animal(), "Rabbit");
        let card: BranchCard =
            serde_json::from_str(r#"{"char":"卯","animal_fi":"Jänis","lines":["B","L"]}"#)
                .expect("parse branch");
        assert_eq!(card.animal(), "Jänis");
        assert_eq!(card.lines, vec!["B", "L"]);
    }
}
