//! Pollen taxa and per-taxon scoring

use serde::{Deserialize, Serialize};

use crate::models::{level_for_score, RiskLevel, WeatherSnapshot};
use crate::scalar::{clamp, month_distance, to_score};

/// Static taxon descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollenType {
    pub id: String,
    pub name: String,
    pub name_ja: String,
    /// Months (1-12) the taxon is airborne. Need not be contiguous.
    pub season_months: Vec<u32>,
    /// Subset of `season_months`
    pub peak_months: Vec<u32>,
    pub description: String,
}

impl PollenType {
    fn new(
        id: &str,
        name: &str,
        name_ja: &str,
        season_months: &[u32],
        peak_months: &[u32],
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            name_ja: name_ja.to_string(),
            season_months: season_months.to_vec(),
            peak_months: peak_months.to_vec(),
            description: description.to_string(),
        }
    }

    pub fn is_in_season(&self, month: u32) -> bool {
        self.season_months.contains(&month)
    }

    pub fn is_peak(&self, month: u32) -> bool {
        self.peak_months.contains(&month)
    }
}

/// A taxon together with its computed status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollenTypeStatus {
    #[serde(flatten)]
    pub pollen: PollenType,
    pub score: u8,
    pub level: RiskLevel,
    pub in_peak: bool,
}

/// The taxa tracked by default, in display order
pub fn pollen_catalog() -> Vec<PollenType> {
    vec![
        PollenType::new(
            "cedar",
            "Japanese cedar",
            "スギ",
            &[2, 3, 4],
            &[3],
            "The main spring allergen. Pollen travels tens of kilometres on dry, windy days.",
        ),
        PollenType::new(
            "cypress",
            "Japanese cypress",
            "ヒノキ",
            &[3, 4, 5],
            &[4],
            "Follows cedar by a few weeks and often prolongs spring symptoms.",
        ),
        PollenType::new(
            "alder",
            "Alder",
            "ハンノキ",
            &[1, 2, 3, 4],
            &[2, 3],
            "Early flowering tree found along rivers and wetlands.",
        ),
        PollenType::new(
            "birch",
            "Birch",
            "シラカンバ",
            &[4, 5, 6],
            &[5],
            "Dominant in the north. Linked to oral allergy syndrome with some fruits.",
        ),
        PollenType::new(
            "grass",
            "Grasses",
            "イネ科",
            &[4, 5, 6, 7, 8, 9],
            &[5, 6],
            "Grows on riverbanks, parks and roadsides. Pollen stays close to the source.",
        ),
        PollenType::new(
            "ragweed",
            "Ragweed",
            "ブタクサ",
            &[8, 9, 10],
            &[9],
            "Main autumn weed allergen.",
        ),
        PollenType::new(
            "mugwort",
            "Mugwort",
            "ヨモギ",
            &[8, 9, 10],
            &[9],
            "Autumn weed common on vacant lots and embankments.",
        ),
    ]
}

/// Seasonal proximity weight for a taxon.
///
/// 1 inside the season, 0.44 one month away, 0.2 two months away, 0
/// otherwise. Distances wrap across the year boundary.
pub fn seasonal_factor(pollen: &PollenType, month: u32) -> f64 {
    let nearest = pollen
        .season_months
        .iter()
        .map(|&m| month_distance(month, m))
        .min();

    match nearest {
        Some(0) => 1.0,
        Some(1) => 0.44,
        Some(2) => 0.2,
        _ => 0.0,
    }
}

/// Score a single taxon from the overall risk and current weather
pub fn estimate_type_score(
    pollen: &PollenType,
    month: u32,
    snapshot: Option<&WeatherSnapshot>,
    overall_score: u8,
) -> u8 {
    let (wind_boost, dry_boost, rain_penalty) = match snapshot {
        Some(s) => (
            clamp((s.wind - 2.0) * 6.0, 0.0, 18.0),
            clamp((50.0 - s.humidity) * 0.35, 0.0, 12.0),
            if s.precipitation > 0.0 { 12.0 } else { 0.0 },
        ),
        None => (6.0, 4.0, 0.0),
    };

    to_score(
        seasonal_factor(pollen, month) * 72.0
            + f64::from(overall_score) * 0.22
            + wind_boost
            + dry_boost
            - rain_penalty,
    )
}

/// Score every taxon in `catalog` and order them by descending score.
///
/// Ties keep catalog order.
pub fn rank_pollen_types(
    catalog: &[PollenType],
    month: u32,
    snapshot: Option<&WeatherSnapshot>,
    overall_score: u8,
) -> Vec<PollenTypeStatus> {
    let mut statuses: Vec<PollenTypeStatus> = catalog
        .iter()
        .map(|pollen| {
            let score = estimate_type_score(pollen, month, snapshot, overall_score);
            PollenTypeStatus {
                pollen: pollen.clone(),
                score,
                level: level_for_score(score),
                in_peak: pollen.is_peak(month),
            }
        })
        .collect();

    statuses.sort_by(|a, b| b.score.cmp(&a.score));
    statuses
}
