// ============================================================================
// Structure : HistoricalSeries
// ============================================================================
// Série de clôtures journalières utilisée uniquement par le graphique
//
// FMP (/historical-price-full/{symbol}) renvoie les jours du plus récent au
// plus ancien ; on inverse une fois à la construction pour que la série soit
// toujours chronologique.
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Un point (date, clôture)
///
/// CONCEPT RUST : NaiveDate + serde
/// - chrono désérialise directement "2024-01-02" en NaiveDate
/// - Les champs en trop (open, high, volume...) sont ignorés
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Série chronologique (ordre croissant des dates)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoricalSeries {
    pub symbol: String,
    points: Vec<HistoricalPoint>,
}

impl HistoricalSeries {
    /// Construit une série à partir de points déjà chronologiques
    pub fn new(symbol: impl Into<String>, points: Vec<HistoricalPoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// Construit une série à partir de l'ordre upstream (plus récent d'abord)
    pub fn from_descending(symbol: impl Into<String>, mut points: Vec<HistoricalPoint>) -> Self {
        points.reverse();
        Self::new(symbol, points)
    }

    /// Dates au format ISO, dans l'ordre chronologique
    pub fn labels(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// Clôtures, dans l'ordre chronologique
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_descending_reverses() {
        let series = HistoricalSeries::from_descending(
            "AAPL",
            vec![
                HistoricalPoint::new(date(2024, 3, 1), 3.0),
                HistoricalPoint::new(date(2024, 2, 1), 2.0),
                HistoricalPoint::new(date(2024, 1, 1), 1.0),
            ],
        );

        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.labels(), vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_point_deserialization_ignores_extra_fields() {
        let point: HistoricalPoint = serde_json::from_str(
            r#"{"date":"2024-05-17","open":189.5,"high":190.8,"low":189.1,"close":189.87,"volume":41282925}"#,
        )
        .unwrap();
        assert_eq!(point.date, date(2024, 5, 17));
        assert_eq!(point.close, 189.87);
    }
}
