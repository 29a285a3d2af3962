// ============================================================================
// Structure : CandleRecord / CandlePoint
// ============================================================================
// Représente une chandelle japonaise (candlestick) telle que servie par le
// backend, et sa forme dérivée pour le rendu.
//
// Invariant : low <= min(open, close) <= max(open, close) <= high
// ============================================================================

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Une chandelle telle que renvoyée par `/api/candlestick-data/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleRecord {
    /// Date de la période (ex: "2024-01-15")
    pub x: String,

    /// Prix le plus haut (High)
    pub high: f64,

    /// Prix le plus bas (Low)
    pub low: f64,

    /// Prix d'ouverture (Open)
    pub open: f64,

    /// Prix de clôture (Close)
    pub close: f64,
}

impl CandleRecord {
    pub fn new(x: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            x: x.into(),
            high,
            low,
            open,
            close,
        }
    }

    /// Vérifie l'invariant OHLC
    pub fn validate(&self) -> Result<()> {
        let values = [self.open, self.high, self.low, self.close];
        if values.iter().any(|v| !v.is_finite()) {
            bail!("Chandelle {} : valeur non finie", self.x);
        }

        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low || body_high > self.high {
            bail!(
                "Chandelle {} incohérente : low={} open={} close={} high={}",
                self.x,
                self.low,
                self.open,
                self.close,
                self.high
            );
        }

        Ok(())
    }

    /// Vérifie si la chandelle est haussière (close strictement > open)
    pub fn is_growing(&self) -> bool {
        self.open < self.close
    }
}

/// Forme dérivée pour le rendu : open et close regroupés dans `open_close`
///
/// Recalculée à chaque rendu, jamais modifiée après création.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    pub x: String,
    pub low: f64,
    pub high: f64,
    #[serde(rename = "openClose")]
    pub open_close: [f64; 2],
}

impl CandlePoint {
    pub fn open(&self) -> f64 {
        self.open_close[0]
    }

    pub fn close(&self) -> f64 {
        self.open_close[1]
    }
}

impl From<&CandleRecord> for CandlePoint {
    fn from(record: &CandleRecord) -> Self {
        Self {
            x: record.x.clone(),
            low: record.low,
            high: record.high,
            open_close: [record.open, record.close],
        }
    }
}

/// Transforme les chandelles brutes en points de rendu (1:1, ordre conservé)
pub fn shape_candles(records: &[CandleRecord]) -> Vec<CandlePoint> {
    records.iter().map(CandlePoint::from).collect()
}

// ============================================================================
// Payload de l'endpoint candlestick
// ============================================================================
// CONCEPT SERDE : #[serde(untagged)]
// - Le backend renvoie soit un tableau nu, soit { "data": [...] }
// - serde essaie chaque variant dans l'ordre
// - On normalise ici, le reste du code ne voit qu'un Vec<CandleRecord>
// ============================================================================

/// Les deux formes acceptées pour la réponse candlestick
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CandlestickPayload {
    /// `[ {x, high, low, open, close}, ... ]`
    Bare(Vec<CandleRecord>),

    /// `{ "data": [ ... ] }`
    Wrapped { data: Vec<CandleRecord> },
}

impl CandlestickPayload {
    pub fn into_records(self) -> Vec<CandleRecord> {
        match self {
            CandlestickPayload::Bare(records) => records,
            CandlestickPayload::Wrapped { data } => data,
        }
    }
}

/// Bornes de prix de l'axe Y : [min(low, open, close), max(high, open, close)]
pub fn price_domain(points: &[CandlePoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }

    let min = points
        .iter()
        .map(|p| p.low.min(p.open()).min(p.close()))
        .fold(f64::INFINITY, f64::min);
    let max = points
        .iter()
        .map(|p| p.high.max(p.open()).max(p.close()))
        .fold(f64::NEG_INFINITY, f64::max);

    Some((min, max))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(CandleRecord::new("2024-01-01", 10.0, 24.0, 8.0, 20.0).validate().is_ok());
        assert!(CandleRecord::new("2024-01-02", 15.0, 15.0, 15.0, 15.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_low_above_body() {
        let candle = CandleRecord::new("2024-01-01", 10.0, 24.0, 12.0, 20.0);
        assert!(candle.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let candle = CandleRecord::new("2024-01-01", f64::NAN, 24.0, 8.0, 20.0);
        assert!(candle.validate().is_err());
    }

    #[test]
    fn test_shape_candles() {
        let records = vec![
            CandleRecord::new("2024-01-01", 10.0, 24.0, 8.0, 20.0),
            CandleRecord::new("2024-01-02", 20.0, 24.0, 8.0, 10.0),
        ];

        let points = shape_candles(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, "2024-01-01");
        assert_eq!(points[0].open_close, [10.0, 20.0]);
        assert_eq!(points[1].open(), 20.0);
        assert_eq!(points[1].close(), 10.0);
        assert_eq!(points[1].low, 8.0);
        assert_eq!(points[1].high, 24.0);
    }

    #[test]
    fn test_payload_bare_array() {
        let json = r#"[{ "x": "2024-01-01", "high": 24, "low": 8, "open": 10, "close": 20 }]"#;
        let payload: CandlestickPayload = serde_json::from_str(json).unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].close, 20.0);
    }

    #[test]
    fn test_payload_wrapped() {
        let json = r#"{ "data": [{ "x": "2024-01-01", "high": 24, "low": 8, "open": 10, "close": 20 }] }"#;
        let payload: CandlestickPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_records()[0].x, "2024-01-01");
    }

    #[test]
    fn test_payload_rejects_garbage() {
        assert!(serde_json::from_str::<CandlestickPayload>(r#"{ "rows": [] }"#).is_err());
    }

    #[test]
    fn test_price_domain() {
        let points = shape_candles(&[
            CandleRecord::new("a", 10.0, 24.0, 8.0, 20.0),
            CandleRecord::new("b", 20.0, 30.0, 9.0, 10.0),
        ]);
        assert_eq!(price_domain(&points), Some((8.0, 30.0)));
        assert_eq!(price_domain(&[]), None);
    }
}
