// ============================================================================
// Module : models
// ============================================================================
// Structures de données du dashboard : séries, chandelles, agrégat
// ============================================================================

pub mod series;    // Séries labels/valeurs (camembert, barres, ligne)
pub mod candle;    // Chandelles OHLC
pub mod dashboard; // Agrégat des quatre graphiques

// Re-export des structures principales pour simplifier les imports
pub use candle::{price_domain, shape_candles, CandlePoint, CandleRecord, CandlestickPayload};
pub use dashboard::{ChartKind, DashboardData};
pub use series::{shape, SeriesData, SeriesPoint};
