// ============================================================================
// Structure : DashboardData
// ============================================================================
// Agrégat des quatre jeux de données du dashboard
//
// Créé à la réception des quatre réponses, remplacé en bloc à chaque
// chargement. Pas de données partielles : soit les quatre, soit rien.
// ============================================================================

use anyhow::{Context, Result};

use crate::models::{CandleRecord, SeriesData};

/// Les quatre types de graphiques du dashboard
///
/// L'ordre de `ChartKind::all()` est l'ordre de la grille et du cycle Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
    Candlestick,
}

impl ChartKind {
    pub fn all() -> [ChartKind; 4] {
        [
            ChartKind::Pie,
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Candlestick,
        ]
    }

    /// Titre affiché dans le bloc du widget
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Candlestick => "Candlestick Chart",
        }
    }

    /// Position dans la grille (0..4)
    pub fn index(&self) -> usize {
        match self {
            ChartKind::Pie => 0,
            ChartKind::Bar => 1,
            ChartKind::Line => 2,
            ChartKind::Candlestick => 3,
        }
    }

    /// Graphique suivant (cycle)
    pub fn next(&self) -> ChartKind {
        match self {
            ChartKind::Pie => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Candlestick,
            ChartKind::Candlestick => ChartKind::Pie, // Boucle
        }
    }

    /// Graphique précédent (cycle)
    pub fn previous(&self) -> ChartKind {
        match self {
            ChartKind::Pie => ChartKind::Candlestick, // Boucle
            ChartKind::Bar => ChartKind::Pie,
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Candlestick => ChartKind::Line,
        }
    }
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Pie
    }
}

/// Données complètes du dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub pie: SeriesData,
    pub bar: SeriesData,
    pub line: SeriesData,
    pub candlestick: Vec<CandleRecord>,
}

impl DashboardData {
    /// Vérifie tous les invariants avant d'exposer les données à l'UI
    pub fn validate(&self) -> Result<()> {
        self.pie.validate().context("Données du camembert invalides")?;
        self.bar.validate().context("Données des barres invalides")?;
        self.line.validate().context("Données de la ligne invalides")?;
        for candle in &self.candlestick {
            candle.validate().context("Données candlestick invalides")?;
        }
        Ok(())
    }

    /// Nombre de points d'un graphique (borne du curseur de survol)
    pub fn len_of(&self, kind: ChartKind) -> usize {
        match kind {
            ChartKind::Pie => self.pie.len(),
            ChartKind::Bar => self.bar.len(),
            ChartKind::Line => self.line.len(),
            ChartKind::Candlestick => self.candlestick.len(),
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_cycle() {
        assert_eq!(ChartKind::Pie.next(), ChartKind::Bar);
        assert_eq!(ChartKind::Candlestick.next(), ChartKind::Pie); // Boucle
        assert_eq!(ChartKind::Pie.previous(), ChartKind::Candlestick);
        for (i, kind) in ChartKind::all().iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_validate_rejects_mismatched_series() {
        let data = DashboardData {
            bar: SeriesData::new(vec!["A".into(), "B".into()], vec![1.0]),
            ..Default::default()
        };
        let err = data.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("barres"));
    }

    #[test]
    fn test_len_of() {
        let data = DashboardData {
            line: SeriesData::new(vec!["A".into(), "B".into()], vec![1.0, 2.0]),
            candlestick: vec![CandleRecord::new("2024-01-01", 1.0, 2.0, 0.5, 1.5)],
            ..Default::default()
        };
        assert_eq!(data.len_of(ChartKind::Line), 2);
        assert_eq!(data.len_of(ChartKind::Candlestick), 1);
        assert_eq!(data.len_of(ChartKind::Pie), 0);
    }
}
