// ============================================================================
// Structure : SeriesData / SeriesPoint
// ============================================================================
// Données des graphiques camembert, barres et ligne
//
// Le backend envoie deux tableaux parallèles { labels: [...], data: [...] }
// qu'on transforme en une suite ordonnée de points { name, value }.
// L'ordre est celui d'affichage (important pour les barres et la ligne).
// ============================================================================

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Payload brut d'un endpoint de série (camembert, barres, ligne)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesData {
    /// Catégories, dans l'ordre d'affichage
    pub labels: Vec<String>,

    /// Valeurs associées, même longueur que `labels`
    pub data: Vec<f64>,
}

/// Un point de série prêt à être dessiné
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Combine labels et valeurs en points ordonnés
///
/// CONCEPT : Validation plutôt que troncature
/// - Si les longueurs diffèrent, le payload est rejeté
/// - Sinon result[i] = { labels[i], data[i] }, ordre conservé
pub fn shape(labels: &[String], data: &[f64]) -> Result<Vec<SeriesPoint>> {
    if labels.len() != data.len() {
        bail!(
            "Série invalide : {} labels pour {} valeurs",
            labels.len(),
            data.len()
        );
    }

    Ok(labels
        .iter()
        .zip(data)
        .map(|(label, &value)| SeriesPoint::new(label.clone(), value))
        .collect())
}

impl SeriesData {
    pub fn new(labels: Vec<String>, data: Vec<f64>) -> Self {
        Self { labels, data }
    }

    /// Points ordonnés de la série (voir [`shape`])
    pub fn points(&self) -> Result<Vec<SeriesPoint>> {
        shape(&self.labels, &self.data)
    }

    /// Vérifie que labels et valeurs sont alignés
    pub fn validate(&self) -> Result<()> {
        self.points().map(|_| ())
    }

    /// Somme des valeurs (dénominateur des pourcentages du camembert)
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shape_preserves_order() {
        let points = shape(&labels(&["Jan", "Feb", "Mar"]), &[3.0, 1.0, 2.0]).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], SeriesPoint::new("Jan", 3.0));
        assert_eq!(points[1], SeriesPoint::new("Feb", 1.0));
        assert_eq!(points[2], SeriesPoint::new("Mar", 2.0));
    }

    #[test]
    fn test_shape_rejects_length_mismatch() {
        let err = shape(&labels(&["Jan", "Feb"]), &[1.0]).unwrap_err();
        assert!(err.to_string().contains("2 labels pour 1 valeurs"));
    }

    #[test]
    fn test_shape_empty() {
        assert!(shape(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_series_data_from_json() {
        let json = r#"{ "labels": ["Red", "Blue"], "data": [30, 70] }"#;
        let series: SeriesData = serde_json::from_str(json).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.total(), 100.0);
        assert!(series.validate().is_ok());
    }
}
