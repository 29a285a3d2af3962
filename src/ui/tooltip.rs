// ============================================================================
// Tooltips : formatage du point survolé
// ============================================================================
// Fonctions pures : point (+ contexte) → bloc de texte
// - barres / ligne : label + valeur
// - camembert      : nom + valeur + pourcentage du total
// - chandeliers    : date + OHLC
// ============================================================================

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{CandlePoint, SeriesPoint};

/// Bloc de texte affiché dans le panneau de tooltip
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

/// Options de formatage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipOptions {
    /// Jours ajoutés à la date des chandelles avant affichage
    pub candle_date_offset_days: i64,
}

/// Tooltip barres / ligne
pub fn series_tooltip(point: &SeriesPoint) -> Tooltip {
    Tooltip {
        title: point.name.clone(),
        lines: vec![format!("value : {}", point.value)],
    }
}

/// Tooltip camembert
///
/// Même dénominateur que les secteurs : seules les valeurs positives comptent,
/// une valeur nulle ou négative affiche 0.00 %.
pub fn pie_tooltip(point: &SeriesPoint, all: &[SeriesPoint]) -> Tooltip {
    let total: f64 = all.iter().map(|p| p.value).filter(|v| *v > 0.0).sum();
    let percentage = if total <= 0.0 || point.value <= 0.0 {
        0.0
    } else {
        point.value / total * 100.0
    };

    Tooltip {
        title: point.name.clone(),
        lines: vec![
            format!("Value: {}", point.value),
            format!("Percentage: {:.2}%", percentage),
        ],
    }
}

/// Tooltip chandelier
pub fn candle_tooltip(point: &CandlePoint, options: &TooltipOptions) -> Tooltip {
    let shifted = parse_date(&point.x).and_then(|date| {
        Duration::try_days(options.candle_date_offset_days)
            .and_then(|offset| date.checked_add_signed(offset))
    });
    let date = match shifted {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => point.x.clone(),
    };

    Tooltip {
        title: format!("Date: {}", date),
        lines: vec![
            format!("Open: {}", point.open()),
            format!("High: {}", point.high),
            format!("Low: {}", point.low),
            format!("Close: {}", point.close()),
        ],
    }
}

/// Graduation de l'axe X : YYYY-MM-DD si la valeur est une date, sinon telle quelle
pub fn format_date_tick(x: &str) -> String {
    parse_date(x)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| x.to_string())
}

/// Date calendaire : telle quelle pour YYYY-MM-DD, date UTC pour un horodatage RFC 3339
fn parse_date(x: &str) -> Option<NaiveDate> {
    let x = x.trim();
    NaiveDate::parse_from_str(x, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(x)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandleRecord;

    fn pie_points() -> Vec<SeriesPoint> {
        vec![SeriesPoint::new("Red", 30.0), SeriesPoint::new("Blue", 70.0)]
    }

    #[test]
    fn test_series_tooltip() {
        let tooltip = series_tooltip(&SeriesPoint::new("Q2", 8.0));
        assert_eq!(tooltip.title, "Q2");
        assert_eq!(tooltip.lines, vec!["value : 8"]);

        let tooltip = series_tooltip(&SeriesPoint::new("Feb", 2.5));
        assert_eq!(tooltip.lines, vec!["value : 2.5"]);
    }

    #[test]
    fn test_pie_tooltip_percentage() {
        let points = pie_points();
        let tooltip = pie_tooltip(&points[0], &points);
        assert_eq!(tooltip.title, "Red");
        assert_eq!(tooltip.lines, vec!["Value: 30", "Percentage: 30.00%"]);
    }

    #[test]
    fn test_pie_tooltip_agrees_with_legend() {
        let points = vec![
            SeriesPoint::new("Red", 30.0),
            SeriesPoint::new("Blue", 70.0),
            SeriesPoint::new("Neg", -50.0),
        ];
        let slices = crate::ui::pie::pie_slices(&points);

        for slice in &slices {
            let tooltip = pie_tooltip(&points[slice.index], &points);
            assert_eq!(tooltip.lines[1], format!("Percentage: {:.2}%", slice.percent));
        }
        assert_eq!(pie_tooltip(&points[0], &points).lines[1], "Percentage: 30.00%");
        assert_eq!(slices[0].legend(), "Red 30%");
        assert_eq!(pie_tooltip(&points[2], &points).lines[1], "Percentage: 0.00%");
    }

    #[test]
    fn test_pie_tooltip_zero_total() {
        let points = vec![SeriesPoint::new("A", 0.0), SeriesPoint::new("B", 0.0)];
        let tooltip = pie_tooltip(&points[0], &points);
        assert_eq!(tooltip.lines[1], "Percentage: 0.00%");
    }

    #[test]
    fn test_candle_tooltip() {
        let point = CandlePoint::from(&CandleRecord::new("2024-01-15", 10.0, 24.0, 8.0, 20.5));
        let tooltip = candle_tooltip(&point, &TooltipOptions::default());

        assert_eq!(tooltip.title, "Date: 2024-01-15");
        assert_eq!(
            tooltip.lines,
            vec!["Open: 10", "High: 24", "Low: 8", "Close: 20.5"]
        );
    }

    #[test]
    fn test_candle_tooltip_date_offset() {
        let point = CandlePoint::from(&CandleRecord::new("2024-01-31", 1.0, 2.0, 1.0, 2.0));
        let options = TooltipOptions { candle_date_offset_days: 1 };
        assert_eq!(candle_tooltip(&point, &options).title, "Date: 2024-02-01");
    }

    #[test]
    fn test_candle_tooltip_unparseable_date() {
        let point = CandlePoint::from(&CandleRecord::new("week 3", 1.0, 2.0, 1.0, 2.0));
        let options = TooltipOptions { candle_date_offset_days: 1 };
        assert_eq!(candle_tooltip(&point, &options).title, "Date: week 3");
    }

    #[test]
    fn test_format_date_tick() {
        assert_eq!(format_date_tick("2024-01-15"), "2024-01-15");
        assert_eq!(format_date_tick("2024-01-15T22:00:00+00:00"), "2024-01-15");
        assert_eq!(format_date_tick("Q1"), "Q1");
    }

    #[test]
    fn test_format_date_tick_uses_utc_date() {
        assert_eq!(format_date_tick("2024-01-15T22:00:00-05:00"), "2024-01-16");
        assert_eq!(format_date_tick("2024-01-16T01:00:00+02:00"), "2024-01-15");

        let point = CandlePoint::from(&CandleRecord::new("2024-01-15T22:00:00-05:00", 1.0, 2.0, 1.0, 2.0));
        assert_eq!(candle_tooltip(&point, &TooltipOptions::default()).title, "Date: 2024-01-16");
    }
}
