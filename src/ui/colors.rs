// ============================================================================
// Couleurs des catégories
// ============================================================================
// Table fixe label → couleur hexadécimale, avec une couleur par défaut.
// Correspondance exacte, sensible à la casse ("red" n'est pas "Red").
// ============================================================================

use ratatui::style::Color;

/// Table des couleurs connues (teintes claires)
const COLOR_TABLE: [(&str, &str); 10] = [
    ("Red", "#FF6B6B"),
    ("Blue", "#4D96FF"),
    ("Yellow", "#FFD93D"),
    ("Green", "#6BCB77"),
    ("Purple", "#B39DDB"),
    ("Orange", "#FFA500"),
    ("Pink", "#FF69B4"),
    ("Cyan", "#00CED1"),
    ("Lime", "#32CD32"),
    ("Brown", "#A52A2A"),
];

/// Couleur des labels absents de la table (gris clair)
pub const DEFAULT_COLOR: &str = "#CCCCCC";

/// Couleur des séries barres et ligne
pub const SERIES_COLOR: &str = "#8884d8";

/// Retourne la couleur hexadécimale d'un label
pub fn resolve(label: &str) -> &'static str {
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, hex)| *hex)
        .unwrap_or(DEFAULT_COLOR)
}

/// Convertit "#RRGGBB" en couleur terminal (FromStr de ratatui)
///
/// Une entrée mal formée donne la couleur par défaut.
pub fn hex_to_color(hex: &str) -> Color {
    hex.parse::<Color>()
        .or_else(|_| DEFAULT_COLOR.parse())
        .unwrap_or(Color::Gray)
}

/// Couleur terminal d'un label
pub fn resolve_color(label: &str) -> Color {
    hex_to_color(resolve(label))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_labels() {
        for (label, hex) in COLOR_TABLE {
            assert_eq!(resolve(label), hex);
        }
    }

    #[test]
    fn test_resolve_fallback() {
        assert_eq!(resolve("Teal"), DEFAULT_COLOR);
        assert_eq!(resolve(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(resolve("red"), DEFAULT_COLOR);
        assert_eq!(resolve("Red "), DEFAULT_COLOR);
    }

    #[test]
    fn test_hex_to_color() {
        assert_eq!(hex_to_color("#FF6B6B"), Color::Rgb(0xFF, 0x6B, 0x6B));
        assert_eq!(hex_to_color("#8884d8"), Color::Rgb(0x88, 0x84, 0xD8));
        assert_eq!(hex_to_color("#12345"), Color::Rgb(0xCC, 0xCC, 0xCC));
        assert_eq!(hex_to_color("#GG0000"), Color::Rgb(0xCC, 0xCC, 0xCC));
        assert_eq!(resolve_color("Blue"), Color::Rgb(0x4D, 0x96, 0xFF));
    }

    #[test]
    fn test_hex_to_color_matches_ratatui_parsing() {
        for (_, hex) in COLOR_TABLE {
            assert_eq!(Some(hex_to_color(hex)), hex.parse::<Color>().ok());
        }
        assert_eq!("#8884d8".parse::<Color>().ok(), Some(hex_to_color(SERIES_COLOR)));
    }
}
