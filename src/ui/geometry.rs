// ============================================================================
// Géométrie des chandeliers
// ============================================================================
// Calcule le corps et les mèches d'un chandelier à partir de la boîte que
// la mise en page attribue à sa barre.
//
// ESPACE PIXEL (y vers le bas) :
// - La barre couvre l'intervalle [open, close]
// - y = pixel du close, y + height = pixel de l'open
// - height est donc négatif pour une chandelle baissière
//
//        │  ← mèche haute : (ref_haut - high) × ratio   (négatif = vers le haut)
//      ┌─┴─┐
//      │   │  corps
//      └─┬─┘
//        │  ← mèche basse : (ref_bas - low) × ratio    (positif = vers le bas)
//
// ratio = |height / (open - close)| = pixels par unité de prix
// ============================================================================

use crate::models::CandlePoint;

/// Couleur d'un chandelier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColor {
    /// close > open
    Green,
    /// close <= open (égalité comprise)
    Red,
}

/// Boîte de la barre [open, close] en pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Segment vertical partant de (x, y), de longueur signée dy (positif = vers le bas)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WickSegment {
    pub x: f64,
    pub y: f64,
    pub dy: f64,
}

impl WickSegment {
    pub fn end_y(&self) -> f64 {
        self.y + self.dy
    }

    pub fn length(&self) -> f64 {
        self.dy.abs()
    }
}

/// Résultat du calcul : tout ce qu'il faut pour dessiner un chandelier
#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub color: CandleColor,
    /// Coins du corps dans l'ordre du tracé : (x,y) → (x,y+h) → (x+w,y+h) → (x+w,y)
    pub body: [(f64, f64); 4],
    pub lower_wick: WickSegment,
    pub upper_wick: WickSegment,
    /// Pixels par unité de prix (0 si open == close)
    pub ratio: f64,
}

impl CandleGeometry {
    /// Calcule la géométrie d'un chandelier
    ///
    /// CONCEPT : Division gardée
    /// - open == close → height / 0 n'a pas de sens
    /// - ratio ramené à 0 : mèches de longueur nulle, pas de NaN/inf
    pub fn compute(bar: BarBox, open: f64, close: f64, low: f64, high: f64) -> Self {
        let is_growing = open < close;
        let color = if is_growing {
            CandleColor::Green
        } else {
            CandleColor::Red
        };

        let spread = open - close;
        let ratio = if spread == 0.0 {
            0.0
        } else {
            (bar.height / spread).abs()
        };
        let ratio = if ratio.is_finite() { ratio } else { 0.0 };

        let BarBox { x, y, width, height } = bar;
        let center_x = x + width / 2.0;

        let body = [(x, y), (x, y + height), (x + width, y + height), (x + width, y)];

        let lower_wick = WickSegment {
            x: center_x,
            y: if is_growing { y + height } else { y },
            dy: ((if is_growing { open } else { close }) - low) * ratio,
        };

        let upper_wick = WickSegment {
            x: center_x,
            y: if is_growing { y } else { y + height },
            dy: ((if is_growing { close } else { open }) - high) * ratio,
        };

        Self {
            color,
            body,
            lower_wick,
            upper_wick,
            ratio,
        }
    }

    /// Raccourci depuis un point de rendu
    pub fn for_point(bar: BarBox, point: &CandlePoint) -> Self {
        Self::compute(bar, point.open(), point.close(), point.low, point.high)
    }

    /// Chemins SVG (corps, mèche basse, mèche haute)
    pub fn svg_paths(&self) -> [String; 3] {
        let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = self.body;
        let body = format!(
            "M {},{} L {},{} L {},{} L {},{} L {},{}",
            x0, y0, x1, y1, x2, y2, x3, y3, x0, y0
        );
        let lower = format!(
            "M {},{} v {}",
            self.lower_wick.x, self.lower_wick.y, self.lower_wick.dy
        );
        let upper = format!(
            "M {},{} v {}",
            self.upper_wick.x, self.upper_wick.y, self.upper_wick.dy
        );
        [body, lower, upper]
    }

    /// Couleur SVG ("green" / "red")
    pub fn stroke(&self) -> &'static str {
        match self.color {
            CandleColor::Green => "green",
            CandleColor::Red => "red",
        }
    }
}

// ============================================================================
// Mise en page des barres
// ============================================================================

/// Part de la bande occupée par le corps
const BAR_WIDTH_RATIO: f64 = 0.6;

/// Échelle prix → pixel (y vers le bas) sur [min, max]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
    pub height: f64,
}

impl PriceScale {
    /// Pixel du prix ; un domaine plat place tout à mi-hauteur
    pub fn to_pixel(&self, price: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return self.height / 2.0;
        }
        (self.max - price) / span * self.height
    }
}

/// Calcule la boîte de chaque barre sur une zone width × height
///
/// Une bande de largeur égale par chandelier, corps centré sur 60 % de la bande.
pub fn candle_boxes(points: &[CandlePoint], width: f64, height: f64) -> Vec<BarBox> {
    let Some((min, max)) = crate::models::price_domain(points) else {
        return Vec::new();
    };

    let scale = PriceScale { min, max, height };
    let band = width / points.len() as f64;
    let bar_width = band * BAR_WIDTH_RATIO;

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let close_px = scale.to_pixel(point.close());
            let open_px = scale.to_pixel(point.open());
            BarBox {
                x: i as f64 * band + (band - bar_width) / 2.0,
                y: close_px,
                width: bar_width,
                height: open_px - close_px,
            }
        })
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
