// ============================================================================
// Chart - Configuration du graphique de cours
// ============================================================================
// Construit la configuration déclarative (format Chart.js) du graphique ligne
// pour la série historique du ticker sélectionné.
//
// CONCEPTS RUST :
// 1. Structures Serialize : la config est sérialisée telle quelle en JSON
// 2. skip_serializing_if : les options absentes n'apparaissent pas
// 3. Iterator chaining : série historique -> labels + points
//
// Le dégradé de remplissage ne peut pas être un objet canvas ici : on le
// décrit (direction + arrêts de couleur) et la surface graphique le
// matérialise avec la hauteur réelle du canvas.
// ============================================================================

use serde::Serialize;

use crate::models::HistoricalSeries;

/// Ligne en hausse (vert)
pub const POSITIVE_LINE: &str = "rgba(34, 197, 94, 1)";
/// Ligne en baisse (rouge)
pub const NEGATIVE_LINE: &str = "rgba(248, 113, 113, 1)";
/// Début du dégradé en hausse
pub const POSITIVE_FILL: &str = "rgba(34, 197, 94, 0.3)";
/// Début du dégradé en baisse
pub const NEGATIVE_FILL: &str = "rgba(248, 113, 113, 0.3)";
/// Fin du dégradé (fond de page, transparent)
pub const FILL_END: &str = "rgba(13, 17, 23, 0)";

const TICK_COLOR: &str = "#8b949e";
const GRID_COLOR: &str = "#21262d";
const TICK_FONT: &str = "'Roboto Mono', monospace";

/// Configuration complète d'un graphique
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Série tracée
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: Gradient,
    pub border_width: u32,
    pub point_radius: u32,
    pub fill: bool,
    pub tension: f64,
}

/// Dégradé linéaire décrit par ses arrêts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub stops: Vec<ColorStop>,
}

/// Vertical : du haut (offset 0) vers le bas du canvas (offset 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
    pub plugins: Plugins,
    pub interaction: Interaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

/// Type d'axe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    Time,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: AxisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
    pub ticks: Ticks,
    pub grid: Grid,
}

/// Granularité des graduations de l'axe temporel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScale {
    pub unit: TimeUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub color: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Interaction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

/// Mode d'interaction (survol / tooltip)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    pub intersect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
    Nearest,
}

fn ticks() -> Ticks {
    Ticks {
        color: TICK_COLOR.to_string(),
        font: Font {
            family: TICK_FONT.to_string(),
        },
    }
}

/// Construit la configuration du graphique
///
/// - couleur verte si la variation du jour est >= 0, rouge sinon
/// - axe X temporel gradué par mois, axe Y linéaire
/// - tooltip : point le plus proche sur l'axe X, sans intersection exacte
pub fn build_chart_config(series: &HistoricalSeries, is_positive: bool) -> ChartConfig {
    let (line, fill) = if is_positive {
        (POSITIVE_LINE, POSITIVE_FILL)
    } else {
        (NEGATIVE_LINE, NEGATIVE_FILL)
    };

    let dataset = Dataset {
        label: "Close Price".to_string(),
        data: series.closes(),
        border_color: line.to_string(),
        background_color: Gradient {
            direction: GradientDirection::Vertical,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: fill.to_string(),
                },
                ColorStop {
                    offset: 1.0,
                    color: FILL_END.to_string(),
                },
            ],
        },
        border_width: 2,
        point_radius: 0,
        fill: true,
        tension: 0.1,
    };

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: series.labels(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: Scales {
                x: Axis {
                    kind: AxisKind::Time,
                    time: Some(TimeScale {
                        unit: TimeUnit::Month,
                    }),
                    ticks: ticks(),
                    grid: Grid {
                        display: Some(false),
                        color: None,
                    },
                },
                y: Axis {
                    kind: AxisKind::Linear,
                    time: None,
                    ticks: ticks(),
                    grid: Grid {
                        display: None,
                        color: Some(GRID_COLOR.to_string()),
                    },
                },
            },
            plugins: Plugins {
                legend: Legend { display: false },
                tooltip: Interaction {
                    mode: InteractionMode::Index,
                    axis: None,
                    intersect: false,
                },
            },
            interaction: Interaction {
                mode: InteractionMode::Nearest,
                axis: Some("x".to_string()),
                intersect: false,
            },
        },
    }
}
