//! Series handed to the external plotting surface
//!
//! The games only compute these arrays; an external charting collaborator
//! renders them. Styles are plain strings the surface understands.

use serde::Serialize;

use crate::config::Theme;
use crate::functions::FunctionKind;

/// One renderable series: parallel coordinate arrays plus a style token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: String,
}

impl PlotSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>, style: &str) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self {
            x,
            y,
            style: style.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Line color for a function family under the given theme
pub fn series_style(kind: FunctionKind, theme: Theme) -> &'static str {
    match (kind, theme) {
        (FunctionKind::Linear, Theme::Light) => "#1f6fd6",
        (FunctionKind::Linear, Theme::Dark) => "#6ab0ff",
        (FunctionKind::Quadratic, Theme::Light) => "#c23a3a",
        (FunctionKind::Quadratic, Theme::Dark) => "#ff8a7a",
        (FunctionKind::Sine, Theme::Light) => "#1d8a50",
        (FunctionKind::Sine, Theme::Dark) => "#53d68a",
        (FunctionKind::Exponential, Theme::Light) => "#8a4fc2",
        (FunctionKind::Exponential, Theme::Dark) => "#c79bff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_differ_per_theme() {
        for kind in FunctionKind::ALL {
            assert_ne!(
                series_style(kind, Theme::Light),
                series_style(kind, Theme::Dark)
            );
        }
    }

    #[test]
    fn test_series_serializes_for_the_surface() {
        let series = PlotSeries::new(vec![0.0, 1.0], vec![2.0, 3.0], "#1f6fd6");
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.contains("\"x\":[0.0,1.0]"));
        assert!(json.contains("\"style\":\"#1f6fd6\""));
    }
}
