//! Figure specification types.
//!
//! A `Figure` serializes to the JSON shape the browser-side plotting
//! library expects: a list of traces plus a layout carrying titles,
//! shapes (lines, rectangles) and annotations.

use credlens_core::types::AxisValue;
use serde::Serialize;

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One plotted series.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar {
        x: Vec<f64>,
        y: Vec<f64>,
        width: f64,
    },
    Scatter {
        x: Vec<AxisValue>,
        y: Vec<f64>,
        mode: String,
        marker: Marker,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Waterfall {
        base: f64,
        orientation: String,
        x: Vec<f64>,
        y: Vec<String>,
    },
}

/// Marker styling for scatter traces.
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: MarkerColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Vec<(f64, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// A fixed color, or one color value per point mapped through the
/// trace's colorscale.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    Fixed(String),
    Scale(Vec<f64>),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A line or rectangle drawn over the chart.
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub x0: AxisValue,
    pub x1: AxisValue,
    pub y0: f64,
    pub y1: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<ShapeLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl Shape {
    /// A vertical line at numeric `x` spanning `y0..y1`.
    pub fn vline(x: f64, y0: f64, y1: f64) -> Self {
        Self {
            shape_type: "line".to_string(),
            x0: AxisValue::Number(x),
            x1: AxisValue::Number(x),
            y0,
            y1,
            line: None,
            fillcolor: None,
        }
    }

    pub fn with_line(mut self, color: &str, dash: Option<&str>) -> Self {
        self.line = Some(ShapeLine {
            color: Some(color.to_string()),
            dash: dash.map(str::to_string),
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: AxisValue,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_serializes_with_type_tag() {
        let trace = Trace::Bar {
            x: vec![0.0, 0.1],
            y: vec![40.0, 60.0],
            width: 0.01,
        };
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["width"], 0.01);
    }

    #[test]
    fn empty_layout_omits_optional_fields() {
        let json = serde_json::to_value(Layout::default()).unwrap();
        assert!(json.get("shapes").is_none());
        assert!(json.get("title").is_none());
    }

    #[test]
    fn marker_color_serializes_untagged() {
        let fixed = serde_json::to_value(MarkerColor::Fixed("red".into())).unwrap();
        assert_eq!(fixed, "red");
        let scale = serde_json::to_value(MarkerColor::Scale(vec![0.1, 0.2])).unwrap();
        assert!(scale.is_array());
    }
}
