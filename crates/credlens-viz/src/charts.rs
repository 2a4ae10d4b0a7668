//! Chart builders for the three dashboard figures.

use crate::figure::{Annotation, Axis, Figure, Layout, Marker, MarkerColor, Shape, Trace};
use credlens_core::types::{AxisValue, PanelBin, PanelHistogram};
use credlens_explain::{ScatterData, WaterfallSpec};

/// Height of the threshold marker line on the panel chart, in percent of
/// customers.
const PANEL_MARKER_HEIGHT: f64 = 15.0;

/// Half-width of the customer highlight rectangle on the risk scale.
const HIGHLIGHT_HALF_WIDTH: f64 = 0.005;

/// The panel histogram: distribution of estimated risk on the reference
/// panel, with the threshold marked and the selected customer's bin
/// highlighted.
pub fn panel_figure(
    histogram: &PanelHistogram,
    threshold: f64,
    highlight: Option<PanelBin>,
) -> Figure {
    let mut shapes = vec![
        Shape::vline(threshold, 0.0, PANEL_MARKER_HEIGHT).with_line("red", Some("dot")),
    ];
    if let Some(bin) = highlight {
        shapes.push(Shape {
            shape_type: "rect".to_string(),
            x0: AxisValue::Number(bin.edge - HIGHLIGHT_HALF_WIDTH),
            x1: AxisValue::Number(bin.edge + HIGHLIGHT_HALF_WIDTH),
            y0: 0.0,
            y1: bin.height,
            line: None,
            fillcolor: Some("yellow".to_string()),
        });
    }

    Figure {
        data: vec![Trace::Bar {
            x: histogram.edges.clone(),
            y: histogram.heights.clone(),
            width: 0.01,
        }],
        layout: Layout {
            title: Some("Distribution of estimated risk on a representative panel".to_string()),
            xaxis: Some(Axis {
                tickformat: Some(",.0%".to_string()),
                ..Axis::default()
            }),
            yaxis: Some(Axis::titled("% of customers")),
            shapes,
            annotations: vec![Annotation {
                text: format!("Maximum allowed risk ({:.0}%)", threshold * 100.0),
                x: AxisValue::Number(threshold),
                y: PANEL_MARKER_HEIGHT,
            }],
            ..Layout::default()
        },
    }
}

/// The horizontal waterfall from base value to final score, with base,
/// final-score and threshold markers.
pub fn waterfall_figure(spec: &WaterfallSpec, n_top: usize) -> Figure {
    let n = n_top as f64;
    let (labels, values): (Vec<String>, Vec<f64>) = spec
        .bars
        .iter()
        .map(|b| (b.label.clone(), b.value))
        .unzip();

    Figure {
        data: vec![Trace::Waterfall {
            base: spec.base_value,
            orientation: "h".to_string(),
            x: values,
            y: labels,
        }],
        layout: Layout {
            height: Some(200.0 + 25.0 * n),
            xaxis: Some(Axis::titled("Confidence score")),
            yaxis: Some(Axis {
                title: Some("Criteria".to_string()),
                side: Some("right".to_string()),
                ..Axis::default()
            }),
            shapes: vec![
                Shape::vline(spec.base_value, -1.0, 1.0),
                Shape::vline(spec.final_value, n, n + 1.0),
                Shape::vline(spec.threshold_position, -1.0, n + 1.0)
                    .with_line("red", Some("dot")),
            ],
            annotations: vec![
                Annotation {
                    text: "Base value".to_string(),
                    x: AxisValue::Number(spec.base_value),
                    y: 0.0,
                },
                Annotation {
                    text: format!("score = {:.3}", spec.final_value),
                    x: AxisValue::Number(spec.final_value),
                    y: n + 1.0,
                },
            ],
            ..Layout::default()
        },
    }
}

/// Partial-dependence scatter: population points colored by clipped risk,
/// the selected customer overlaid with guide lines.
pub fn scatter_figure(data: &ScatterData, threshold: f64) -> Figure {
    let (x, (impacts, risks)): (Vec<AxisValue>, (Vec<f64>, Vec<f64>)) = data
        .points
        .iter()
        .map(|p| (p.value.clone(), (p.impact, p.risk)))
        .unzip();

    let min_impact = impacts.iter().cloned().fold(f64::INFINITY, f64::min);

    let mut traces = vec![Trace::Scatter {
        x,
        y: impacts,
        mode: "markers".to_string(),
        marker: Marker {
            color: MarkerColor::Scale(risks),
            colorscale: Some(vec![
                (0.0, "green".to_string()),
                (0.5, "yellow".to_string()),
                (1.0, "red".to_string()),
            ]),
            cmin: Some(0.0),
            cmax: Some(threshold),
            size: None,
        },
        name: Some("panel".to_string()),
    }];

    let mut shapes = Vec::new();
    if let Some(marker) = &data.customer {
        traces.push(Trace::Scatter {
            x: vec![marker.value.clone()],
            y: vec![marker.impact],
            mode: "markers".to_string(),
            marker: Marker {
                color: MarkerColor::Fixed("red".to_string()),
                colorscale: None,
                cmin: None,
                cmax: None,
                size: Some(12),
            },
            name: Some("customer".to_string()),
        });
        // Guide lines only make sense on a numeric axis.
        if let AxisValue::Number(value) = marker.value {
            let min_value = data
                .points
                .iter()
                .filter_map(|p| match p.value {
                    AxisValue::Number(v) => Some(v),
                    AxisValue::Label(_) => None,
                })
                .fold(f64::INFINITY, f64::min);
            if min_impact.is_finite() {
                shapes.push(
                    Shape::vline(value, min_impact, marker.impact).with_line("red", Some("dot")),
                );
            }
            if min_value.is_finite() {
                shapes.push(
                    Shape {
                        shape_type: "line".to_string(),
                        x0: AxisValue::Number(min_value),
                        x1: AxisValue::Number(value),
                        y0: marker.impact,
                        y1: marker.impact,
                        line: None,
                        fillcolor: None,
                    }
                    .with_line("red", Some("dot")),
                );
            }
        }
    }

    Figure {
        data: traces,
        layout: Layout {
            xaxis: Some(Axis::titled("Criteria value")),
            yaxis: Some(Axis::titled("Impact")),
            shapes,
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credlens_explain::{build_waterfall, CustomerMarker, ScatterPoint};

    #[test]
    fn panel_figure_marks_threshold_and_highlight() {
        let hist = PanelHistogram::from_raw(vec![10.0, 90.0], vec![0.0, 0.1]);
        let bin = hist.bin_for(0.12).unwrap();
        let fig = panel_figure(&hist, 0.3, Some(bin));
        assert_eq!(fig.layout.shapes.len(), 2);
        assert_eq!(fig.layout.shapes[1].shape_type, "rect");
        assert_eq!(fig.layout.annotations.len(), 1);
        assert!(fig.layout.annotations[0].text.contains("30%"));
    }

    #[test]
    fn waterfall_figure_height_scales_with_n() {
        let names: Vec<String> = (0..10).map(|i| format!("f{}", i)).collect();
        let contributions: Vec<f64> = (0..10).map(|i| 0.01 * i as f64).collect();
        let spec = build_waterfall(&names, &contributions, 0.2, 5);
        let fig = waterfall_figure(&spec, 5);
        assert_eq!(fig.layout.height, Some(325.0));
        assert_eq!(fig.layout.shapes.len(), 3);
    }

    #[test]
    fn scatter_figure_overlays_customer_trace() {
        let data = ScatterData {
            feature: "AMT_CREDIT".to_string(),
            points: vec![ScatterPoint {
                value: AxisValue::Number(100.0),
                impact: 0.05,
                risk: 0.1,
            }],
            customer: Some(CustomerMarker {
                value: AxisValue::Number(120.0),
                impact: 0.07,
            }),
        };
        let fig = scatter_figure(&data, 0.3);
        assert_eq!(fig.data.len(), 2);
        assert!(!fig.layout.shapes.is_empty());
    }
}
