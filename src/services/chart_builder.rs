use crate::models::{MapChart, MapPoint, MapView, SeriesChart, StationSnapshot, TimedRecord, TraceStyle};

const ACTUAL_TRACE: (&str, &str) = ("Actual", "dimgray");
const PREDICTION_TRACE: (&str, &str) = ("Prediction", "orange");

fn trace((name, line_color): (&str, &str)) -> TraceStyle {
    TraceStyle { name: name.to_string(), line_color: line_color.to_string() }
}

/// Remaps a windowed series into the x axis and the two y series of the line chart.
pub fn build_series_chart(windowed: &[TimedRecord], farm_label: &str) -> SeriesChart {
    SeriesChart {
        xs: windowed.iter().map(|r| r.timestamp).collect(),
        actual: windowed.iter().map(|r| r.power).collect(),
        predicted: windowed.iter().map(|r| r.predicted_power).collect(),
        title: format!("Wind Power Prediction at {}", farm_label),
        traces: [trace(ACTUAL_TRACE), trace(PREDICTION_TRACE)],
        range_slider: true,
    }
}

/// Builds map points where both marker size and color encode current output.
pub fn build_map_chart(selected: &[StationSnapshot], as_of_local: &str, view: &MapView) -> MapChart {
    let points = selected
        .iter()
        .map(|s| MapPoint {
            lat: s.lat,
            lon: s.lon,
            label: s.name.clone(),
            size: s.current_output_mw,
            color_value: s.current_output_mw,
        })
        .collect();

    MapChart {
        points,
        title: format!("An Overview of Wind Power in {}, Last Update: {}", view.region, as_of_local),
        as_of_local: as_of_local.to_string(),
        view: view.clone(),
    }
}
