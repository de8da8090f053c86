//! End-to-end pipeline tests: JSON dataset in, SVG/PNG out.

use termica::prelude::*;

/// Three years of synthetic records around an 8.66°C base.
fn sample_json() -> String {
    let mut records = Vec::new();
    for (i, year) in (1900..=1902).enumerate() {
        for month in 1..=12 {
            // Spread variances so every year has both cold and warm months
            let variance = -1.5 + 0.25 * month as f64 + 0.1 * i as f64;
            records.push(format!(
                r#"{{ "year": {year}, "month": {month}, "variance": {variance:.3} }}"#
            ));
        }
    }
    format!(
        r#"{{ "baseTemperature": 8.66, "monthlyVariance": [{}] }}"#,
        records.join(",")
    )
}

fn chart() -> CalendarHeatmap {
    let dataset = Dataset::from_json_str(&sample_json()).expect("sample dataset parses");
    CalendarHeatmap::new().dataset(dataset).build().expect("sample chart builds")
}

#[test]
fn full_pipeline_produces_one_rect_per_record() {
    let layout = chart().layout().unwrap();
    assert_eq!(layout.cells().len(), 36);

    let svg = layout.svg().render();
    assert_eq!(svg.matches("data-year=").count(), 36);
    assert_eq!(svg.matches("<title>").count(), 36);
}

#[test]
fn rendering_is_deterministic() {
    let c = chart();
    let first = c.to_svg().unwrap();
    let second = c.to_svg().unwrap();
    assert_eq!(first, second, "repeated renders must be byte-identical");

    let fb_a = c.to_framebuffer().unwrap();
    let fb_b = c.to_framebuffer().unwrap();
    assert_eq!(fb_a.pixels(), fb_b.pixels());
}

#[test]
fn layout_recomputed_wholesale_per_dataset() {
    let small = Dataset::from_json_str(
        r#"{
            "baseTemperature": 5.0,
            "monthlyVariance": [
                { "year": 1950, "month": 1, "variance": -2.0 },
                { "year": 1955, "month": 6, "variance": 3.0 }
            ]
        }"#,
    )
    .unwrap();

    let a = chart().layout().unwrap();
    let b = CalendarHeatmap::new().dataset(small).build().unwrap().layout().unwrap();

    assert_eq!(a.cells().len(), 36);
    assert_eq!(b.cells().len(), 2);
    assert_ne!(a.year_extent, b.year_extent);
}

#[test]
fn hover_round_trip_through_hit_testing() {
    let layout = chart().layout().unwrap();
    let mut hover = HoverState::new();

    // Resolve a pointer position to a cell, then drive the hover events
    let target = layout.cells()[17].rect.center();
    let index = layout.cell_at(target).expect("pointer over the grid hits a cell");
    assert_eq!(index, 17);

    let response = hover.on_enter(&layout, index).expect("valid index yields a tooltip");
    assert_eq!(response.anchor, layout.cells()[17].rect);
    assert!(response.tooltip.title.contains(" - "));
    assert_eq!(response.tooltip.lines.len(), 2);
    assert!(response.tooltip.lines[0].ends_with("°C"));

    hover.on_leave();
    assert_eq!(hover.active(), None);
}

#[test]
fn tooltip_reference_values() {
    let dataset = Dataset::from_json_str(
        r#"{
            "baseTemperature": 8.66,
            "monthlyVariance": [
                { "year": 1900, "month": 1, "variance": -1.234 },
                { "year": 1900, "month": 2, "variance": 0.9 }
            ]
        }"#,
    )
    .unwrap();

    let tooltip = Tooltip::format(&dataset.records[0], dataset.base_temperature).unwrap();
    assert_eq!(tooltip.title, "1900 - January");
    assert_eq!(tooltip.lines, vec!["7.4°C".to_string(), "-1.2°C".to_string()]);
}

#[test]
fn svg_and_png_files_written() {
    let dir = tempfile::tempdir().unwrap();
    let svg_path = dir.path().join("heatmap.svg");
    let png_path = dir.path().join("heatmap.png");

    let c = chart();
    c.write_svg(&svg_path).unwrap();
    c.write_png(&png_path).unwrap();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));

    let png = std::fs::read(&png_path).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn malformed_and_degenerate_inputs_refused() {
    // Malformed JSON
    assert!(Dataset::from_json_str("{").is_err());

    // Missing records field
    assert!(Dataset::from_json_str(r#"{ "baseTemperature": 1.0 }"#).is_err());

    // Empty records
    assert!(matches!(
        Dataset::from_json_str(r#"{ "baseTemperature": 1.0, "monthlyVariance": [] }"#),
        Err(Error::EmptyData)
    ));

    // Out-of-range month
    let bad_month = r#"{
        "baseTemperature": 1.0,
        "monthlyVariance": [ { "year": 2000, "month": 0, "variance": 0.5 } ]
    }"#;
    assert!(matches!(
        Dataset::from_json_str(bad_month),
        Err(Error::InvalidRecord { year: 2000, month: 0 })
    ));
}

#[test]
fn lenient_ingestion_skips_bad_records() {
    let json = r#"{
        "baseTemperature": 8.66,
        "monthlyVariance": [
            { "year": 1900, "month": 1, "variance": -1.0 },
            { "year": 1900, "month": 13, "variance": 9.9 },
            { "year": 1901, "month": 2, "variance": 1.0 }
        ]
    }"#;

    let mut dataset: Dataset = serde_json::from_str(json).unwrap();
    assert_eq!(dataset.retain_valid(), 1);

    let layout = CalendarHeatmap::new().dataset(dataset).build().unwrap().layout().unwrap();
    assert_eq!(layout.cells().len(), 2);
}

#[test]
fn raster_output_colors_match_layout() {
    let layout = chart().layout().unwrap();
    let fb = layout.rasterize().unwrap();

    for cell in layout.cells().iter().step_by(7) {
        let center = cell.rect.center();
        let px = fb.pixel(center.x as u32, center.y as u32).unwrap();
        assert_eq!(px, cell.color);
    }
}
