use racechart::api::{
    ChartKind, HighlightKey, RenderOptions, build_frame, build_net_time_histogram_frame,
    build_net_times_frame, render_all, render_svg,
};
use racechart::core::{ResultRecord, filter_finishers, parse_results_json};
use racechart::render::{CanvasLayerKind, NullRenderer, Primitive, Renderer};
use racechart::ChartError;

fn scenario_records() -> Vec<ResultRecord> {
    vec![
        ResultRecord::new("1", "00:45:12,000", "08:00:00"),
        ResultRecord::new("2", "00:46:30,500", "08:00:05"),
        ResultRecord::new("0", "", ""),
    ]
}

fn series_tooltips(kind: ChartKind, records: &[ResultRecord]) -> Vec<String> {
    let frame = build_frame(kind, records, &RenderOptions::default()).expect("frame");
    frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => rect.tooltip.clone(),
            Primitive::Circle(circle) => circle.tooltip.clone(),
            _ => None,
        })
        .collect()
}

#[test]
fn finisher_filter_keeps_records_with_net_time() {
    assert_eq!(filter_finishers(&scenario_records()).len(), 2);
}

#[test]
fn one_minute_histogram_has_two_non_empty_bins() {
    let records = scenario_records();
    let frame =
        build_net_time_histogram_frame(&records, &RenderOptions::default()).expect("frame");
    let bars: Vec<_> = frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].tooltip.as_deref(), Some("00:45-00:46: 1"));
    assert_eq!(bars[1].tooltip.as_deref(), Some("00:46-00:47: 1"));
    assert!(bars[0].x < bars[1].x);
}

#[test]
fn net_times_scatter_plots_points_in_input_order() {
    let records = scenario_records();
    let frame = build_net_times_frame(&records, &RenderOptions::default()).expect("frame");
    let points: Vec<(f64, f64)> = frame
        .layer(CanvasLayerKind::Series)
        .iter()
        .filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some((circle.cx, circle.cy)),
            _ => None,
        })
        .collect();

    assert_eq!(points.len(), 2);
    assert!(points[0].0 < points[1].0, "x follows input index");
    assert!(points[0].1 > points[1].1, "faster runner sits lower");
}

#[test]
fn stacked_histogram_tooltips_name_finish_range_and_start_bucket() {
    let tooltips = series_tooltips(ChartKind::StartBucketHistogram, &scenario_records());
    assert_eq!(
        tooltips,
        vec![
            "Finish 00:45-00:46\nStart bucket 1: 1".to_owned(),
            "Finish 00:46-00:47\nStart bucket 30: 1".to_owned(),
        ]
    );
}

#[test]
fn start_windows_span_finishers_with_unparseable_net_time() {
    let records = vec![
        ResultRecord::new("1", "00:45:12,000", "08:00:00"),
        ResultRecord::new("2", "00:46:30,500", "08:00:30"),
        ResultRecord::new("3", "n/a", "08:05:00"),
    ];
    let tooltips = series_tooltips(ChartKind::StartBucketHistogram, &records);
    assert_eq!(
        tooltips,
        vec![
            "Finish 00:45-00:46\nStart bucket 1: 1".to_owned(),
            "Finish 00:46-00:47\nStart bucket 4: 1".to_owned(),
        ]
    );
}

#[test]
fn start_vs_finish_tooltips_show_offset_and_net_time() {
    let records = vec![
        ResultRecord::new("1", "00:45:12,000", "08:00:00").with_name("Kowalski", "Jan"),
        ResultRecord::new("2", "00:46:30,500", "08:01:05").with_name("Nowak", "Ewa"),
    ];
    let tooltips = series_tooltips(ChartKind::StartVsFinish, &records);
    assert_eq!(
        tooltips,
        vec![
            "Kowalski Jan - Start: +0:00, Net time: 00:45:12".to_owned(),
            "Nowak Ewa - Start: +1:05, Net time: 00:46:30".to_owned(),
        ]
    );
}

#[test]
fn rendering_is_idempotent_for_every_chart() {
    let records = scenario_records();
    let options = RenderOptions::default().with_highlight(HighlightKey::bib("1"));
    for kind in ChartKind::ALL {
        let first = render_svg(kind, &records, &options).expect("first render");
        let second = render_svg(kind, &records, &options).expect("second render");
        assert_eq!(first, second, "{kind:?} output differs between runs");
        assert!(first.starts_with("<?xml"));
    }
}

#[test]
fn every_chart_frame_is_valid_for_the_null_renderer() {
    let records = scenario_records();
    for kind in ChartKind::ALL {
        let frame = build_frame(kind, &records, &RenderOptions::default()).expect("frame");
        let mut renderer = NullRenderer::default();
        renderer.render(&frame).expect("valid frame");
        assert!(renderer.last_text_count > 0);
        assert!(renderer.last_line_count > 0);
    }
}

#[test]
fn tall_canvas_is_used_for_start_vs_finish() {
    let svg = render_svg(
        ChartKind::StartVsFinish,
        &scenario_records(),
        &RenderOptions::default(),
    )
    .expect("svg");
    assert!(svg.contains(r#"width="1200" height="800""#));
}

#[test]
fn no_finishers_is_an_error() {
    let records = vec![ResultRecord::new("0", "", "")];
    for kind in ChartKind::ALL {
        assert!(matches!(
            render_svg(kind, &records, &RenderOptions::default()),
            Err(ChartError::NoFinishers)
        ));
    }
}

#[test]
fn unparseable_net_times_are_reported() {
    let records = vec![ResultRecord::new("1", "DNF", "08:00")];
    assert!(matches!(
        render_svg(ChartKind::NetTimes, &records, &RenderOptions::default()),
        Err(ChartError::NoParseableTimes { field: "net time" })
    ));
}

#[test]
fn names_are_escaped_in_tooltips_and_labels() {
    let records = vec![
        ResultRecord::new("1", "00:40:00,000", "08:00").with_name("O'Brien", "<Tom>"),
        ResultRecord::new("2", "00:41:00,000", "08:00"),
    ];
    let options = RenderOptions::default().with_highlight(HighlightKey::name("O'Brien <Tom>"));
    let svg = render_svg(ChartKind::NetTimes, &records, &options).expect("svg");
    assert!(svg.contains("O&apos;Brien &lt;Tom&gt;"));
    assert!(!svg.contains("<Tom>"));
}

#[test]
fn highlights_draw_one_marker_per_runner() {
    let records = vec![
        ResultRecord::new("1", "00:40:00,000", "08:00").with_bib("7"),
        ResultRecord::new("2", "00:41:00,000", "08:00").with_bib("8"),
        ResultRecord::new("3", "00:43:00,000", "08:01").with_bib("9"),
    ];
    let options = RenderOptions::default()
        .with_highlight(HighlightKey::bib("7"))
        .with_highlight(HighlightKey::bib("9"));
    for kind in ChartKind::ALL {
        let frame = build_frame(kind, &records, &options).expect("frame");
        assert_eq!(frame.definitions.iter().filter(|d| d.id().starts_with("highlight-arrow-")).count(), 2);
        let circles = frame
            .layer(CanvasLayerKind::Highlight)
            .iter()
            .filter(|primitive| matches!(primitive, Primitive::Circle(_)))
            .count();
        assert_eq!(circles, 2, "{kind:?}");
    }
}

#[test]
fn distance_option_restricts_plotted_runners() {
    let json = r#"[
        {"msc": "1", "czasnetto": "00:20:00,000", "start": "09:00", "odleglosc": "5000.00"},
        {"msc": "1", "czasnetto": "00:40:00,000", "start": "09:00", "odleglosc": "10000.00"},
        {"msc": "2", "czasnetto": "00:42:00,000", "start": "09:01", "odleglosc": "10000.00"}
    ]"#;
    let records = parse_results_json(json).expect("records");
    let options = RenderOptions::default().with_distance("10000.00");
    assert_eq!(series_points(&records, &options), 2);
    assert_eq!(series_points(&records, &RenderOptions::default()), 3);
}

#[test]
fn outlier_net_time_fails_histograms_without_panicking() {
    let records = vec![
        ResultRecord::new("1", "00:45:12,000", "08:00:00"),
        ResultRecord::new("2", "4000000000000000:00:00,000", "08:00:05"),
    ];

    for (kind, result) in render_all(&records, &RenderOptions::default()) {
        match kind {
            ChartKind::NetTimeHistogram | ChartKind::StartBucketHistogram => {
                assert!(matches!(result, Err(ChartError::InvalidData(_))), "{kind:?}");
            }
            ChartKind::NetTimes | ChartKind::StartVsFinish => {
                assert!(result.is_ok(), "{kind:?}");
            }
        }
    }
}

#[test]
fn overflowing_net_time_is_skipped_not_fatal() {
    let records = vec![
        ResultRecord::new("1", "00:45:12,000", "08:00:00"),
        ResultRecord::new("2", "1e306:00:00,000", "08:00:05"),
    ];
    assert_eq!(series_points(&records, &RenderOptions::default()), 1);
    assert!(render_svg(ChartKind::NetTimes, &records, &RenderOptions::default()).is_ok());
}

fn series_points(records: &[ResultRecord], options: &RenderOptions) -> usize {
    build_frame(ChartKind::NetTimes, records, options)
        .expect("frame")
        .layer(CanvasLayerKind::Series)
        .len()
}
