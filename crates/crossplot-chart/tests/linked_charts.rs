//! Linked chart integration tests.
//!
//! These tests verify that brushing one chart updates the others, that
//! charts keep their own context while brushed, and that view adapters are
//! only told about charts that changed.

use chrono::{DateTime, Duration, Utc};
use crossplot_chart::*;
use crossplot_filter::{FilterOutcome, Record, RecordStore};
use crossplot_test_utils::fixtures;
use std::cell::RefCell;
use std::rc::Rc;

const DAY: f64 = 86_400_000.0;

/// Four days, two records per day. `a` counts up, `b` alternates 1/2.
fn store() -> RecordStore {
    (0..8)
        .map(|i| {
            Record::new()
                .with("dd", fixtures::EPOCH_START as f64 + (i / 2) as f64 * DAY + 1_000.0)
                .with("a", i as f64)
                .with("b", (i % 2 + 1) as f64)
        })
        .collect()
}

fn day(n: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(fixtures::EPOCH_START).unwrap() + Duration::days(n)
}

#[test]
fn test_layout_defaults() {
    let mut dashboard = Dashboard::new(store());
    let id = dashboard
        .add_chart(LinkedChartBuilder::new("a").title("Injured").layer("Events"))
        .unwrap();
    let chart = dashboard.chart(id).unwrap();

    let line = chart.line_layout();
    assert_eq!((line.width, line.height), (300, 200));
    assert_eq!(line.margins, Margins::new(0, 50, 50, 50));
    assert_eq!(line.transition.as_millis(), 750);
    assert_eq!(line.y_ticks, 3);
    assert_eq!(line.x_tick_format, "%d-%m-%y");
    assert_eq!(line.title, "Injured over time");
    assert_eq!(line.chart_title, "Injured over time (Events)");
    assert_eq!(line.y_label, "no. of Injured over time");
    assert!(line.elastic_y && line.brush_on && !line.controls);
    assert_eq!(line.grid, GridLines::all());

    let slider = chart.slider_layout();
    assert_eq!((slider.width, slider.height), (125, 66));
    assert_eq!(slider.margins, Margins::new(0, 10, 30, 4));
    assert_eq!(slider.transition.as_millis(), 500);
    assert_eq!(slider.x_ticks, 3);
    assert_eq!(slider.x_domain, (0.0, 8.0));

    assert_eq!(chart.readout_layout().title, "Aggregate count in: 'a'");
    assert_eq!(chart.readout_layout().format, format::NumberFormat::Integer);
}

#[test]
fn test_initial_views() {
    let mut dashboard = Dashboard::new(store());
    let id = dashboard.add_chart(LinkedChartBuilder::new("a")).unwrap();
    let view = dashboard.view(id).unwrap();

    let sums: Vec<f64> = view.line.points.iter().map(|p| p.y).collect();
    assert_eq!(sums, vec![1.0, 5.0, 9.0, 13.0]);
    assert_eq!(view.line.points[0].x, fixtures::EPOCH_START as f64);
    assert_eq!(view.line.y_domain, (0.0, 13.0));
    assert_eq!(
        view.line.x_domain,
        Some((
            fixtures::EPOCH_START as f64 + 1_000.0,
            fixtures::EPOCH_START as f64 + 3.0 * DAY + 1_000.0
        ))
    );
    assert_eq!(view.line.tooltip(3).as_deref(), Some("Total number of events: 13"));

    assert_eq!(view.readout.count, 8);
    assert_eq!(view.readout.value, 28.0);
    assert_eq!(view.readout.average, 3.5);
    assert_eq!(view.readout.text, "28");

    assert_eq!(view.slider.points.len(), 8);
    assert!(view.slider.points.iter().all(|p| p.y == 1.0));
    assert_eq!(view.slider.brush, None);
}

#[test]
fn test_brushing_one_chart_filters_the_other() {
    let mut dashboard = Dashboard::new(store());
    let a = dashboard.add_chart(LinkedChartBuilder::new("a")).unwrap();
    let b = dashboard.add_chart(LinkedChartBuilder::new("b")).unwrap();

    // Keep only b == 2, i.e. odd records
    dashboard.brush_value(b, 2.0..3.0).unwrap();

    let view_a = dashboard.view(a).unwrap();
    assert_eq!(view_a.readout.value, 1.0 + 3.0 + 5.0 + 7.0);
    let sums: Vec<f64> = view_a.line.points.iter().map(|p| p.y).collect();
    assert_eq!(sums, vec![1.0, 3.0, 5.0, 7.0]);

    // The brushed slider still shows its own full context
    let view_b = dashboard.view(b).unwrap();
    let counts: Vec<f64> = view_b.slider.points.iter().map(|p| p.y).collect();
    assert_eq!(counts, vec![4.0, 4.0]);
    assert_eq!(view_b.slider.brush, Some(Brush::new(2.0, 3.0)));
    assert_eq!(view_b.readout.count, 4);

    dashboard.clear_all().unwrap();
    assert_eq!(dashboard.view(a).unwrap().readout.value, 28.0);
}

#[test]
fn test_time_brush_covers_whole_days() {
    let mut dashboard = Dashboard::new(store());
    let a = dashboard.add_chart(LinkedChartBuilder::new("a")).unwrap();

    let outcome = dashboard.brush_time(a, day(1)..day(3)).unwrap();
    assert_eq!(outcome, FilterOutcome::Applied { entered: 0, exited: 4 });

    let view = dashboard.view(a).unwrap();
    assert_eq!(view.readout.value, 2.0 + 3.0 + 4.0 + 5.0);
    assert_eq!(view.readout.count, 4);
    // The line chart ignores its own brush
    assert_eq!(view.line.points.len(), 4);
    assert_eq!(view.line.points[0].y, 1.0);
    assert_eq!(
        view.line.brush,
        Some(Brush::new(
            day(1).timestamp_millis() as f64,
            day(3).timestamp_millis() as f64
        ))
    );

    assert_eq!(dashboard.clear_brushes(a).unwrap(), 1);
    assert!(!dashboard.is_filtered());
}

#[test]
fn test_adapter_sees_only_changed_charts() {
    let mut dashboard = Dashboard::new(store());
    let a = dashboard.add_chart(LinkedChartBuilder::new("a")).unwrap();
    let b = dashboard.add_chart(LinkedChartBuilder::new("b")).unwrap();

    let frames: Rc<RefCell<Vec<(ChartId, ViewDirty)>>> = Rc::default();
    let sink = Rc::clone(&frames);
    dashboard.attach(move |view: &ChartView| sink.borrow_mut().push((view.chart, view.dirty)));

    // Initial snapshot of every chart
    assert_eq!(
        std::mem::take(&mut *frames.borrow_mut()),
        vec![(a, ViewDirty::all()), (b, ViewDirty::all())]
    );

    // A value brush outside every record of `a`: only `b` sees its brush
    // move, and `a` loses every record
    dashboard.brush_value(b, 10.0..20.0).unwrap();
    let frames_now = std::mem::take(&mut *frames.borrow_mut());
    assert_eq!(frames_now.len(), 2);
    assert_eq!(frames_now[0].0, a);
    assert!(!frames_now[0].1.contains(ViewDirty::BRUSH));
    assert!(frames_now[0].1.contains(ViewDirty::READOUT));
    assert_eq!(frames_now[1], (b, ViewDirty::READOUT | ViewDirty::LINE | ViewDirty::BRUSH));

    // Repeating the brush notifies nobody
    dashboard.brush_value(b, 10.0..20.0).unwrap();
    assert!(frames.borrow().is_empty());
}

#[test]
fn test_timeline_fixture_buckets() {
    let mut dashboard = Dashboard::new(fixtures::timeline(8));
    let id = dashboard
        .add_chart(LinkedChartBuilder::new("value").date_field("time"))
        .unwrap();

    let view = dashboard.view(id).unwrap();
    assert_eq!(view.line.points.len(), 2);
    assert_eq!(
        view.line.tick_labels(&[view.line.points[1].x], "%d-%m-%y"),
        vec!["02-01-22"]
    );
}
