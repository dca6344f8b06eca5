use wt_app::*;
use wt_core::Sample;
use wt_project::{Color, CurveKind, CurveRecord, ProductionGraphType, Series, StackedCurve};

fn stacked_record() -> CurveRecord {
    let mut record = CurveRecord::simple(
        "history",
        vec![
            Sample::new(0.5, 200.0),
            Sample::new(1.0, 190.0),
            Sample::new(2.5, 185.0),
            Sample::new(6.0, 180.0),
        ],
    );
    record.kind = CurveKind::Stacked(StackedCurve {
        x2_col: Some(2),
        y2_col: Some(3),
        // durations 2, 3, 5 with rates 10, 20, 15
        secondary_series: Series(vec![
            Sample::new(2.0, 10.0),
            Sample::new(3.0, 20.0),
            Sample::new(5.0, 15.0),
        ]),
        secondary_legend_name: "Q".to_string(),
        production_graph_type: ProductionGraphType::Step,
        production_color: Color::BLUE,
    });
    record
}

fn export_string(record: &CurveRecord, range: ExportRange, separator: Separator) -> String {
    let mut out = Vec::new();
    export_curve(record, range, &mut out, separator).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn full_stacked_export() {
    let text = export_string(&stacked_record(), ExportRange::Full, Separator::Comma);
    assert_eq!(
        text,
        "Time,P,Q\n0.5,200,15\n1,190,15\n2.5,185,15\n6,180,15\n"
    );
}

#[test]
fn partial_stacked_export_uses_tabs_for_rows() {
    let text = export_string(&stacked_record(), ExportRange::partial(6.0, 1.0), Separator::Tab);
    assert_eq!(
        text,
        "AdjTime,P,Q,OrigTime\n0\t190\t15\t1\n1.5\t185\t15\t2.5\n5\t180\t15\t6\n"
    );
}

#[test]
fn single_series_export() {
    let record = CurveRecord::simple("p", vec![Sample::new(1.0, 3.0), Sample::new(4.0, 5.5)]);
    assert_eq!(
        export_string(&record, ExportRange::Full, Separator::Comma),
        "Time,Value\n1,3\n4,5.5\n"
    );
    assert_eq!(
        export_string(&record, ExportRange::partial(2.0, 4.0), Separator::Comma),
        "AdjTime,Value,OrigTime\n2,5.5,4\n"
    );
}

#[test]
fn production_value_is_last_recorded_rate() {
    let record = stacked_record();
    let CurveKind::Stacked(stacked) = &record.kind else {
        panic!("expected stacked curve");
    };
    assert_eq!(production_value(stacked), 15.0);

    let mut scatter = stacked.clone();
    scatter.production_graph_type = ProductionGraphType::Scatter;
    assert_eq!(production_value(&scatter), 15.0);

    let mut empty = stacked.clone();
    empty.secondary_series = Series::default();
    assert_eq!(production_value(&empty), 0.0);
}

#[test]
fn long_stacked_export_writes_every_row() {
    let n = 50_000;
    let mut record = stacked_record();
    record.primary_series = Series(
        (0..n)
            .map(|i| Sample::new(i as f64 * 0.25, 300.0 - i as f64 * 1e-3))
            .collect(),
    );
    if let CurveKind::Stacked(stacked) = &mut record.kind {
        stacked.secondary_series = Series((1..=n).map(|i| Sample::new(1.0, i as f64)).collect());
    }

    let mut out = Vec::new();
    let rows = export_curve(&record, ExportRange::Full, &mut out, Separator::Comma).unwrap();
    assert_eq!(rows, n);

    let text = String::from_utf8(out).unwrap();
    let last_rate = format!(",{}", n);
    assert_eq!(text.lines().count(), n + 1);
    assert!(text.lines().skip(1).all(|line| line.ends_with(&last_rate)));
}

#[test]
fn export_to_txt_file() {
    let path = std::env::temp_dir().join("wt_app_export.txt");
    let record = CurveRecord::simple("p", vec![Sample::new(1.0, 3.0)]);
    let rows = export_to_path(&record, ExportRange::Full, &path).unwrap();
    assert_eq!(rows, 1);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Time,Value\n1\t3\n");
}
