use wt_app::*;
use wt_derivative::{DerivativeParams, TestType};
use wt_project::{
    Color, CurveCollection, CurveKind, LineStyle, MarkerShape, ProductionGraphType, SeriesStyle,
};

const TABLE: &str = "\
Time,Pressure,Duration,Rate
0,100,2,10
1,100,3,20
2,98,5,0
4,95,1,5
8,90,1,5
16,82,1,5
";

fn grid() -> DataGrid {
    DataGrid::from_delimited(TABLE.as_bytes(), b',').unwrap()
}

fn derivative_request(params: DerivativeParams) -> DerivativeCurveRequest {
    DerivativeCurveRequest {
        name: "dd".to_string(),
        legend_name: "dP".to_string(),
        columns: ColumnPair::new(0, 1),
        params,
        style: SeriesStyle::default(),
        derivative_legend_name: "dP'".to_string(),
        derivative_style: SeriesStyle {
            point_shape: MarkerShape::Triangle,
            ..SeriesStyle::default()
        },
    }
}

#[test]
fn simple_curve_keeps_positive_rows() {
    let mut curves = CurveCollection::new();
    let request = SimpleCurveRequest {
        name: "p".to_string(),
        legend_name: "Pressure".to_string(),
        columns: ColumnPair::new(0, 1),
        style: SeriesStyle::default(),
    };
    create_simple_curve(&mut curves, &grid(), &request).unwrap();

    let record = curves.get("p").unwrap();
    assert_eq!(record.primary_series.times(), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
    assert_eq!(record.x_col, Some(0));

    let labels = axis_labels(record, &grid());
    assert_eq!(labels.x, "Time");
    assert_eq!(labels.y, "Pressure");
    assert_eq!(labels.y2, None);
}

#[test]
fn stacked_curve_takes_all_rows() {
    let mut curves = CurveCollection::new();
    let request = StackedCurveRequest {
        name: "history".to_string(),
        pressure_legend: "P".to_string(),
        pressure: ColumnPair::new(0, 1),
        pressure_style: SeriesStyle::default(),
        production: ColumnPair::new(2, 3),
        production_legend: "Q".to_string(),
        production_graph_type: ProductionGraphType::Step,
        production_color: Color::BLUE,
    };
    create_stacked_curve(&mut curves, &grid(), &request).unwrap();

    let record = curves.get("history").unwrap();
    assert_eq!(record.primary_series.len(), 6);
    let CurveKind::Stacked(stacked) = &record.kind else {
        panic!("expected stacked curve");
    };
    assert_eq!(stacked.secondary_series.values(), vec![10.0, 20.0, 0.0, 5.0, 5.0, 5.0]);

    let drawn = production_series(stacked);
    assert_eq!(drawn.len(), 7);
    assert_eq!(drawn[0].time, 0.0);
    assert_eq!(drawn[1].time, 2.0);
    assert_eq!(drawn[6].time, 13.0);

    let labels = axis_labels(record, &grid());
    assert_eq!(labels.y2.as_deref(), Some("Production"));
}

#[test]
fn derivative_curve_from_drawdown() {
    let mut curves = CurveCollection::new();
    let params = DerivativeParams {
        test_type: TestType::Drawdown,
        reference_pressure: 100.0,
        l_spacing: 0.7,
        smoothing: None,
    };
    create_derivative_curve(&mut curves, &grid(), &derivative_request(params)).unwrap();

    let record = curves.get("dd").unwrap();
    assert_eq!(record.primary_series.times(), vec![2.0, 4.0, 8.0, 16.0]);
    let CurveKind::Derivative(derivative) = &record.kind else {
        panic!("expected derivative curve");
    };
    assert_eq!(derivative.derivative_series.len(), 4);
    assert!((derivative.derivative_series[0] - 8.0 / 4.0_f64.ln()).abs() < 1e-12);
    assert!(!derivative.smoothing_enabled);
    assert_eq!(derivative.smoothing_window, 1);
    assert_eq!(derivative.l_spacing, 0.7);
    assert_eq!(axis_labels(record, &grid()).y, "Pressure & Derivative");
}

#[test]
fn failed_derivative_leaves_collection_untouched() {
    let mut curves = CurveCollection::new();
    let params = DerivativeParams {
        test_type: TestType::Buildup,
        ..DerivativeParams::default()
    };
    // buildup against the first pressure: only the last row differs from it
    let flat = "t,p\n1,50\n2,50\n3,50\n4,51\n";
    let flat = DataGrid::from_delimited(flat.as_bytes(), b',').unwrap();

    let err = create_derivative_curve(&mut curves, &flat, &derivative_request(params)).unwrap_err();
    assert!(matches!(err, AppError::Derivative(_)));
    assert!(curves.is_empty());
}

#[test]
fn invalid_column_is_rejected() {
    let mut curves = CurveCollection::new();
    let request = SimpleCurveRequest {
        name: "p".to_string(),
        legend_name: String::new(),
        columns: ColumnPair::new(0, 9),
        style: SeriesStyle::default(),
    };
    let err = create_simple_curve(&mut curves, &grid(), &request).unwrap_err();
    assert!(matches!(err, AppError::InvalidColumnSelection { column: 9, .. }));
    assert!(curves.is_empty());
}

#[test]
fn edit_rereads_simple_curve_data() {
    let mut curves = CurveCollection::new();
    let request = SimpleCurveRequest {
        name: "p".to_string(),
        legend_name: "Pressure".to_string(),
        columns: ColumnPair::new(0, 1),
        style: SeriesStyle::default(),
    };
    create_simple_curve(&mut curves, &grid(), &request).unwrap();

    let style = SeriesStyle {
        point_shape: MarkerShape::Square,
        point_color: Color::RED,
        line_style: LineStyle::Solid,
        line_color: Color::RED,
    };
    let edit = CurveEdit {
        legend_name: "Rate".to_string(),
        columns: ColumnPair::new(0, 3),
        style,
        secondary: None,
    };
    edit_curve(&mut curves, &grid(), "p", &edit).unwrap();

    let record = curves.get("p").unwrap();
    assert_eq!(record.legend_name, "Rate");
    assert_eq!(record.y_col, Some(3));
    assert_eq!(record.primary_style, style);
    // rows with zero rate are dropped
    assert_eq!(record.primary_series.values(), vec![20.0, 5.0, 5.0, 5.0]);
}

#[test]
fn edit_updates_derivative_secondary_style() {
    let mut curves = CurveCollection::new();
    let params = DerivativeParams {
        reference_pressure: 100.0,
        ..DerivativeParams::default()
    };
    create_derivative_curve(&mut curves, &grid(), &derivative_request(params)).unwrap();
    let before = curves.get("dd").unwrap().primary_series.clone();

    let secondary_style = SeriesStyle {
        point_shape: MarkerShape::Star,
        ..SeriesStyle::default()
    };
    let edit = CurveEdit {
        legend_name: "dP new".to_string(),
        columns: ColumnPair::new(0, 1),
        style: SeriesStyle::default(),
        secondary: Some(SecondaryEdit {
            legend_name: "derivative".to_string(),
            style: secondary_style,
        }),
    };
    edit_curve(&mut curves, &grid(), "dd", &edit).unwrap();

    let record = curves.get("dd").unwrap();
    assert_eq!(record.primary_series, before);
    assert_eq!(record.secondary_legend_name(), Some("derivative"));
    assert_eq!(record.secondary_style(), Some(secondary_style));
}

#[test]
fn delete_and_missing_curve() {
    let mut curves = CurveCollection::new();
    let request = SimpleCurveRequest {
        name: "p".to_string(),
        legend_name: String::new(),
        columns: ColumnPair::new(0, 1),
        style: SeriesStyle::default(),
    };
    create_simple_curve(&mut curves, &grid(), &request).unwrap();

    assert_eq!(delete_curve(&mut curves, "p").unwrap().name, "p");
    assert!(matches!(
        delete_curve(&mut curves, "p"),
        Err(AppError::CurveNotFound(_))
    ));
}

#[test]
fn project_context_round_trip() {
    let mut context = ProjectContext::new("field");
    let request = SimpleCurveRequest {
        name: "p".to_string(),
        legend_name: "Pressure".to_string(),
        columns: ColumnPair::new(0, 1),
        style: SeriesStyle::default(),
    };
    create_simple_curve(&mut context.curves, &grid(), &request).unwrap();

    let path = std::env::temp_dir().join("wt_app_context_round_trip.yaml");
    context.save_as(&path).unwrap();
    assert!(context.has_loaded_project());
    context.save().unwrap();

    let reopened = ProjectContext::open(&path).unwrap();
    assert_eq!(reopened.name, "field");
    assert_eq!(reopened.curves, context.curves);
}
