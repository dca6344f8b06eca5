use clap::{Args, Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use wt_app::{
    AppError, AppResult, ColumnPair, DataGrid, DerivativeCurveRequest, ExportRange,
    ImportSettings, ProjectContext, Separator, create_derivative_curve, export_curve,
    export_to_path, project_service,
};
use wt_derivative::{DerivativeParams, TestType};
use wt_overlay::{
    AxisRange, AxisScale, OverlayScene, PixelRect, Viewport, default_annotation_text,
};
use wt_project::{CurveKind, SeriesStyle};

#[derive(Parser)]
#[command(name = "wt-cli")]
#[command(about = "Well-test CLI - pressure derivative analysis and curve management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// How to read a data table.
#[derive(Args)]
struct TableOptions {
    /// Number the columns instead of reading a header line
    #[arg(long)]
    no_header: bool,
    /// Line holding the column names
    #[arg(long, default_value_t = 1)]
    header_row: usize,
    /// First line read as data
    #[arg(long, default_value_t = 1)]
    start_row: usize,
}

impl TableOptions {
    fn load(&self, table: &Path) -> AppResult<DataGrid> {
        let settings = ImportSettings {
            use_header: !self.no_header,
            header_row: self.header_row,
            start_row: self.start_row,
            ..ImportSettings::for_path(table)
        };
        DataGrid::load_with(table, &settings)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the columns of a data table
    Columns {
        /// Path to a delimited data table (.csv comma separated, otherwise tab separated)
        table: PathBuf,
        #[command(flatten)]
        options: TableOptions,
    },
    /// Report negative readings in a pressure column
    Check {
        /// Path to a delimited data table
        table: PathBuf,
        /// Index of the pressure column
        #[arg(long)]
        pressure_col: usize,
        #[command(flatten)]
        options: TableOptions,
    },
    /// Compute the pressure-drop log derivative of two table columns
    Derivative {
        /// Path to a delimited data table
        table: PathBuf,
        /// Index of the time column
        #[arg(long)]
        time_col: usize,
        /// Index of the pressure column
        #[arg(long)]
        pressure_col: usize,
        /// Buildup test (pressure drop measured from the first sample)
        #[arg(long)]
        buildup: bool,
        /// Initial reservoir pressure for drawdown tests
        #[arg(long, default_value_t = 0.0)]
        reference_pressure: f64,
        /// Half-width of the log-time window
        #[arg(long, default_value_t = 0.2)]
        l_spacing: f64,
        /// Moving-average width applied to the derivative
        #[arg(long)]
        smooth: Option<usize>,
        /// Store the result as a curve in this project file
        #[arg(long, requires = "name")]
        project: Option<PathBuf>,
        /// Curve name when storing into a project
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        options: TableOptions,
    },
    /// List curves in a project
    Curves {
        /// Path to the project file (.json, .yaml)
        project_path: PathBuf,
    },
    /// Export a curve's data as delimited text
    Export {
        /// Path to the project file
        project_path: PathBuf,
        /// Curve name
        curve: String,
        /// Start of a partial time range
        #[arg(long, requires = "end")]
        start: Option<f64>,
        /// End of a partial time range
        #[arg(long, requires = "start")]
        end: Option<f64>,
        /// Output file (optional, defaults to stdout); .txt and .xls are tab separated
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Show where a characteristic line of the given slope is first placed
    Line {
        /// Line slope (power-law exponent on log-log axes)
        #[arg(long, allow_hyphen_values = true)]
        slope: f64,
        /// Visible x range
        #[arg(long, num_args = 2, value_names = ["LOWER", "UPPER"], allow_hyphen_values = true)]
        x_range: Vec<f64>,
        /// Visible y range
        #[arg(long, num_args = 2, value_names = ["LOWER", "UPPER"], allow_hyphen_values = true)]
        y_range: Vec<f64>,
        /// Logarithmic x and y axes
        #[arg(long)]
        log_log: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Columns { table, options } => cmd_columns(&options.load(&table)?),
        Commands::Check {
            table,
            pressure_col,
            options,
        } => cmd_check(&options.load(&table)?, pressure_col),
        Commands::Derivative {
            table,
            time_col,
            pressure_col,
            buildup,
            reference_pressure,
            l_spacing,
            smooth,
            project,
            name,
            options,
        } => {
            let params = DerivativeParams {
                test_type: if buildup {
                    TestType::Buildup
                } else {
                    TestType::Drawdown
                },
                reference_pressure,
                l_spacing,
                smoothing: smooth,
            };
            cmd_derivative(
                &options.load(&table)?,
                ColumnPair::new(time_col, pressure_col),
                params,
                project.as_deref(),
                name,
            )
        }
        Commands::Curves { project_path } => cmd_curves(&project_path),
        Commands::Export {
            project_path,
            curve,
            start,
            end,
            output,
        } => {
            let range = match (start, end) {
                (Some(start), Some(end)) => ExportRange::partial(start, end),
                _ => ExportRange::Full,
            };
            cmd_export(&project_path, &curve, range, output.as_deref())
        }
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Line {
            slope,
            x_range,
            y_range,
            log_log,
        } => cmd_line(slope, &x_range, &y_range, log_log),
    }
}

fn cmd_columns(grid: &DataGrid) -> AppResult<()> {
    println!("{} rows", grid.row_count());
    for (i, header) in grid.headers().iter().enumerate() {
        println!("  [{}] {}", i, header);
    }
    Ok(())
}

fn cmd_check(grid: &DataGrid, pressure_col: usize) -> AppResult<()> {
    let rows = grid.negative_rows(pressure_col)?;
    if rows.is_empty() {
        println!("✓ No negative pressures in column {}", pressure_col);
        return Ok(());
    }
    println!("Found {} negative pressure(s):", rows.len());
    for row in rows {
        println!(
            "  row {}: {}",
            row + 1,
            grid.cell(row, pressure_col).unwrap_or_default()
        );
    }
    Ok(())
}

fn cmd_derivative(
    grid: &DataGrid,
    columns: ColumnPair,
    params: DerivativeParams,
    project: Option<&Path>,
    name: Option<String>,
) -> AppResult<()> {
    let name = name.unwrap_or_else(|| "derivative".to_string());
    let request = DerivativeCurveRequest {
        name: name.clone(),
        legend_name: "Pressure Drop".to_string(),
        columns,
        params,
        style: SeriesStyle::default(),
        derivative_legend_name: "Derivative".to_string(),
        derivative_style: SeriesStyle::default(),
    };

    let mut context = match project {
        Some(path) if path.exists() => ProjectContext::open(path)?,
        _ => ProjectContext::new(project_name(project)),
    };
    create_derivative_curve(&mut context.curves, grid, &request)?;

    let record = context
        .curves
        .get(&name)
        .ok_or_else(|| AppError::CurveNotFound(name.clone()))?;
    if let CurveKind::Derivative(derivative) = &record.kind {
        println!("{:>14} {:>14} {:>14}", "time", "dp", "dp'");
        for (sample, d) in record
            .primary_series
            .samples()
            .iter()
            .zip(&derivative.derivative_series)
        {
            println!("{:>14.6} {:>14.6} {:>14.6}", sample.time, sample.value, d);
        }
    }

    if let Some(path) = project {
        context.save_as(path)?;
        println!("✓ Saved curve '{}' to {}", name, path.display());
    }
    Ok(())
}

fn project_name(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

fn cmd_curves(project_path: &Path) -> AppResult<()> {
    let context = ProjectContext::open(project_path)?;

    if context.curves.is_empty() {
        println!("No curves found in project");
    } else {
        println!("Curves in project '{}':", context.name);
        for record in context.curves.iter() {
            println!(
                "  {} - {} ({}, {} points)",
                record.name,
                record.legend_name,
                record.kind.label(),
                record.primary_series.len()
            );
        }
    }
    Ok(())
}

fn cmd_export(
    project_path: &Path,
    curve: &str,
    range: ExportRange,
    output: Option<&Path>,
) -> AppResult<()> {
    let context = ProjectContext::open(project_path)?;
    let record = context
        .curves
        .get(curve)
        .ok_or_else(|| AppError::CurveNotFound(curve.to_string()))?;

    // Write to file or stdout
    if let Some(path) = output {
        let rows = export_to_path(record, range, path)?;
        println!("✓ Exported {} data points to {}", rows, path.display());
    } else {
        let mut out = BufWriter::new(io::stdout().lock());
        export_curve(record, range, &mut out, Separator::Comma)?;
        out.flush()?;
    }
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid ({} curves)", project.curves.len());
    Ok(())
}

fn cmd_line(slope: f64, x_range: &[f64], y_range: &[f64], log_log: bool) -> AppResult<()> {
    let (&[x_lo, x_hi], &[y_lo, y_hi]) = (x_range, y_range) else {
        return Err(AppError::InvalidInput(
            "ranges need exactly two values".to_string(),
        ));
    };
    if log_log && (x_lo <= 0.0 || y_lo <= 0.0) {
        return Err(AppError::InvalidInput(
            "log-log ranges must be positive".to_string(),
        ));
    }

    let scale = if log_log {
        AxisScale::Logarithmic
    } else {
        AxisScale::Linear
    };
    let view = Viewport::new(
        PixelRect::new(0.0, 0.0, 800.0, 600.0),
        AxisRange::new(x_lo, x_hi),
        AxisRange::new(y_lo, y_hi),
    )
    .with_scales(scale, scale);

    let mut scene = OverlayScene::new();
    let id = scene.add_characteristic_line(slope, &view);
    let text = default_annotation_text(slope);
    if let Err(err) = scene.annotate_line(id, text.clone(), &view) {
        tracing::warn!(%err, "annotation not placed");
    }

    if let Some(line) = scene.line(id) {
        println!("start: ({}, {})", line.start.x, line.start.y);
        println!("end:   ({}, {})", line.end.x, line.end.y);
        if let Some(annotation) = &line.annotation {
            println!(
                "label: \"{}\" at ({}, {})",
                text, annotation.label.position.x, annotation.label.position.y
            );
        }
    }
    Ok(())
}
