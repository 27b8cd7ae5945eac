use crate::error::Result;
use marshallmix::core::models::gradation::AggregateId;
use marshallmix::core::models::sieve::SieveSize;
use marshallmix::core::series::{MarshallProperty, Series};
use marshallmix::engine::warning::Warning;
use marshallmix::workflows::gradation::GradationReport;
use marshallmix::workflows::marshall::{MarshallReport, OptimumOutcome};
use serde::Serialize;
use std::io::Write;

const MISSING: &str = "-";

/// Prints warnings to stderr, one per line.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("⚠️  Warning: {}", warning);
    }
}

fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn write_marshall_table<W: Write>(
    out: &mut W,
    report: &MarshallReport,
    show_bracket: bool,
) -> Result<()> {
    writeln!(
        out,
        "{:>3} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>7} {:>8} {:>8} {:>8}",
        "#", "% Asphalt", "W air", "W sub", "W SSD", "Stability", "Flow", "Gmb", "VTM %", "VMA %", "VFA %"
    )?;

    let optimum_index = report.optimum.selected().map(|s| s.index);
    for specimen in &report.specimens {
        let r = &specimen.record;
        let (gmb, vtm, vma, vfa) = match &specimen.metrics {
            Ok(m) => (
                two_decimals(m.gmb),
                two_decimals(m.vtm),
                two_decimals(m.vma),
                two_decimals(m.vfa),
            ),
            Err(_) => (
                MISSING.to_string(),
                MISSING.to_string(),
                MISSING.to_string(),
                MISSING.to_string(),
            ),
        };
        let marker = if optimum_index == Some(specimen.index) {
            "  <- optimum"
        } else if specimen.is_valid() {
            ""
        } else {
            "  (excluded)"
        };
        writeln!(
            out,
            "{:>3} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>7} {:>8} {:>8} {:>8}{}",
            specimen.index + 1,
            two_decimals(r.asphalt_percent),
            two_decimals(r.weight_air),
            two_decimals(r.weight_submerged),
            two_decimals(r.weight_ssd),
            two_decimals(r.stability),
            two_decimals(r.flow),
            gmb,
            vtm,
            vma,
            vfa,
            marker
        )?;
    }

    writeln!(out)?;
    match &report.optimum {
        OptimumOutcome::Selected(s) => writeln!(
            out,
            "Optimum asphalt content: {} % (specimen {}, VTM {} %, {} from the {} % target)",
            two_decimals(s.record.asphalt_percent),
            s.index + 1,
            two_decimals(s.metrics.vtm),
            two_decimals(s.vtm_deviation),
            two_decimals(report.target_vtm)
        )?,
        OptimumOutcome::NoEligibleSpecimen => writeln!(
            out,
            "Optimum asphalt content: not available (no specimen has a defined VTM)"
        )?,
    }

    if show_bracket {
        match &report.bracket {
            Some(b) => writeln!(
                out,
                "Interpolated asphalt content at {} % VTM: {} % (between specimens {} and {})",
                two_decimals(report.target_vtm),
                two_decimals(b.asphalt_percent),
                b.lower.index + 1,
                b.upper.index + 1
            )?,
            None => writeln!(
                out,
                "Interpolated asphalt content: not available (no two specimens straddle {} % VTM)",
                two_decimals(report.target_vtm)
            )?,
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct MarshallCsvRow {
    specimen: usize,
    asphalt_percent: f64,
    weight_air: f64,
    weight_submerged: f64,
    weight_ssd: f64,
    stability: f64,
    flow: f64,
    gmb: Option<f64>,
    vtm: Option<f64>,
    vma: Option<f64>,
    vfa: Option<f64>,
    optimum: bool,
    error: Option<String>,
}

pub fn write_marshall_csv<W: Write>(out: &mut W, report: &MarshallReport) -> Result<()> {
    let optimum_index = report.optimum.selected().map(|s| s.index);
    let mut writer = csv::Writer::from_writer(out);
    for specimen in &report.specimens {
        let r = &specimen.record;
        let metrics = specimen.metrics.as_ref().ok();
        writer.serialize(MarshallCsvRow {
            specimen: specimen.index + 1,
            asphalt_percent: r.asphalt_percent,
            weight_air: r.weight_air,
            weight_submerged: r.weight_submerged,
            weight_ssd: r.weight_ssd,
            stability: r.stability,
            flow: r.flow,
            gmb: metrics.map(|m| m.gmb),
            vtm: metrics.map(|m| m.vtm),
            vma: metrics.map(|m| m.vma),
            vfa: metrics.map(|m| m.vfa),
            optimum: optimum_index == Some(specimen.index),
            error: specimen.error().map(|e| e.to_string()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_marshall_series<W: Write>(out: &mut W, report: &MarshallReport) -> Result<()> {
    for property in MarshallProperty::ALL {
        write_series(out, property.title(), property.unit(), &report.series(property), |x| {
            two_decimals(*x)
        })?;
    }
    Ok(())
}

pub fn write_gradation_table<W: Write>(out: &mut W, report: &GradationReport) -> Result<()> {
    writeln!(
        out,
        "{:>7} {:>8} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "Sieve",
        "mm",
        AggregateId::First.label(),
        AggregateId::Second.label(),
        AggregateId::Third.label(),
        AggregateId::Fourth.label(),
        "Combined"
    )?;
    for point in report.curve.points() {
        let cells: Vec<String> = AggregateId::ALL
            .iter()
            .map(|&a| {
                report
                    .gradation
                    .get(point.sieve, a)
                    .map(two_decimals)
                    .unwrap_or_else(|| MISSING.to_string())
            })
            .collect();
        writeln!(
            out,
            "{:>7} {:>8.3} {:>12} {:>12} {:>12} {:>12} {:>10}",
            point.sieve.label(),
            point.sieve.opening_mm(),
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            two_decimals(point.percent_passing)
        )?;
    }

    writeln!(out)?;
    let proportions: Vec<String> = AggregateId::ALL
        .iter()
        .map(|&a| format!("{} {}", a.label(), two_decimals(report.proportions.get(a))))
        .collect();
    writeln!(
        out,
        "Mix proportions: {} (sum {})",
        proportions.join(", "),
        two_decimals(report.proportions.sum())
    )?;
    if report.missing_cells > 0 {
        writeln!(
            out,
            "{} unset cell(s) read as 0.00 % passing",
            report.missing_cells
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct GradationCsvRow {
    sieve: &'static str,
    opening_mm: f64,
    aggregate_1: Option<f64>,
    aggregate_2: Option<f64>,
    aggregate_3: Option<f64>,
    aggregate_4: Option<f64>,
    combined: f64,
}

pub fn write_gradation_csv<W: Write>(out: &mut W, report: &GradationReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for point in report.curve.points() {
        let cell = |a: AggregateId| report.gradation.get(point.sieve, a);
        writer.serialize(GradationCsvRow {
            sieve: point.sieve.label(),
            opening_mm: point.sieve.opening_mm(),
            aggregate_1: cell(AggregateId::First),
            aggregate_2: cell(AggregateId::Second),
            aggregate_3: cell(AggregateId::Third),
            aggregate_4: cell(AggregateId::Fourth),
            combined: point.percent_passing,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Sieves are listed coarse to fine, matching the inverted x axis of the chart.
pub fn write_gradation_series<W: Write>(out: &mut W, report: &GradationReport) -> Result<()> {
    for series in report.series() {
        write_series(out, &series.name, "% passing", &series, |sieve: &SieveSize| {
            sieve.label().to_string()
        })?;
    }
    Ok(())
}

fn write_series<W: Write, X>(
    out: &mut W,
    title: &str,
    unit: &str,
    series: &Series<X>,
    format_x: impl Fn(&X) -> String,
) -> Result<()> {
    writeln!(out, "\n{} [{}]", title, unit)?;
    if series.is_empty() {
        writeln!(out, "  (no points)")?;
        return Ok(());
    }
    for (x, y) in &series.points {
        writeln!(out, "  {:>8}  {:>10}", format_x(x), two_decimals(*y))?;
    }
    Ok(())
}
