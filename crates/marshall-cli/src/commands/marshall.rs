use crate::cli::{MarshallArgs, OutputFormat};
use crate::config::{Overrides, build_config};
use crate::error::Result;
use crate::render;
use marshallmix::workflows;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: MarshallArgs) -> Result<()> {
    let overrides = Overrides {
        target_vtm: args.target_vtm,
        specimen_count: args.specimen_count,
        sum_tolerance: None,
    };
    let app_config = build_config(&args.session, &overrides)?;
    info!("Design session loaded from {:?}", &app_config.input_path);

    info!("Invoking the Marshall workflow...");
    let report = workflows::marshall::run(&app_config.session)?;
    info!(
        "Workflow finished: {} specimen(s), {} excluded.",
        report.specimens.len(),
        report.invalid_indices().len()
    );

    render::print_warnings(&report.warnings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.session.format {
        OutputFormat::Table => render::write_marshall_table(&mut out, &report, args.bracket)?,
        OutputFormat::Csv => render::write_marshall_csv(&mut out, &report)?,
    }
    if args.series {
        render::write_marshall_series(&mut out, &report)?;
    }
    out.flush()?;
    Ok(())
}
