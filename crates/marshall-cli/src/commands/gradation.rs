use crate::cli::{GradationArgs, OutputFormat};
use crate::config::{Overrides, build_config};
use crate::error::Result;
use crate::render;
use marshallmix::workflows;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: GradationArgs) -> Result<()> {
    let overrides = Overrides {
        sum_tolerance: args.tolerance,
        ..Default::default()
    };
    let app_config = build_config(&args.session, &overrides)?;
    info!("Design session loaded from {:?}", &app_config.input_path);

    info!("Invoking the gradation workflow...");
    let report = workflows::gradation::run(&app_config.session);

    render::print_warnings(&report.warnings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.session.format {
        OutputFormat::Table => render::write_gradation_table(&mut out, &report)?,
        OutputFormat::Csv => render::write_gradation_csv(&mut out, &report)?,
    }
    if args.series {
        render::write_gradation_series(&mut out, &report)?;
    }
    out.flush()?;
    Ok(())
}
