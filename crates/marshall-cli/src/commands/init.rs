use crate::cli::InitArgs;
use crate::config::{
    DefaultsConfig, FileConfig, FileGradationConfig, FileMarshallConfig, FileMaterials,
    FileSpecimen,
};
use crate::error::{CliError, Result};
use marshallmix::core::models::sieve::SieveSize;
use marshallmix::core::models::specimen::{MAX_SPECIMEN_COUNT, MIN_SPECIMEN_COUNT};
use std::fs;
use tracing::info;

pub fn run(args: InitArgs) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let rows = args.rows.unwrap_or(defaults.specimen_count);
    let text = render_template(&defaults, rows)?;

    match &args.output {
        Some(path) => {
            if path.exists() && !args.force {
                return Err(CliError::Argument(format!(
                    "'{}' already exists; pass --force to overwrite it",
                    path.display()
                )));
            }
            fs::write(path, text)?;
            info!("Session template written to {:?}", path);
            println!("Session template written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn template(defaults: &DefaultsConfig, rows: usize) -> FileConfig {
    FileConfig {
        materials: Some(FileMaterials {
            gsb: Some(defaults.materials.gsb),
            gmm: Some(defaults.materials.gmm),
            gse: Some(defaults.materials.gse),
            gsa: Some(defaults.materials.gsa),
        }),
        marshall: Some(FileMarshallConfig {
            target_vtm: Some(defaults.target_vtm),
            specimen_count: Some(rows),
        }),
        specimens: vec![FileSpecimen::default(); rows],
        gradation: Some(FileGradationConfig {
            mix_proportions: Some(defaults.mix_proportions.as_array()),
            sum_tolerance: Some(defaults.sum_tolerance),
            passing: Default::default(),
        }),
    }
}

fn header() -> String {
    let sieves: Vec<&str> = SieveSize::CATALOG.iter().map(|s| s.label()).collect();
    format!(
        "# MarshallMix design session.\n\
         #\n\
         # Fill in the specimen measurements below. Gradation cells are given per sieve:\n\
         #\n\
         #   [gradation.passing.\"N°4\"]\n\
         #   aggregate-1 = 45.0\n\
         #   aggregate-2 = 88.0\n\
         #\n\
         # Sieves: {}. Unset cells count as 0 % passing.\n\n",
        sieves.join(", ")
    )
}

pub fn render_template(defaults: &DefaultsConfig, rows: usize) -> Result<String> {
    if !(MIN_SPECIMEN_COUNT..=MAX_SPECIMEN_COUNT).contains(&rows) {
        return Err(CliError::Argument(format!(
            "--rows must be between {} and {}, got {}",
            MIN_SPECIMEN_COUNT, MAX_SPECIMEN_COUNT, rows
        )));
    }
    let body = template(defaults, rows).to_toml_string()?;
    Ok(format!("{}{}", header(), body))
}
