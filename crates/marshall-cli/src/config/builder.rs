use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileGradationConfig, FileMaterials};
use super::models::{AppConfig, Overrides};
use crate::cli::SessionArgs;
use crate::error::{CliError, Result};
use marshallmix::core::models::gradation::{AggregateId, MixProportions};
use marshallmix::core::models::materials::MaterialProperties;
use marshallmix::core::models::sieve::SieveSize;
use marshallmix::engine::config::DesignConfigBuilder;
use marshallmix::engine::session::DesignSession;
use std::str::FromStr;
use tracing::{debug, warn};

/// Reads the session file and layers `--set` values and dedicated flags over it.
pub fn build_config(args: &SessionArgs, overrides: &Overrides) -> Result<AppConfig> {
    let file_config = FileConfig::from_file(&args.input)?;
    let session = build_session(file_config, &args.set_values, overrides)?;
    Ok(AppConfig {
        input_path: args.input.clone(),
        session,
    })
}

pub fn build_session(
    mut file_config: FileConfig,
    set_values: &[String],
    overrides: &Overrides,
) -> Result<DesignSession> {
    apply_set_values(&mut file_config, set_values)?;
    let defaults = DefaultsConfig::default();

    let materials = merge_materials(file_config.materials.take(), &defaults.materials);
    let marshall = file_config.marshall.take().unwrap_or_default();
    let gradation = file_config.gradation.take().unwrap_or_default();

    let target_vtm = overrides
        .target_vtm
        .or(marshall.target_vtm)
        .unwrap_or(defaults.target_vtm);

    let listed = file_config.specimens.len();
    let specimen_count = overrides
        .specimen_count
        .or(marshall.specimen_count)
        .unwrap_or(if listed == 0 {
            defaults.specimen_count
        } else {
            listed
        });

    let sum_tolerance = overrides
        .sum_tolerance
        .or(gradation.sum_tolerance)
        .unwrap_or(defaults.sum_tolerance);

    let design_config = DesignConfigBuilder::new()
        .materials(materials)
        .target_vtm(target_vtm)
        .specimen_count(specimen_count)
        .sum_tolerance(sum_tolerance)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut session = DesignSession::new(design_config);

    if listed > specimen_count {
        warn!(
            listed,
            specimen_count, "More specimens listed than rows requested; extra specimens are ignored."
        );
    }
    for (index, specimen) in file_config
        .specimens
        .into_iter()
        .take(specimen_count)
        .enumerate()
    {
        session.set_specimen(index, specimen.into())?;
    }

    apply_gradation(&mut session, gradation, &defaults)?;

    debug!(
        specimens = session.specimen_count(),
        target_vtm = session.target_vtm(),
        "Design session assembled."
    );
    Ok(session)
}

fn merge_materials(file: Option<FileMaterials>, defaults: &MaterialProperties) -> MaterialProperties {
    let file = file.unwrap_or_default();
    MaterialProperties::new(
        file.gsb.unwrap_or(defaults.gsb),
        file.gmm.unwrap_or(defaults.gmm),
        file.gse.unwrap_or(defaults.gse),
        file.gsa.unwrap_or(defaults.gsa),
    )
}

fn apply_gradation(
    session: &mut DesignSession,
    gradation: FileGradationConfig,
    defaults: &DefaultsConfig,
) -> Result<()> {
    let proportions = gradation
        .mix_proportions
        .map(MixProportions::new)
        .unwrap_or(defaults.mix_proportions);
    session.set_proportions(proportions);

    for (sieve_label, row) in gradation.passing {
        let sieve = SieveSize::from_str(&sieve_label)
            .map_err(|e| CliError::Config(format!("In [gradation.passing]: {}", e)))?;
        for (aggregate_key, percent_passing) in row {
            let aggregate = AggregateId::from_str(&aggregate_key).map_err(|e| {
                CliError::Config(format!("In [gradation.passing.\"{}\"]: {}", sieve_label, e))
            })?;
            session.set_passing(sieve, aggregate, percent_passing);
        }
    }
    Ok(())
}

fn parse_float(key: &str, value_str: &str) -> Result<f64> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value_str)))
}

fn parse_integer(key: &str, value_str: &str) -> Result<usize> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid integer value for {}: {}", key, value_str)))
}

fn parse_proportions(key: &str, value_str: &str) -> Result<[f64; 4]> {
    let values = value_str
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|part| parse_float(key, part))
        .collect::<Result<Vec<f64>>>()?;
    <[f64; 4]>::try_from(values).map_err(|v| {
        CliError::Config(format!(
            "{} expects 4 comma-separated proportions, got {}",
            key,
            v.len()
        ))
    })
}

pub fn apply_set_values(config: &mut FileConfig, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "materials.gsb" | "materials.gmm" | "materials.gse" | "materials.gsa" => {
                let value = parse_float(key, value_str)?;
                let materials = config.materials.get_or_insert_with(Default::default);
                match key {
                    "materials.gsb" => materials.gsb = Some(value),
                    "materials.gmm" => materials.gmm = Some(value),
                    "materials.gse" => materials.gse = Some(value),
                    _ => materials.gsa = Some(value),
                }
            }
            "marshall.target-vtm" => {
                config
                    .marshall
                    .get_or_insert_with(Default::default)
                    .target_vtm = Some(parse_float(key, value_str)?);
            }
            "marshall.specimen-count" => {
                config
                    .marshall
                    .get_or_insert_with(Default::default)
                    .specimen_count = Some(parse_integer(key, value_str)?);
            }
            "gradation.sum-tolerance" => {
                config
                    .gradation
                    .get_or_insert_with(Default::default)
                    .sum_tolerance = Some(parse_float(key, value_str)?);
            }
            "gradation.mix-proportions" => {
                config
                    .gradation
                    .get_or_insert_with(Default::default)
                    .mix_proportions = Some(parse_proportions(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}
