use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::config::Config;
use crate::data::model::{InstrumentRsr, RsrData};

/// Unit of the stored wavelength after applying [`WAVELENGTH_SCALE`].
pub const WAVELENGTH_UNIT: &str = "m";
/// Stored wavelengths are micrometres.
pub const WAVELENGTH_SCALE: &str = "1e-06";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every band in `band_names` with `R` and write the ones that have data
/// to `<rsr_dir>/rsr_<instrument>_<platform>.parquet`.
///
/// Archive layout: one row per band with data, columns
/// * `band`       – Utf8 band name
/// * `wavelength` – List<Float64>, micrometres
/// * `response`   – List<Float64>
///
/// File-level attributes go into the Arrow schema metadata.
pub fn convert_to_archive<R: InstrumentRsr>(
    platform_name: &str,
    band_names: &[&str],
    config: &Config,
) -> Result<PathBuf> {
    let Some(&first_band) = band_names.first() else {
        bail!("No bands requested for {platform_name}");
    };
    let probe = R::load(first_band, platform_name, config)
        .with_context(|| format!("loading {first_band} for {platform_name}"))?;
    let instrument = probe.instrument().to_string();
    log::debug!(
        "{} of {} bands have a configured file",
        probe.filenames().values().filter(|p| p.is_some()).count(),
        band_names.len()
    );

    let mut rows: Vec<(String, RsrData)> = Vec::with_capacity(band_names.len());
    for &band in band_names {
        let sensor = R::load(band, platform_name, config)
            .with_context(|| format!("loading {band} for {platform_name}"))?;
        match (sensor.rsr(), sensor.filename()) {
            (Some(rsr), Some(source)) if !rsr.is_empty() => {
                log::debug!(
                    "{} {}: {} samples from {}",
                    sensor.platform_name(),
                    sensor.bandname(),
                    rsr.len(),
                    source.display()
                );
                rows.push((band.to_string(), rsr.without_nan_wavelengths()));
            }
            _ => log::info!(
                "No RSR data for {} {}, skipping",
                sensor.platform_name(),
                sensor.bandname()
            ),
        }
    }

    if rows.is_empty() {
        bail!("No RSR data found for any {instrument} band on {platform_name}");
    }

    std::fs::create_dir_all(&config.rsr_dir)
        .with_context(|| format!("creating output directory {}", config.rsr_dir.display()))?;
    let path = config
        .rsr_dir
        .join(archive_file_name(&instrument, platform_name));

    let metadata = archive_metadata(&instrument, platform_name, band_names);
    write_parquet(&path, &rows, metadata)?;

    log::info!(
        "Wrote {} of {} bands for {platform_name} to {}",
        rows.len(),
        band_names.len(),
        path.display()
    );
    Ok(path)
}

/// `rsr_<instrument>_<platform>.parquet`, with `/` stripped from the
/// instrument name (e.g. `avhrr/3`).
pub fn archive_file_name(instrument: &str, platform_name: &str) -> String {
    let instrument = instrument.replace('/', "");
    format!("rsr_{instrument}_{platform_name}.parquet")
}

fn archive_metadata(
    instrument: &str,
    platform_name: &str,
    band_names: &[&str],
) -> HashMap<String, String> {
    HashMap::from([
        (
            "description".to_string(),
            format!("Relative Spectral Responses for {}", instrument.to_uppercase()),
        ),
        ("platform_name".to_string(), platform_name.to_string()),
        ("instrument".to_string(), instrument.to_string()),
        ("band_names".to_string(), band_names.join(",")),
        ("wavelength_unit".to_string(), WAVELENGTH_UNIT.to_string()),
        ("wavelength_scale".to_string(), WAVELENGTH_SCALE.to_string()),
    ])
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

fn write_parquet(
    path: &Path,
    rows: &[(String, RsrData)],
    metadata: HashMap<String, String>,
) -> Result<()> {
    let mut wavelength_builder = ListBuilder::new(Float64Builder::new());
    let mut response_builder = ListBuilder::new(Float64Builder::new());
    for (_, rsr) in rows {
        wavelength_builder.values().append_slice(&rsr.wavelength);
        wavelength_builder.append(true);
        response_builder.values().append_slice(&rsr.response);
        response_builder.append(true);
    }

    let band_array = StringArray::from(
        rows.iter().map(|(band, _)| band.as_str()).collect::<Vec<_>>(),
    );

    let item = Arc::new(Field::new("item", DataType::Float64, true));
    let schema = Arc::new(
        Schema::new(vec![
            Field::new("band", DataType::Utf8, false),
            Field::new("wavelength", DataType::List(item.clone()), false),
            Field::new("response", DataType::List(item), false),
        ])
        .with_metadata(metadata),
    );

    let columns: Vec<ArrayRef> = vec![
        Arc::new(band_array),
        Arc::new(wavelength_builder.finish()),
        Arc::new(response_builder.finish()),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating archive {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
