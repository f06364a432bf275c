use std::path::{Path, PathBuf};

use crate::config::{Config, FilenameTable};
use crate::error::{ParseError, RsrError};
use crate::instrument::{instrument_for, is_mersi3_band, MERSI3_BAND_NAMES};

use super::model::{InstrumentRsr, RsrData};

/// Nanometres → micrometres.
pub const WAVELENGTH_SCALE: f64 = 0.001;

// ---------------------------------------------------------------------------
// Mersi3Rsr – one MERSI-3 band
// ---------------------------------------------------------------------------

/// RSR of one FY-3 MERSI-3 band, loaded from the vendor text file.
#[derive(Debug, Clone)]
pub struct Mersi3Rsr {
    bandname: String,
    platform_name: String,
    instrument: String,
    filenames: FilenameTable,
    filename: Option<PathBuf>,
    rsr: Option<RsrData>,
}

impl Mersi3Rsr {
    /// Resolve the band's file from `config` and load it.
    ///
    /// A band whose file is not configured or does not exist yields a loader
    /// without response data. Config and parse failures are returned as-is.
    pub fn new(bandname: &str, platform_name: &str, config: &Config) -> Result<Self, RsrError> {
        if !is_mersi3_band(bandname) {
            return Err(RsrError::UnknownBand(bandname.to_string()));
        }

        let instrument = instrument_for(platform_name);
        let filenames = config.band_filenames(platform_name, instrument, &MERSI3_BAND_NAMES)?;
        log::debug!("Filenames: {filenames:?}");

        let mut loader = Mersi3Rsr {
            bandname: bandname.to_string(),
            platform_name: platform_name.to_string(),
            instrument: instrument.to_string(),
            filenames,
            filename: None,
            rsr: None,
        };

        match loader.filenames.get(bandname).cloned().flatten() {
            Some(path) if path.exists() => {
                loader.rsr = Some(load_rsr(&path, WAVELENGTH_SCALE)?);
                loader.filename = Some(path);
            }
            _ => log::warn!("Couldn't find an existing file for this band: {bandname}"),
        }

        Ok(loader)
    }
}

impl InstrumentRsr for Mersi3Rsr {
    fn load(bandname: &str, platform_name: &str, config: &Config) -> Result<Self, RsrError> {
        Mersi3Rsr::new(bandname, platform_name, config)
    }

    fn bandname(&self) -> &str {
        &self.bandname
    }

    fn platform_name(&self) -> &str {
        &self.platform_name
    }

    fn instrument(&self) -> &str {
        &self.instrument
    }

    fn filenames(&self) -> &FilenameTable {
        &self.filenames
    }

    fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    fn rsr(&self) -> Option<&RsrData> {
        self.rsr.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Two-column text files
// ---------------------------------------------------------------------------

/// Load an RSR text file, multiplying the wavelength column by `scale`.
pub fn load_rsr(path: &Path, scale: f64) -> Result<RsrData, ParseError> {
    let [wavelength, response] = read_columns(path)?;
    Ok(RsrData {
        wavelength: wavelength.into_iter().map(|w| w * scale).collect(),
        response,
    })
}

/// File layout: one `<wavelength_nm> <response>` sample per line, separated by
/// any whitespace, no header. `#` starts a comment; blank lines are skipped.
/// Extra columns are allowed as long as every row has the same count.
fn read_columns(path: &Path) -> Result<[Vec<f64>; 2], ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut wavelength = Vec::new();
    let mut response = Vec::new();
    let mut n_columns: Option<usize> = None;

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let row = parse_row(line, path, line_no)?;

        if row.len() < 2 {
            return Err(ParseError::TooFewColumns {
                path: path.to_path_buf(),
                line: line_no,
                found: row.len(),
            });
        }
        match n_columns {
            None => n_columns = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(ParseError::Ragged {
                    path: path.to_path_buf(),
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }

        wavelength.push(row[0]);
        response.push(row[1]);
    }

    if wavelength.is_empty() {
        return Err(ParseError::Empty(path.to_path_buf()));
    }
    Ok([wavelength, response])
}

fn parse_row(line: &str, path: &Path, line_no: usize) -> Result<Vec<f64>, ParseError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                path: path.to_path_buf(),
                line: line_no,
                token: tok.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory with a config whose `FY-3F-mersi-3` section points
    /// at `chN.txt` for every band.
    fn setup(platform: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let bands: Vec<String> = MERSI3_BAND_NAMES
            .iter()
            .map(|b| format!(r#""{b}": "{b}.txt""#))
            .collect();
        let body = format!(
            r#"{{ "rsr_dir": "{out}", "{platform}-mersi-3": {{ "path": "{data}", {bands} }} }}"#,
            out = dir.path().join("out").display(),
            data = dir.path().display(),
            bands = bands.join(", "),
        );
        let config_path = dir.path().join("rsr_convert.json");
        std::fs::write(&config_path, body).unwrap();
        let config = Config::from_path(&config_path).unwrap();
        (dir, config)
    }

    fn write_band(dir: &Path, band: &str, contents: &str) {
        std::fs::write(dir.join(format!("{band}.txt")), contents).unwrap();
    }

    #[test]
    fn wavelength_is_scaled_and_response_kept() {
        let (dir, config) = setup("FY-3F");
        write_band(dir.path(), "ch3", "500.0 0.75\n501.0 0.80\n");

        let rsr = Mersi3Rsr::new("ch3", "FY-3F", &config).unwrap();
        let data = rsr.rsr().unwrap();

        assert!((data.wavelength[0] - 0.5).abs() < 1e-12);
        assert!((data.wavelength[1] - 0.501).abs() < 1e-12);
        assert_eq!(data.response, vec![0.75, 0.80]);
        assert_eq!(rsr.filename(), Some(dir.path().join("ch3.txt").as_path()));
        assert_eq!(rsr.bandname(), "ch3");
        assert_eq!(rsr.platform_name(), "FY-3F");
        assert_eq!(rsr.instrument(), "mersi-3");
    }

    #[test]
    fn every_band_loads_with_matching_lengths() {
        let (dir, config) = setup("FY-3F");
        for (i, band) in MERSI3_BAND_NAMES.iter().enumerate() {
            let rows: String = (0..=i)
                .map(|k| format!("{}\t{}\n", 400.0 + k as f64, 0.1 * k as f64))
                .collect();
            write_band(dir.path(), band, &rows);
        }

        for (i, band) in MERSI3_BAND_NAMES.iter().enumerate() {
            let rsr = Mersi3Rsr::new(band, "FY-3F", &config).unwrap();
            let data = rsr.rsr().unwrap();
            assert_eq!(data.wavelength.len(), data.response.len());
            assert_eq!(data.len(), i + 1);
            assert_eq!(rsr.filenames().len(), 25);
        }
    }

    #[test]
    fn missing_file_leaves_rsr_unset() {
        let (_dir, config) = setup("FY-3F");

        let rsr = Mersi3Rsr::new("ch7", "FY-3F", &config).unwrap();
        assert!(rsr.rsr().is_none());
        assert!(rsr.filename().is_none());
        assert!(rsr.filenames()["ch7"].is_some());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let (dir, config) = setup("FY-3F");
        write_band(dir.path(), "ch1", "400.0 0.1\nfoo 0.2\n");

        let err = Mersi3Rsr::new("ch1", "FY-3F", &config).unwrap_err();
        match err {
            RsrError::Parse(ParseError::InvalidNumber { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "foo");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ragged_and_short_rows_are_parse_errors() {
        let (dir, config) = setup("FY-3F");
        write_band(dir.path(), "ch1", "400.0 0.1 7\n401.0 0.2\n");
        write_band(dir.path(), "ch2", "400.0\n");
        write_band(dir.path(), "ch4", "# only a comment\n\n");

        let ragged = Mersi3Rsr::new("ch1", "FY-3F", &config).unwrap_err();
        assert!(matches!(
            ragged,
            RsrError::Parse(ParseError::Ragged { line: 2, expected: 3, found: 2, .. })
        ));

        let short = Mersi3Rsr::new("ch2", "FY-3F", &config).unwrap_err();
        assert!(matches!(short, RsrError::Parse(ParseError::TooFewColumns { found: 1, .. })));

        let empty = Mersi3Rsr::new("ch4", "FY-3F", &config).unwrap_err();
        assert!(matches!(empty, RsrError::Parse(ParseError::Empty(_))));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let (dir, config) = setup("FY-3F");
        write_band(
            dir.path(),
            "ch5",
            "# FY-3F MERSI band 5\n\n1370.0   0.01\n1380.0 0.98 # peak\n   \n",
        );

        let rsr = Mersi3Rsr::new("ch5", "FY-3F", &config).unwrap();
        let data = rsr.rsr().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.response, vec![0.01, 0.98]);
    }

    #[test]
    fn unknown_platform_uses_default_instrument() {
        let (dir, config) = setup("XY-1");
        write_band(dir.path(), "ch1", "412.0 1.0\n");

        let rsr = Mersi3Rsr::new("ch1", "XY-1", &config).unwrap();
        assert_eq!(rsr.instrument(), "mersi-3");
        assert!(rsr.rsr().is_some());
    }

    #[test]
    fn missing_config_section_propagates() {
        let (_dir, config) = setup("FY-3F");

        let err = Mersi3Rsr::new("ch1", "FY-3D", &config).unwrap_err();
        assert!(matches!(err, RsrError::Config(_)));
    }

    #[test]
    fn unknown_band_is_rejected() {
        let (_dir, config) = setup("FY-3F");
        let err = Mersi3Rsr::new("ch26", "FY-3F", &config).unwrap_err();
        assert!(matches!(err, RsrError::UnknownBand(ref b) if b == "ch26"));
    }

    #[test]
    fn reloading_gives_identical_data() {
        let (dir, config) = setup("FY-3F");
        let contents = "650.0 0.2\n655.5 0.9\n660.25 0.3\n";
        write_band(dir.path(), "ch3", contents);

        let first = Mersi3Rsr::new("ch3", "FY-3F", &config).unwrap();
        let second = Mersi3Rsr::new("ch3", "FY-3F", &config).unwrap();
        assert_eq!(first.rsr(), second.rsr());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("ch3.txt")).unwrap(),
            contents
        );
    }
}
