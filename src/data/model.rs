use std::path::Path;

use crate::config::{Config, FilenameTable};
use crate::error::RsrError;

// ---------------------------------------------------------------------------
// RsrData – one band's response curve
// ---------------------------------------------------------------------------

/// Relative spectral response of a single band.
#[derive(Debug, Clone, PartialEq)]
pub struct RsrData {
    /// Wavelength axis in micrometres.
    pub wavelength: Vec<f64>,
    /// Relative response (unitless) – same length as `wavelength`.
    pub response: Vec<f64>,
}

impl RsrData {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Copy of the curve without the samples whose wavelength is NaN.
    pub fn without_nan_wavelengths(&self) -> RsrData {
        let (wavelength, response) = self
            .wavelength
            .iter()
            .zip(&self.response)
            .filter(|(w, _)| !w.is_nan())
            .map(|(w, r)| (*w, *r))
            .unzip();
        RsrData {
            wavelength,
            response,
        }
    }
}

// ---------------------------------------------------------------------------
// InstrumentRsr – what the archive converter needs from a band loader
// ---------------------------------------------------------------------------

/// A per-band RSR loader for one instrument.
///
/// Implementations do all their work in [`InstrumentRsr::load`]; the result is
/// read-only.
pub trait InstrumentRsr: Sized {
    fn load(bandname: &str, platform_name: &str, config: &Config) -> Result<Self, RsrError>;

    fn bandname(&self) -> &str;

    fn platform_name(&self) -> &str;

    /// Resolved instrument label, e.g. `mersi-3`.
    fn instrument(&self) -> &str;

    /// Band → path table for every band of the instrument.
    fn filenames(&self) -> &FilenameTable;

    /// Path the response was read from, if any.
    fn filename(&self) -> Option<&Path>;

    /// `None` when no file exists for the band.
    fn rsr(&self) -> Option<&RsrData>;
}
