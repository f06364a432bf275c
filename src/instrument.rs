// ---------------------------------------------------------------------------
// Instrument tables
// ---------------------------------------------------------------------------

/// Default instrument label when a platform is not in [`INSTRUMENTS`].
pub const DEFAULT_INSTRUMENT: &str = "mersi-3";

/// MERSI-3 channels, in archive order.
pub const MERSI3_BAND_NAMES: [&str; 25] = [
    "ch1", "ch2", "ch3", "ch4", "ch5", "ch6", "ch7", "ch8", "ch9", "ch10", "ch11", "ch12", "ch13",
    "ch14", "ch15", "ch16", "ch17", "ch18", "ch19", "ch20", "ch21", "ch22", "ch23", "ch24", "ch25",
];

/// Platform name → instrument alias.
pub const INSTRUMENTS: &[(&str, &str)] = &[
    ("FY-3B", "virr"),
    ("FY-3C", "virr"),
    ("FY-3D", "mersi-2"),
    ("FY-3E", "mersi-ll"),
    ("FY-3F", "mersi-3"),
    ("FY-3G", "mersi-rm"),
    ("Suomi-NPP", "viirs"),
    ("NOAA-20", "viirs"),
    ("NOAA-21", "viirs"),
    ("Metop-A", "avhrr/3"),
    ("Metop-B", "avhrr/3"),
    ("Metop-C", "avhrr/3"),
    ("Sentinel-3A", "olci"),
    ("Sentinel-3B", "olci"),
    ("Himawari-8", "ahi"),
    ("Himawari-9", "ahi"),
    ("GOES-16", "abi"),
    ("GOES-17", "abi"),
    ("GOES-18", "abi"),
];

/// Look up the instrument alias for a platform, falling back to
/// [`DEFAULT_INSTRUMENT`].
pub fn instrument_for(platform_name: &str) -> &'static str {
    INSTRUMENTS
        .iter()
        .find(|(platform, _)| *platform == platform_name)
        .map(|(_, instrument)| *instrument)
        .unwrap_or(DEFAULT_INSTRUMENT)
}

pub fn is_mersi3_band(band: &str) -> bool {
    MERSI3_BAND_NAMES.contains(&band)
}
