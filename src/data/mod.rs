/// Data layer: response curves and the per-band loader.
///
/// Architecture:
/// ```text
///  config (band → path)      chN.txt
///        │                      │
///        ▼                      ▼
///   ┌──────────────────────────────┐
///   │  loader   resolve, parse, ×0.001 │
///   └──────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ RsrData   │  wavelength (µm), response
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
