use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

/// Nominal MERSI-3 channel centres and full widths, nanometres.
const CHANNELS: [(&str, f64, f64); 25] = [
    ("ch1", 470.0, 50.0),
    ("ch2", 550.0, 50.0),
    ("ch3", 650.0, 50.0),
    ("ch4", 865.0, 50.0),
    ("ch5", 1380.0, 20.0),
    ("ch6", 1640.0, 50.0),
    ("ch7", 2130.0, 50.0),
    ("ch8", 412.0, 20.0),
    ("ch9", 443.0, 20.0),
    ("ch10", 490.0, 20.0),
    ("ch11", 555.0, 20.0),
    ("ch12", 670.0, 20.0),
    ("ch13", 709.0, 20.0),
    ("ch14", 746.0, 20.0),
    ("ch15", 865.0, 20.0),
    ("ch16", 905.0, 20.0),
    ("ch17", 936.0, 20.0),
    ("ch18", 940.0, 50.0),
    ("ch19", 1030.0, 20.0),
    ("ch20", 3800.0, 180.0),
    ("ch21", 4050.0, 155.0),
    ("ch22", 7200.0, 500.0),
    ("ch23", 8550.0, 300.0),
    ("ch24", 10800.0, 1000.0),
    ("ch25", 12000.0, 1000.0),
];

const PLATFORM: &str = "FY-3F";
const DATA_DIR: &str = "sample_rsr";
const CONFIG_FILE: &str = "rsr_convert.json";
const SAMPLES_PER_BAND: usize = 201;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Response curve over `centre ± 2 * width`, peak-normalised to 1.
fn generate_response(centre: f64, width: f64, rng: &mut SimpleRng) -> Vec<(f64, f64)> {
    let sigma = width / 2.355;
    let start = centre - 2.0 * width;
    let step = 4.0 * width / (SAMPLES_PER_BAND - 1) as f64;

    (0..SAMPLES_PER_BAND)
        .map(|i| {
            let wl = start + i as f64 * step;
            let response = gaussian(wl, centre, sigma, 1.0) + rng.gauss(0.0, 0.002);
            (wl, response.clamp(0.0, 1.0))
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_band_file(path: &Path, band: &str, samples: &[(f64, f64)]) -> Result<()> {
    let mut text = String::new();
    writeln!(text, "# {PLATFORM} MERSI-3 {band} synthetic relative spectral response")?;
    for (wl, response) in samples {
        writeln!(text, "{wl:.3}\t{response:.6}")?;
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let data_dir = Path::new(DATA_DIR);
    std::fs::create_dir_all(data_dir).context("creating sample directory")?;

    let mut section = Map::new();
    section.insert("path".to_string(), json!(DATA_DIR));

    for (band, centre, width) in CHANNELS {
        let filename = format!("FY3F_MERSI_SRF_{}.txt", band.to_uppercase());
        let samples = generate_response(centre, width, &mut rng);
        write_band_file(&data_dir.join(&filename), band, &samples)?;
        section.insert(band.to_string(), json!(filename));
    }

    let mut config = Map::new();
    config.insert("rsr_dir".to_string(), json!("."));
    config.insert(format!("{PLATFORM}-mersi-3"), Value::Object(section));
    let config = Value::Object(config);
    let text = serde_json::to_string_pretty(&config).context("serializing config")?;
    std::fs::write(CONFIG_FILE, text).context("writing config")?;

    println!(
        "Wrote {} bands ({SAMPLES_PER_BAND} samples each) to {DATA_DIR}/ and {CONFIG_FILE}",
        CHANNELS.len()
    );
    Ok(())
}
