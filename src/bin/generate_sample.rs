use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};

use nist_linelist::config::DEFAULT_INPUT_DIR;
use nist_linelist::data::loader::format_fixed_width;
use nist_linelist::data::model::RawLine;

/// Minimal deterministic PRNG (xoshiro256**). Seeded, so repeated runs
/// write identical sample files and no `rand` dependency is needed.
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Strength codes as they appear in NIST intensity fields.
const CODES: [&str; 8] = ["", "", "", "p", "bl", "h", "w", "c"];

/// Reference wavelengths (nm) per lamp species.
const LAMPS: [(&str, &str, &[f64]); 3] = [
    ("He I", "Kramida 2020", &[388.865, 447.148, 501.568, 587.562, 667.815, 706.519]),
    ("Ne I", "Saloman 2004", &[540.056, 585.249, 614.306, 640.225, 703.241]),
    ("Ar I", "Whaling 1995", &[696.543, 706.722, 738.398, 750.387, 763.511, 811.531, 912.297]),
];

fn lines_for(species: &str, reference: &str, wavelengths: &[f64], rng: &mut SimpleRng) -> Vec<RawLine> {
    wavelengths
        .iter()
        .map(|&wl| {
            let intensity = 1 + (rng.next_f64() * 999.0) as u32;
            RawLine {
                intensity: format!("{intensity}{}", rng.pick(&CODES)),
                wavelength: wl,
                element: species.to_string(),
                reference: reference.to_string(),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let mut total = 0;

    for (i, (species, reference, wavelengths)) in LAMPS.iter().enumerate() {
        let lines = lines_for(species, reference, wavelengths, &mut rng);
        total += lines.len();

        // One layout per file: comma, whitespace, fixed-width.
        let mut text = format!("# NIST lines for {species}\n");
        for line in &lines {
            let written = match i {
                0 => writeln!(
                    text,
                    "{},{},{},{}",
                    line.intensity, line.wavelength, line.element, line.reference
                ),
                1 => writeln!(
                    text,
                    "{} {} {} {}",
                    line.intensity,
                    line.wavelength,
                    line.element.replace(' ', "_"),
                    line.reference.replace(' ', "_")
                ),
                _ => writeln!(text, "{}", format_fixed_width(line)),
            };
            written.context("formatting sample line")?;
        }

        let file_name = format!("{}.txt", species.replace(' ', "_"));
        let path = out_dir.join(file_name);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "Wrote {total} lines in {} files to {}",
        LAMPS.len(),
        out_dir.display()
    );
    Ok(())
}
