//! Generate a deterministic synthetic housing dataset for demos and manual
//! testing. The columns mirror the Boston housing layout used by the app's
//! default preset.

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

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 506;

    let output_path = "sample_housing.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    writer
        .write_record(["crim", "zn", "indus", "chas", "rm", "age", "lstat", "medv"])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        // Crime rate: heavily right-skewed, like the real column.
        let crim = (rng.gauss(0.0, 1.2).abs()).powi(2).min(90.0);
        let zn = if rng.next_f64() < 0.7 {
            0.0
        } else {
            (rng.next_f64() * 100.0).round()
        };
        let indus = 2.0 + rng.next_f64() * 25.0;
        let chas = if rng.next_f64() < 0.07 { 1.0 } else { 0.0 };
        let rm = rng.gauss(6.3, 0.7).clamp(3.5, 9.0);
        let age = (rng.next_f64() * 100.0).clamp(2.0, 100.0);
        let lstat = rng.gauss(12.5, 7.0).clamp(1.5, 38.0);

        // Home value tracks rooms up and crime/status down, plus a river
        // premium and noise.
        let medv = (22.0 + 5.0 * (rm - 6.3) - 0.3 * (lstat - 12.5) - 0.15 * crim
            + 3.0 * chas
            + rng.gauss(0.0, 2.5))
        .clamp(5.0, 50.0);

        writer
            .write_record([
                format!("{crim:.5}"),
                format!("{zn:.1}"),
                format!("{indus:.2}"),
                format!("{chas:.0}"),
                format!("{rm:.3}"),
                format!("{age:.1}"),
                format!("{lstat:.2}"),
                format!("{medv:.1}"),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_rows} rows to {output_path}");
}
