use std::path::Path;

use anyhow::Result;

use iris_data::data::model::IrisRecord;
use iris_data::data::writer;

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

/// Draw one measurement: Gaussian around the per-species mean, clamped
/// non-negative, rounded to one decimal like the published dataset.
fn measurement(rng: &mut SimpleRng, mean: f64, std_dev: f64) -> f32 {
    let v = rng.gauss(mean, std_dev).max(0.0);
    ((v * 10.0).round() / 10.0) as f32
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Per-feature (mean, std) in column order, from the published
    // per-species statistics of the Iris dataset.
    let species_stats: [(&str, [(f64, f64); 4]); 3] = [
        ("setosa", [(5.006, 0.35), (3.428, 0.38), (1.462, 0.17), (0.246, 0.11)]),
        ("versicolor", [(5.936, 0.52), (2.770, 0.31), (4.260, 0.47), (1.326, 0.20)]),
        ("virginica", [(6.588, 0.64), (2.974, 0.32), (5.552, 0.55), (2.026, 0.27)]),
    ];
    let rows_per_species = 50;

    let mut records = Vec::with_capacity(species_stats.len() * rows_per_species);
    for (species, stats) in &species_stats {
        for _ in 0..rows_per_species {
            let [sl, sw, pl, pw] = stats.map(|(mean, std)| measurement(&mut rng, mean, std));
            records.push(IrisRecord::new(sl, sw, pl, pw, Some((*species).to_string())));
        }
    }

    writer::write_csv(&records, Path::new("sample_iris.csv"))?;
    writer::write_parquet(&records, Path::new("sample_iris.parquet"))?;

    // A handful of unlabeled rows, as an inference-time input sample.
    let unlabeled: Vec<IrisRecord> = (0..10)
        .map(|i| {
            let (_, stats) = species_stats[i % species_stats.len()];
            let [sl, sw, pl, pw] = stats.map(|(mean, std)| measurement(&mut rng, mean, std));
            IrisRecord::new(sl, sw, pl, pw, None)
        })
        .collect();
    writer::write_csv(&unlabeled, Path::new("sample_iris_unlabeled.csv"))?;

    println!(
        "Wrote {} labeled rows to sample_iris.csv / sample_iris.parquet and {} unlabeled rows to sample_iris_unlabeled.csv",
        records.len(),
        unlabeled.len()
    );
    Ok(())
}
