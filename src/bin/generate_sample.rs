use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use acceptance_viewer::config::DEFAULT_DATA_DIR;
use acceptance_viewer::data::model::{Category, PredictionRecord};
use acceptance_viewer::data::registry::ModelId;

const ROWS_PER_MODEL: usize = 400;
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

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

/// Submission ids shared by every model, so searches work across models.
fn submission_ids(rng: &mut SimpleRng, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            (0..10)
                .map(|_| ID_ALPHABET[(rng.next_u64() % ID_ALPHABET.len() as u64) as usize] as char)
                .collect()
        })
        .collect()
}

/// Softmax over logits biased towards rejection, roughly matching real
/// acceptance rates.
fn predict(id: &str, rng: &mut SimpleRng, sharpness: f64) -> PredictionRecord {
    let bias = [-2.2, -1.2, 0.3, 1.0];
    let logits: Vec<f64> = bias
        .iter()
        .map(|b| (b + rng.gauss(0.0, 1.0)) * sharpness)
        .collect();
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exp.iter().sum();
    let proba: Vec<f64> = exp.iter().map(|e| round4(e / sum)).collect();

    let (best, _) = proba
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (i, &p)| if p > acc.1 { (i, p) } else { acc });

    PredictionRecord {
        id: id.to_string(),
        pred_status: Category::ALL[best].as_str().to_string(),
        proba_oral: proba[0],
        proba_spotlight: proba[1],
        proba_poster: proba[2],
        proba_reject: proba[3],
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[derive(Serialize)]
struct ValidationMetrics {
    model: &'static str,
    split: &'static str,
    accuracy: f64,
    balanced_accuracy: f64,
    macro_f1: f64,
    n_samples: usize,
}

fn main() -> Result<()> {
    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let mut rng = SimpleRng::new(42);
    let ids = submission_ids(&mut rng, ROWS_PER_MODEL);

    for (seed, model) in ModelId::ALL.into_iter().enumerate() {
        let source = model.source();
        let mut rng = SimpleRng::new(1000 + seed as u64);
        let sharpness = 1.0 + seed as f64 * 0.25;

        let dataset_path = source.dataset_path(&root);
        if let Some(dir) = dataset_path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let mut writer = csv::Writer::from_path(&dataset_path)
            .with_context(|| format!("creating {}", dataset_path.display()))?;
        for id in &ids {
            writer.serialize(predict(id, &mut rng, sharpness))?;
        }
        writer.flush()?;
        println!("Wrote {} predictions to {}", ids.len(), dataset_path.display());

        // Logistic regression ships without metrics to exercise the placeholder.
        if model == ModelId::LogisticRegression {
            continue;
        }

        let accuracy = round4(0.55 + rng.next_f64() * 0.2);
        let metrics = ValidationMetrics {
            model: source.key,
            split: "validation",
            accuracy,
            balanced_accuracy: round4(accuracy - 0.08),
            macro_f1: round4(accuracy - 0.15),
            n_samples: ROWS_PER_MODEL / 2,
        };
        let metrics_path = source.metrics_path(&root);
        if let Some(dir) = metrics_path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let file = File::create(&metrics_path)
            .with_context(|| format!("creating {}", metrics_path.display()))?;
        serde_json::to_writer_pretty(file, &metrics)?;
        println!("Wrote metrics to {}", metrics_path.display());
    }

    Ok(())
}
