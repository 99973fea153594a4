use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SHARED_WORDS: &[&str] = &[
    "said", "trump", "president", "people", "state", "new", "year", "time", "government",
    "house", "election", "clinton", "would", "also", "campaign",
];

const FAKE_WORDS: &[&str] = &[
    "hillary", "video", "watch", "obama", "breaking", "shocking", "truth", "media", "exposed",
    "wow", "just", "like", "america", "via", "image", "featured", "getty", "twitter",
];

const REAL_WORDS: &[&str] = &[
    "reuters", "washington", "official", "minister", "told", "percent", "statement",
    "republican", "senate", "tax", "week", "security", "talks", "spokesman", "thursday",
    "tuesday", "united", "nations",
];

const ROWS_PER_LABEL: usize = 500;
const MISSING_EVERY: usize = 97;

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

    /// Zipf-ish pick: low indices are much more likely.
    fn skewed_index(&mut self, len: usize) -> usize {
        let u = self.next_f64();
        ((u * u * len as f64) as usize).min(len - 1)
    }

    fn range(&mut self, lo: usize, hi: usize) -> usize {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as usize
    }
}

/// One preprocessed article: lowercase tokens joined by single spaces.
fn generate_text(rng: &mut SimpleRng, own: &[&str]) -> String {
    let n_tokens = rng.range(12, 60);
    (0..n_tokens)
        .map(|_| {
            if rng.next_f64() < 0.35 {
                SHARED_WORDS[rng.skewed_index(SHARED_WORDS.len())]
            } else {
                own[rng.skewed_index(own.len())]
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut texts: Vec<Option<String>> = Vec::new();
    let mut labels: Vec<Option<&str>> = Vec::new();

    for i in 0..ROWS_PER_LABEL * 2 {
        let (label, own) = if i % 2 == 0 {
            ("Fake", FAKE_WORDS)
        } else {
            ("Real", REAL_WORDS)
        };
        let text = generate_text(&mut rng, own);

        // sprinkle incomplete rows so the loader has something to drop
        if i % MISSING_EVERY == 0 {
            texts.push(Some(text));
            labels.push(None);
        } else if i % MISSING_EVERY == 1 {
            texts.push(None);
            labels.push(Some(label));
        } else {
            texts.push(Some(text));
            labels.push(Some(label));
        }
    }

    // CSV
    let csv_path = "news_preprocessed.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    writer.write_record(["preprocessed_text", "Label"])?;
    for (text, label) in texts.iter().zip(&labels) {
        writer.write_record([text.as_deref().unwrap_or(""), label.unwrap_or("")])?;
    }
    writer.flush()?;

    // Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("preprocessed_text", DataType::Utf8, true),
        Field::new("Label", DataType::Utf8, true),
    ]));
    let text_array = StringArray::from(texts.iter().map(|t| t.as_deref()).collect::<Vec<_>>());
    let label_array = StringArray::from(labels.clone());
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(text_array), Arc::new(label_array)],
    )
    .context("building record batch")?;

    let parquet_path = "news_preprocessed.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    let complete = texts
        .iter()
        .zip(&labels)
        .filter(|(t, l)| t.is_some() && l.is_some())
        .count();
    println!(
        "Wrote {} rows ({} complete) to {csv_path} and {parquet_path}",
        texts.len(),
        complete
    );
    Ok(())
}
