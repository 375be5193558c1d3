use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic launch dataset for trying out the dashboard.
#[derive(Parser, Debug)]
struct Args {
    /// Output file; `.csv` or `.parquet`
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches to generate
    #[arg(short, long, default_value_t = 56)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order with their success probability.
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.2),
    ("v1.1", 0.35),
    ("FT", 0.7),
    ("B4", 0.55),
    ("B5", 0.9),
];

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(count: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..count)
        .map(|i| {
            // Later flights fly newer boosters and heavier payloads.
            let era = i * BOOSTERS.len() / count.max(1);
            let (booster, success_rate) = BOOSTERS[era];
            let ceiling = 2_000.0 + 8_000.0 * (era as f64 / (BOOSTERS.len() - 1) as f64);
            let payload = (rng.next_f64() * ceiling).round();
            Row {
                flight_number: i as i64 + 1,
                launch_site: *rng.pick(&SITES),
                class: (rng.next_f64() < success_rate) as i64,
                payload_mass_kg: payload.min(9_600.0),
                booster_category: booster,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate(args.count, &mut rng);

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&args.output, &rows)?,
        "parquet" | "pq" => write_parquet(&args.output, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    log::info!("Wrote {} launches to {}", rows.len(), args.output.display());
    println!("Wrote {} launches to {}", rows.len(), args.output.display());
    Ok(())
}

#[cfg(test)]
#[path = "../data/mod.rs"]
mod data;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_file, read_csv};
    use crate::data::model::PayloadRange;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("generate-sample-{}-{name}", std::process::id()))
    }

    fn extent(rows: &[Row]) -> PayloadRange {
        let low = rows.iter().map(|r| r.payload_mass_kg).fold(f64::INFINITY, f64::min);
        let high = rows.iter().map(|r| r.payload_mass_kg).fold(f64::NEG_INFINITY, f64::max);
        PayloadRange::new(low, high)
    }

    #[test]
    fn generated_csv_reads_back() {
        let rows = generate(40, &mut SimpleRng::new(7));
        let path = temp_path("launches.csv");
        write_csv(&path, &rows).unwrap();
        let ds = read_csv(std::fs::File::open(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let ds = ds.unwrap();
        assert_eq!(ds.len(), rows.len());
        assert_eq!(ds.payload_extent(), Some(extent(&rows)));
        for (row, rec) in rows.iter().zip(ds.records()) {
            assert_eq!(rec.launch_site, row.launch_site);
            assert_eq!(rec.payload_mass_kg, row.payload_mass_kg);
            assert_eq!(rec.outcome.class() as i64, row.class);
            assert_eq!(rec.booster_category, row.booster_category);
        }
    }

    #[test]
    fn generated_parquet_reads_back() {
        let rows = generate(25, &mut SimpleRng::new(42));
        let path = temp_path("launches.parquet");
        write_parquet(&path, &rows).unwrap();
        let ds = load_file(&path);
        std::fs::remove_file(&path).unwrap();

        let ds = ds.unwrap();
        assert_eq!(ds.len(), 25);
        assert_eq!(ds.payload_extent(), Some(extent(&rows)));
        assert!(ds.sites().iter().all(|s| SITES.contains(&s.as_str())));
    }

    #[test]
    fn same_seed_same_rows() {
        let a = generate(10, &mut SimpleRng::new(3));
        let b = generate(10, &mut SimpleRng::new(3));
        let key = |rows: &[Row]| -> Vec<(f64, i64)> {
            rows.iter().map(|r| (r.payload_mass_kg, r.class)).collect()
        };
        assert_eq!(key(&a), key(&b));
    }
}
