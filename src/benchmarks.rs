// Benchmark tables on disk: one CSV per category and source.
use crate::model::{BenchmarkEntry, BenchmarkError, Category};
use serde::Deserialize;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

pub const CPU_NAME_HEADER: &str = "Processador";
pub const GPU_NAME_HEADER: &str = "Placa de Vídeo";
pub const SCORE_HEADER: &str = "Pontuação";

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    #[serde(alias = "Processador", alias = "Placa de Vídeo")]
    display_name: String,
    #[serde(rename = "Pontuação")]
    score: u32,
}

pub fn name_header(category: Category) -> &'static str {
    match category {
        Category::Cpu => CPU_NAME_HEADER,
        Category::Gpu => GPU_NAME_HEADER,
    }
}

/// Reads benchmark rows. Rows that fail to parse (missing name, negative or
/// non-numeric score) are skipped with a warning; the rest of the file survives.
pub fn read_benchmarks<R: Read>(reader: R) -> Result<Vec<BenchmarkEntry>, BenchmarkError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for row in rdr.deserialize::<BenchmarkRow>() {
        match row {
            Ok(row) if !row.display_name.trim().is_empty() => entries.push(BenchmarkEntry {
                display_name: row.display_name.trim().to_string(),
                score: row.score,
            }),
            Ok(_) => skipped += 1,
            Err(e) => {
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(e.into());
                }
                warn!("Skipping benchmark row: {}", e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} malformed benchmark rows", skipped);
    }
    Ok(entries)
}

pub fn load_benchmarks(path: impl AsRef<Path>) -> Result<Vec<BenchmarkEntry>, BenchmarkError> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let entries = read_benchmarks(file)?;
    info!("Loaded {} benchmark rows from {}", entries.len(), path.display());
    Ok(entries)
}

pub fn write_benchmarks<W: Write>(
    writer: W,
    category: Category,
    entries: &[BenchmarkEntry],
) -> Result<(), BenchmarkError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([name_header(category), SCORE_HEADER])?;
    for entry in entries {
        let score = entry.score.to_string();
        wtr.write_record([entry.display_name.as_str(), score.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_benchmarks(
    path: impl AsRef<Path>,
    category: Category,
    entries: &[BenchmarkEntry],
) -> Result<(), BenchmarkError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_benchmarks(fs::File::create(path)?, category, entries)?;
    info!("Saved {} benchmark rows to {}", entries.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_header_variants() {
        let cpu = "Processador,Pontuação\nRyzen 7 7700X,180\nCore i5-13400F,140\n";
        let entries = read_benchmarks(cpu.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "Ryzen 7 7700X");
        assert_eq!(entries[1].score, 140);

        let gpu = "Placa de Vídeo,Pontuação\nRTX 4070 Super,104\n";
        let entries = read_benchmarks(gpu.as_bytes()).unwrap();
        assert_eq!(entries[0].display_name, "RTX 4070 Super");
    }

    #[test]
    fn bad_rows_are_skipped() {
        let csv = "Processador,Pontuação\nRyzen 5 5600,-3\nRyzen 5 7600,abc\n,10\nRyzen 9 7950X,220\n";
        let entries = read_benchmarks(csv.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![BenchmarkEntry { display_name: "Ryzen 9 7950X".into(), score: 220 }]
        );
    }

    #[test]
    fn written_file_reads_back() {
        let entries = vec![BenchmarkEntry { display_name: "RX 7600".into(), score: 61 }];
        let mut buf = Vec::new();
        write_benchmarks(&mut buf, Category::Gpu, &entries).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("Placa de Vídeo,Pontuação"));
        assert_eq!(read_benchmarks(buf.as_slice()).unwrap(), entries);
    }
}
