use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::types::{Recording, Sample};

/// 文件开头需要跳过的行数（分隔符声明、列名、单位）
const HEADER_ROWS: usize = 3;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
];

/// CSV 读取错误类型
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },
    #[error("No samples found in {0}")]
    Empty(PathBuf),
}

/// 病例号没有扩展名时补上 .csv
pub fn add_csv_extension(case: &str) -> PathBuf {
    let path = PathBuf::from(case);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("csv")
    }
}

/// 读取加速度记录：timeStamp, Acc_X, Acc_Y, Acc_Z（只读前四列）
pub fn read_recording(path: &Path) -> Result<Recording, ReadError> {
    info!("Reading csv file {}", path.display());

    let file = std::fs::File::open(path)?;
    let recording = read_recording_from(file, &recording_name(path))?;
    if recording.is_empty() {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    info!(
        "File read successfully: {} samples over {:.1}s",
        recording.len(),
        recording.duration_seconds()
    );
    Ok(recording)
}

/// 从任意 reader 解析（文件或内存中的文本）
pub fn read_recording_from<R: std::io::Read>(source: R, name: &str) -> Result<Recording, ReadError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    parse_records(reader, name.to_string())
}

fn parse_records<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    name: String,
) -> Result<Recording, ReadError> {
    let mut start: Option<NaiveDateTime> = None;
    let mut samples = Vec::new();

    for (row, record) in reader.records().enumerate().skip(HEADER_ROWS) {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(row as u64 + 1);

        // 跳过空行
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < 4 {
            return Err(ReadError::Parse {
                line,
                message: format!("expected 4 columns, found {}", record.len()),
            });
        }

        let timestamp = match parse_timestamp(&record[0]) {
            Some(Timestamp::Seconds(seconds)) => seconds,
            Some(Timestamp::DateTime(datetime)) => {
                let origin = *start.get_or_insert(datetime);
                datetime
                    .signed_duration_since(origin)
                    .num_nanoseconds()
                    .map(|ns| ns as f64 * 1e-9)
                    .ok_or_else(|| ReadError::Parse {
                        line,
                        message: "timestamp out of range".to_string(),
                    })?
            }
            None => {
                return Err(ReadError::Parse {
                    line,
                    message: format!("invalid timestamp '{}'", &record[0]),
                })
            }
        };

        let x = parse_value(&record[1], "Acc_X", line)?;
        let y = parse_value(&record[2], "Acc_Y", line)?;
        let z = parse_value(&record[3], "Acc_Z", line)?;
        samples.push(Sample::new(timestamp, x, y, z));
    }

    debug!("{} rows parsed from {}", samples.len(), name);
    Ok(Recording::new(name, start, samples))
}

enum Timestamp {
    Seconds(f64),
    DateTime(NaiveDateTime),
}

fn parse_timestamp(field: &str) -> Option<Timestamp> {
    if let Ok(seconds) = field.parse::<f64>() {
        return Some(Timestamp::Seconds(seconds));
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(field, format).ok())
        .map(Timestamp::DateTime)
}

fn parse_value(field: &str, column: &str, line: u64) -> Result<f64, ReadError> {
    field.parse::<f64>().map_err(|e| ReadError::Parse {
        line,
        message: format!("invalid {} value '{}': {}", column, field, e),
    })
}

fn recording_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXPORT: &str = "sep=,\n\
        timeStamp,Acc_X,Acc_Y,Acc_Z,Gyr_X\n\
        ,m/s2,m/s2,m/s2,deg/s\n\
        2024-03-25 10:15:02.000,0.1,-0.2,9.7,1.0\n\
        2024-03-25 10:15:02.005,0.2,-0.1,9.8,1.0\n\
        2024-03-25 10:15:02.010,0.3,0.0,9.9,1.0\n";

    #[test]
    fn test_parses_datetime_export() {
        let recording = read_recording_from(EXPORT.as_bytes(), "case").unwrap();
        assert_eq!(recording.len(), 3);
        assert!(recording.start.is_some());
        assert_eq!(recording.samples[0].timestamp, 0.0);
        assert!((recording.samples[1].timestamp - 0.005).abs() < 1e-12);
        assert!((recording.samples[2].timestamp - 0.010).abs() < 1e-12);
        assert_eq!(recording.samples[2].z, 9.9);
        assert_eq!(recording.samples[0].y, -0.2);
    }

    #[test]
    fn test_numeric_timestamps() {
        let data = "a\nb\nc\n0.0,1,2,3\n0.5,4,5,6\n";
        let recording = read_recording_from(data.as_bytes(), "numeric").unwrap();
        assert!(recording.start.is_none());
        assert_eq!(recording.samples[1], Sample::new(0.5, 4.0, 5.0, 6.0));
    }

    #[test]
    fn test_bad_value_reports_line() {
        let data = "a\nb\nc\n0.0,1,2,3\n0.5,4,oops,6\n";
        match read_recording_from(data.as_bytes(), "bad") {
            Err(ReadError::Parse { line, .. }) => assert_eq!(line, 5),
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_add_csv_extension() {
        assert_eq!(add_csv_extension("H1234"), PathBuf::from("H1234.csv"));
        assert_eq!(add_csv_extension("data/H1234.csv"), PathBuf::from("data/H1234.csv"));
    }

    #[test]
    fn test_read_file_and_empty_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("recovery_score_reader_{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        drop(file);

        let recording = read_recording(&path).unwrap();
        assert_eq!(recording.len(), 3);
        assert!(recording.name.starts_with("recovery_score_reader_"));

        std::fs::write(&path, "sep=,\nheader\nunits\n").unwrap();
        assert!(matches!(read_recording(&path), Err(ReadError::Empty(_))));
        std::fs::remove_file(&path).unwrap();
    }
}
