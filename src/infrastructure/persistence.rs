use crate::domain::{HistoryEntry, Session};
use std::fs;

pub struct FileRepository;

impl FileRepository {
    pub fn save_session(session: &Session, filename: &str) -> Result<String, String> {
        match serde_json::to_string_pretty(session) {
            Ok(json) => {
                match fs::write(filename, &json) {
                    Ok(_) => Ok(filename.to_string()),
                    Err(e) => Err(e.to_string()),
                }
            }
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    /// Loads a session from a file path or an `http(s)://` URL.
    pub fn load_session(source: &str) -> Result<(Session, String), String> {
        let content = Self::read_source(source)?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok((session, source.to_string())),
            Err(e) => Err(format!("Invalid file format - {}", e)),
        }
    }

    fn read_source(source: &str) -> Result<String, String> {
        if source.starts_with("http://") || source.starts_with("https://") {
            match reqwest::blocking::get(source) {
                Ok(response) => {
                    match response.error_for_status() {
                        Ok(response) => response.text().map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    }
                }
                Err(e) => Err(e.to_string()),
            }
        } else {
            fs::read_to_string(source).map_err(|e| e.to_string())
        }
    }
}

pub struct CsvExporter;

impl CsvExporter {
    pub fn export_history(history: &[HistoryEntry], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;

        writer.write_record(["input", "result"]).map_err(|e| e.to_string())?;
        for entry in history {
            writer
                .write_record([entry.input.as_str(), entry.output.as_str()])
                .map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;

        Ok(filename.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Calculator;

    #[test]
    fn test_session_round_trip() {
        let mut calc = Calculator::new();
        calc.evaluate_line("x = 5").unwrap();
        calc.evaluate_line("TRIPLE(N) = N * 3").unwrap();
        let history = vec![HistoryEntry {
            input: "x = 5".to_string(),
            output: "5".to_string(),
        }];
        let session = calc.snapshot(&history);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.tcalc");
        let path_str = path.to_str().unwrap();

        let saved = FileRepository::save_session(&session, path_str).unwrap();
        assert_eq!(saved, path_str);

        let (loaded, name) = FileRepository::load_session(path_str).unwrap();
        assert_eq!(name, path_str);
        assert_eq!(loaded.history.len(), 1);
        assert_eq!(loaded.macros.len(), 1);
        assert_eq!(loaded.macros[0].name, "TRIPLE");

        let mut restored = Calculator::from_session(&loaded).unwrap();
        assert_eq!(restored.evaluate_line("TRIPLE(x)").unwrap(), "15");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(FileRepository::load_session("/no/such/file.tcalc").is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tcalc");
        fs::write(&path, "not json").unwrap();

        assert!(FileRepository::load_session(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_csv_export() {
        let history = vec![
            HistoryEntry {
                input: "1 + 1".to_string(),
                output: "2".to_string(),
            },
            HistoryEntry {
                input: "HEX(\"FF\")".to_string(),
                output: "255".to_string(),
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        CsvExporter::export_history(&history, path.to_str().unwrap()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["input", "result"])
        );
        let records: Vec<csv::StringRecord> =
            reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "1 + 1");
        assert_eq!(&records[0][1], "2");
        assert_eq!(&records[1][0], "HEX(\"FF\")");
        assert_eq!(&records[1][1], "255");
    }
}
