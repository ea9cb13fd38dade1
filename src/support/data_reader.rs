//! Test data files.
//!
//! CSV files are a header row followed by one row per case; every row is
//! keyed by header and rows come back in file order.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;

fn ensure_exists(path: &Path) -> DataResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DataError::NotFound(path.to_path_buf()))
    }
}

/// Every row as a header-keyed map.
pub fn read_csv<P: AsRef<Path>>(path: P) -> DataResult<Vec<HashMap<String, String>>> {
    read_csv_as(path)
}

/// Every row deserialized into `T` by header name.
pub fn read_csv_as<T, P>(path: P) -> DataResult<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_exists(path)?;
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

pub fn read_json<T, P>(path: P) -> DataResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_exists(path)?;
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Outcome a contact form case expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    Success,
    Error,
}

/// One row of the contact form data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub message: String,
    pub expected: Expected,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::Value;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const CONTACT_CSV: &str = "name,email,message,expected\n\
        Ana,ana@test.com,Hola,success\n\
        ,sin-nombre@test.com,Falta nombre,error\n\
        Luis,luis@test.com,\"Consulta, con coma\",success\n";

    #[test]
    fn csv_rows_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "contact.csv", CONTACT_CSV);

        let rows = read_csv(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "Ana");
        assert_eq!(rows[1]["name"], "");
        assert_eq!(rows[2]["message"], "Consulta, con coma");
    }

    #[test]
    fn csv_typed_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "contact.csv", CONTACT_CSV);

        let records: Vec<ContactRecord> = read_csv_as(&path).unwrap();
        let expected: Vec<Expected> = records.iter().map(|r| r.expected).collect();
        assert_eq!(expected, vec![Expected::Success, Expected::Error, Expected::Success]);
        assert_eq!(records[1].email, "sin-nombre@test.com");
    }

    #[test]
    fn json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "users.json", r#"{"users":[{"name":"Ana"}]}"#);
        let v: Value = read_json(&path).unwrap();
        assert_eq!(v["users"][0]["name"], "Ana");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match read_csv(&path) {
            Err(DataError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(read_json::<Value, _>(&path), Err(DataError::NotFound(_))));
    }
}
