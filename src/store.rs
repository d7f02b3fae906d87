//! Durable result artifacts, one per (scheme, curve) pair.
use std::{
    fmt::{Display, Formatter, Result as FormatResult},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use crate::error::BenchError;
use crate::record::ResultRecord;

/// Identifies the run a record belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunKey {
    pub scheme: String,
    pub curve: String,
}

impl RunKey {
    pub fn new(scheme: &str, curve: &str) -> Self {
        RunKey {
            scheme: scheme.to_string(),
            curve: curve.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("benchmark_results_{}_{}.json", self.scheme, self.curve)
    }
}

impl Display for RunKey {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "{} on {}", self.scheme, self.curve)
    }
}

/// Reads and writes result artifacts below one directory.
#[derive(Clone, Debug)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ResultStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, key: &RunKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Writes `record` for `key` and returns the artifact path.
    ///
    /// The artifact is written to a temporary file next to its destination and
    /// renamed into place, so a failed write never leaves a partial file.
    pub fn write(&self, key: &RunKey, record: &ResultRecord) -> Result<PathBuf, BenchError> {
        let path = self.path(key);
        fs::create_dir_all(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        let mut file = NamedTempFile::new_in(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = Serializer::with_formatter(file.as_file_mut(), formatter);
            record
                .serialize(&mut serializer)
                .map_err(|e| io_error(&path, io::Error::new(io::ErrorKind::Other, e)))?;
        }
        file.write_all(b"\n").map_err(|source| io_error(&path, source))?;
        file.persist(&path).map_err(|e| io_error(&path, e.error))?;
        Ok(path)
    }

    /// Loads and validates the record for `key`.
    pub fn load(&self, key: &RunKey) -> Result<ResultRecord, BenchError> {
        let path = self.path(key);
        let malformed = |reason: String| BenchError::ArtifactMissingOrMalformed {
            path: path.clone(),
            reason,
        };
        let contents = fs::read_to_string(&path).map_err(|e| malformed(e.to_string()))?;
        let record: ResultRecord = serde_json::from_str(&contents).map_err(|e| malformed(e.to_string()))?;
        record.validate().map_err(malformed)?;
        Ok(record)
    }
}

fn io_error(path: &Path, source: io::Error) -> BenchError {
    BenchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(points: usize) -> ResultRecord {
        let mut record = ResultRecord::with_capacity(points);
        for i in 1..=points {
            record.push(i, 3.25, 0.1 * i as f64, 1.0 / 3.0, 7.0);
        }
        record
    }

    #[test]
    fn test_artifact_name() {
        let key = RunKey::new("BSW07", "BN254");
        assert_eq!(key.file_name(), "benchmark_results_BSW07_BN254.json");
        assert_eq!(key.to_string(), "BSW07 on BN254");
    }

    #[test]
    fn test_write_then_load_is_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        let key = RunKey::new("ac17", "BLS12-381");
        let record = sample(4);
        let path = store.write(&key, &record).unwrap();
        assert_eq!(path, dir.path().join("benchmark_results_ac17_BLS12-381.json"));
        assert_eq!(store.load(&key).unwrap(), record);
        // writing the reloaded record again changes nothing
        let reloaded = store.load(&key).unwrap();
        let before = fs::read_to_string(&path).unwrap();
        store.write(&key, &reloaded).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_pretty_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        let key = RunKey::new("waters11", "BN254");
        let path = store.write(&key, &sample(1)).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("{\n    \"setup\": [\n        3.25\n    ],"));
        // no temporary files are left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());
        let key = RunKey::new("BSW07", "BN254");
        assert!(matches!(store.load(&key), Err(BenchError::ArtifactMissingOrMalformed { .. })));

        fs::write(store.path(&key), "{ not json").unwrap();
        assert!(matches!(store.load(&key), Err(BenchError::ArtifactMissingOrMalformed { .. })));

        let mut broken = sample(3);
        broken.keygen.pop();
        fs::write(store.path(&key), serde_json::to_string(&broken).unwrap()).unwrap();
        match store.load(&key) {
            Err(BenchError::ArtifactMissingOrMalformed { path, reason }) => {
                assert_eq!(path, store.path(&key));
                assert!(reason.contains("keygen"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("nested").join("results"));
        store.write(&RunKey::new("BSW07", "BN254"), &sample(2)).unwrap();
        assert!(store.dir().is_dir());
    }
}
