use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::CacheError;

#[derive(Debug, Deserialize)]
struct CacheEntry {
    written_at: DateTime<Utc>,
    payload: Vec<Value>,
}

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    written_at: DateTime<Utc>,
    payload: &'a [Value],
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheStatus {
    Missing,
    Present {
        written_at: DateTime<Utc>,
        item_count: usize,
        fresh: bool,
    },
}

pub struct CacheStore {
    path: PathBuf,
    expiry: Duration,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, expiry: Duration) -> Self {
        Self {
            path: path.into(),
            expiry,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[allow(dead_code)]
    pub fn load(&self) -> Result<Option<Vec<Value>>, CacheError> {
        self.load_at(Utc::now())
    }

    pub fn load_at(&self, now: DateTime<Utc>) -> Result<Option<Vec<Value>>, CacheError> {
        let Some(entry) = self.read_entry()? else {
            debug!(path = %self.path.display(), "no cache entry");
            return Ok(None);
        };

        if !self.is_fresh(entry.written_at, now) {
            debug!(written_at = %entry.written_at, "cache expired");
            return Ok(None);
        }

        Ok(Some(entry.payload))
    }

    #[allow(dead_code)]
    pub fn save(&self, payload: &[Value]) -> Result<(), CacheError> {
        self.save_at(payload, Utc::now())
    }

    pub fn save_at(&self, payload: &[Value], now: DateTime<Utc>) -> Result<(), CacheError> {
        let entry = CacheEntryRef {
            written_at: now,
            payload,
        };
        let contents = serde_json::to_vec_pretty(&entry).map_err(CacheError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
            }
        }

        let tmp_path = self.tmp_path();
        let mut file = File::create(&tmp_path).map_err(|source| self.write_error(source))?;
        file.write_all(&contents)
            .map_err(|source| self.write_error(source))?;
        file.sync_all().map_err(|source| self.write_error(source))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.write_error(source)
        })
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> Result<CacheStatus, CacheError> {
        Ok(match self.read_entry()? {
            None => CacheStatus::Missing,
            Some(entry) => CacheStatus::Present {
                written_at: entry.written_at,
                item_count: entry.payload.len(),
                fresh: self.is_fresh(entry.written_at, now),
            },
        })
    }

    pub fn clear(&self) -> Result<bool, CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(self.write_error(source)),
        }
    }

    fn is_fresh(&self, written_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(written_at);
        age >= Duration::zero() && age < self.expiry
    }

    fn read_entry(&self) -> Result<Option<CacheEntry>, CacheError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| CacheError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
