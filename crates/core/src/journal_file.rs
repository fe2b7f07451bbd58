//! Journal persisted as JSON lines, each record chained to the previous one
//! with SHA-256.
//!
//! Line 1 is a header (`format_version`, `build_id`, `seed`, `config`).
//! Every following line is one applied intent carrying `prev_sha256_hex`
//! and `sha256_hex = hex(SHA-256(body_json || prev_sha256_hex))`.
//! Records are flushed as they are written so a crashed session still
//! leaves a loadable prefix.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::journal::{BUILD_ID, InputJournal, InputRecord, JOURNAL_FORMAT_VERSION};
use crate::types::Intent;

/// Previous-hash value of the first record.
pub const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Header {
    format_version: u16,
    build_id: String,
    seed: u64,
    config: SessionConfig,
}

/// The hashed part of a record line.
#[derive(Serialize)]
struct Body {
    seq: u64,
    at_ms: u64,
    intent: Intent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct Line {
    seq: u64,
    at_ms: u64,
    intent: Intent,
    prev_sha256_hex: String,
    sha256_hex: String,
}

fn chain_hash(body: &Body, prev_sha256_hex: &str) -> serde_json::Result<String> {
    let body_json = serde_json::to_string(body)?;
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    Ok(format!("{:064x}", hasher.finalize()))
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates (or truncates) `path` and writes the header line.
    pub fn create(path: &Path, seed: u64, config: &SessionConfig) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let header = Header {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: BUILD_ID.to_string(),
            seed,
            config: config.clone(),
        };
        writeln!(writer, "{}", serde_json::to_string(&header).map_err(io::Error::other)?)?;
        writer.flush()?;
        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    pub fn append(&mut self, at_ms: u64, intent: Intent) -> io::Result<()> {
        let body = Body { seq: self.next_seq, at_ms, intent };
        let sha256_hex = chain_hash(&body, &self.last_sha256_hex).map_err(io::Error::other)?;
        let line = Line {
            seq: body.seq,
            at_ms,
            intent,
            prev_sha256_hex: std::mem::take(&mut self.last_sha256_hex),
            sha256_hex,
        };
        writeln!(self.writer, "{}", serde_json::to_string(&line).map_err(io::Error::other)?)?;
        self.writer.flush()?;

        self.last_sha256_hex = line.sha256_hex;
        self.next_seq += 1;
        Ok(())
    }

    /// Writes a whole in-memory journal to `path`.
    pub fn write_all(path: &Path, journal: &InputJournal) -> io::Result<()> {
        let mut writer = Self::create(path, journal.seed, &journal.config)?;
        for record in &journal.inputs {
            writer.append(record.at_ms, record.intent)?;
        }
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.next_seq
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    /// Hash of the last valid record, or [`INITIAL_HASH`] if there are none.
    pub last_sha256_hex: String,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("journal line {line} is incomplete")]
    IncompleteLine { line: usize },
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("unsupported journal format version {0}")]
    UnsupportedVersion(u16),
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

/// Loads `path`, checking the header, record sequence and hash chain.
/// The first bad line aborts the load.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: Header = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::UnsupportedVersion(header.format_version));
    }
    header
        .config
        .validate()
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;

    let mut journal = InputJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        seed: header.seed,
        config: header.config,
        inputs: Vec::with_capacity(lines.len() - 1),
    };
    let mut prev_sha256_hex = INITIAL_HASH.to_string();

    for (index, raw) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        let line: Line = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        let expected_seq = journal.inputs.len() as u64;
        if line.seq != expected_seq {
            return Err(invalid(format!("expected seq {expected_seq}, found {}", line.seq)));
        }
        if let Some(previous) = journal.last()
            && line.at_ms < previous.at_ms
        {
            return Err(invalid(format!("time went backwards to {} ms", line.at_ms)));
        }
        if line.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = Body { seq: line.seq, at_ms: line.at_ms, intent: line.intent };
        let expected = chain_hash(&body, &prev_sha256_hex).map_err(|e| invalid(e.to_string()))?;
        if line.sha256_hex != expected {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.inputs.push(InputRecord { seq: line.seq, at_ms: line.at_ms, intent: line.intent });
        prev_sha256_hex = line.sha256_hex;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex })
}
