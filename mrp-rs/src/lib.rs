mod error;
pub mod logging;

pub use error::MrpError;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};

pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: Option<I>,
    pub seed: u64,
    pub replicate: u64,
    pub files: HashMap<String, PathBuf>,
    output: Value,
}

impl Environment {
    pub fn from_json(data: Value) -> Self {
        let mut input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let seed = input_json
            .remove("seed")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let replicate = input_json
            .remove("replicate")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let files = data
            .get("model")
            .and_then(|m| m.get("files"))
            .and_then(|f| f.as_object())
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), PathBuf::from(s))))
                    .collect()
            })
            .unwrap_or_default();

        let output = data.get("output").cloned().unwrap_or(Value::Null);

        Self {
            input_json,
            input: None,
            seed,
            replicate,
            files,
            output,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, MrpError> {
        let data: Value = serde_json::from_str(raw)?;
        Ok(Self::from_json(data))
    }

    /// Parses a TOML run document. Tables map onto the same layout as the JSON form.
    pub fn from_toml_str(raw: &str) -> Result<Self, MrpError> {
        let data: Value = toml::from_str(raw)?;
        Ok(Self::from_json(data))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, MrpError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            return Err(MrpError::InputError("no input on stdin".to_string()));
        }
        Self::from_json_str(&raw)
    }

    pub fn from_stdin() -> Result<Self, MrpError> {
        Self::from_reader(io::stdin().lock())
    }

    /// Reads a run document from disk; `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, MrpError> {
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&raw),
            _ => Self::from_json_str(&raw),
        }
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> Result<Environment<I>, MrpError> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value)?;
        Ok(Environment {
            input_json: self.input_json,
            input: Some(input),
            seed: self.seed,
            replicate: self.replicate,
            files: self.files,
            output: self.output,
        })
    }
}

impl<I: DeserializeOwned> Environment<I> {
    /// Loads the run document from `path`, or from stdin when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, MrpError> {
        let env = match path {
            Some(path) => Environment::<()>::from_path(path)?,
            None => Environment::<()>::from_stdin()?,
        };
        env.with_input_type::<I>()
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = &self.output;

        // Check flat output
        if output.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            if let Some(dir) = output.get("dir").and_then(|v| v.as_str()) {
                return Some(PathBuf::from(dir));
            }
            return None;
        }

        // Check profiled output, preferring the default profile
        if let Some(profiles) = output.get("profile").and_then(|v| v.as_object()) {
            let selected = profiles
                .get("default")
                .or_else(|| profiles.values().next());
            if let Some(profile) = selected
                && profile.get("spec").and_then(|v| v.as_str()) == Some("filesystem")
                && let Some(dir) = profile.get("dir").and_then(|v| v.as_str())
            {
                return Some(PathBuf::from(dir));
            }
        }

        None
    }

    fn output_file(&self, filename: &str) -> Result<Option<PathBuf>, MrpError> {
        match self.output_dir() {
            Some(dir) => {
                fs::create_dir_all(&dir)?;
                Ok(Some(dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    pub fn write(&self, filename: &str, data: &[u8]) -> Result<(), MrpError> {
        match self.output_file(filename)? {
            Some(path) => fs::write(path, data)?,
            None => io::stdout().lock().write_all(data)?,
        }
        Ok(())
    }

    /// Writes `rows` as CSV with a header taken from the record's field names.
    pub fn write_csv<R: Serialize>(&self, filename: &str, rows: &[R]) -> Result<(), MrpError> {
        self.write_csv_with(filename, rows, io::stdout().lock())
    }

    /// Like [`Environment::write_csv`], with `fallback` standing in for stdout when no
    /// output directory is configured.
    pub fn write_csv_with<R: Serialize, W: Write>(
        &self,
        filename: &str,
        rows: &[R],
        fallback: W,
    ) -> Result<(), MrpError> {
        match self.output_file(filename)? {
            Some(path) => write_records(fs::File::create(path)?, rows),
            None => write_records(fallback, rows),
        }
    }

    pub fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<(), MrpError> {
        let mut data = serde_json::to_vec_pretty(value)?;
        data.push(b'\n');
        self.write(filename, &data)
    }
}

fn write_records<W: Write, R: Serialize>(writer: W, rows: &[R]) -> Result<(), MrpError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Hex encoded SHA-256 of the JSON form of `value`.
///
/// Object keys serialize in sorted order, so equal inputs give equal fingerprints
/// regardless of how the run document ordered them.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, MrpError> {
    let canonical = serde_json::to_value(value)?;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
