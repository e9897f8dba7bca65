//! Compiled contract artifacts.

use alloy_primitives::Bytes;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// An error raised while loading an artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for `{name}` in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact {} has no bytecode", path.display())]
    EmptyBytecode { path: PathBuf },
}

/// The subset of an artifact needed to deploy it.
#[derive(Deserialize)]
struct Artifact {
    bytecode: ArtifactBytecode,
}

/// Forge nests the bytecode in an object, other toolchains store it as a plain string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Object { object: Bytes },
    Raw(Bytes),
}

impl ArtifactBytecode {
    fn into_bytes(self) -> Bytes {
        match self {
            Self::Object { object } => object,
            Self::Raw(bytes) => bytes,
        }
    }
}

/// Looks up artifacts by contract name in a directory.
///
/// Both flat (`<dir>/FundMe.json`) and forge (`<dir>/FundMe.sol/FundMe.json`) layouts are
/// supported.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Creates a store reading artifacts from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of the artifact of `name`, if it exists.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        [self.dir.join(format!("{name}.json")), self.dir.join(format!("{name}.sol/{name}.json"))]
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Reads the creation bytecode of `name`.
    pub fn bytecode(&self, name: &str) -> Result<Bytes, ArtifactError> {
        let path = self.find(name).ok_or_else(|| ArtifactError::NotFound {
            name: name.to_string(),
            dir: self.dir.clone(),
        })?;
        let content =
            fs::read(&path).map_err(|source| ArtifactError::Io { path: path.clone(), source })?;
        let artifact: Artifact = serde_json::from_slice(&content)
            .map_err(|source| ArtifactError::Json { path: path.clone(), source })?;
        let bytecode = artifact.bytecode.into_bytes();
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode { path });
        }
        trace!(name, path = %path.display(), len = bytecode.len(), "loaded artifact");
        Ok(bytecode)
    }
}
