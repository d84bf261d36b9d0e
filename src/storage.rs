use crate::model::Employee;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contenu d'un fichier roster : la liste ordonnée des employés.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    pub employees: Vec<Employee>,
}

pub trait Storage {
    /// Charge un roster depuis un support.
    fn load(&self) -> anyhow::Result<RosterFile>;
    /// Sauvegarde de manière atomique.
    fn save(&self, roster: &RosterFile) -> anyhow::Result<()>;
}

/// Fichier roster JSON (`{"employees": [...]}`), lu par `plan --input` et
/// écrit par `sample --out`. Les compteurs de jours ne sont jamais relus.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<RosterFile> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let roster: RosterFile = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(roster)
    }

    fn save(&self, roster: &RosterFile) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(roster)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
