//! RON process loader

use crate::error::{Error, Result};
use crate::schema::ProcessDef;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loaded process definitions, keyed by name
#[derive(Debug, Default)]
pub struct ProcessLibrary {
    processes: IndexMap<String, ProcessDef>,
}

impl ProcessLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a process definition
    pub fn get(&self, name: &str) -> Option<&ProcessDef> {
        self.processes.get(name)
    }

    /// Process names in load order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

/// Loader for RON process files
pub struct Loader {
    library: ProcessLibrary,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            library: ProcessLibrary::new(),
        }
    }

    /// Parse a single process definition without registering it
    pub fn parse(content: &str) -> Result<ProcessDef> {
        Ok(ron::from_str(content)?)
    }

    /// Load a process from a RON string under `name`
    pub fn load_str(&mut self, name: impl Into<String>, content: &str) -> Result<()> {
        let name = name.into();
        if self.library.processes.contains_key(&name) {
            return Err(Error::DuplicateDefinition(name));
        }
        let def = Self::parse(content)?;
        debug!(
            process = %name,
            places = def.places.len(),
            elements = def.elements.len(),
            transitions = def.transitions.len(),
            "Loaded process definition"
        );
        self.library.processes.insert(name, def);
        Ok(())
    }

    /// Load a single RON file, named after its file stem
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.load_str(name, &content)
    }

    /// Load every `.ron` file under `dir`, recursing into subdirectories
    ///
    /// Entries are visited in path order so library order does not depend
    /// on the platform's directory listing.
    pub fn load_directory(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let mut paths = fs::read_dir(dir.as_ref())?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_directory(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "ron") {
                self.load_file(&path)?;
            }
        }
        Ok(())
    }

    /// Finish loading and return the library
    pub fn finish(self) -> ProcessLibrary {
        self.library
    }

    /// Get the current library (for inspection during loading)
    pub fn library(&self) -> &ProcessLibrary {
        &self.library
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
