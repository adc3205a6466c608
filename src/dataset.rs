use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::info;

use crate::error::DataSourceError;
use crate::parse;
use crate::station::Station;

/// Every station of the dataset, in the order each was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    stations: Vec<Station>,
}

impl Dataset {
    pub fn parse(text: &str) -> Result<Self, DataSourceError> {
        Ok(Self {
            stations: parse::parse_stations(text)?,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// First station with the given id.
    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Directory holding the bundled dataset.
#[derive(Debug, Clone)]
pub struct Data {
    dir: PathBuf,
}

impl Data {
    pub const DATASET_FILE: &'static str = "weather-data.csv";

    pub fn from<P: AsRef<Path>>(path: P) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(DataSourceError::Missing(path.to_owned()));
        }

        Ok(Self {
            dir: path.to_owned(),
        })
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(Self::DATASET_FILE)
    }

    /// Reads and parses the dataset. Each call reads the file again; hold a
    /// [`DatasetCache`] to parse once.
    pub fn load_dataset(&self) -> Result<Dataset, DataSourceError> {
        let path = self.dataset_path();
        if !path.is_file() {
            return Err(DataSourceError::Missing(path));
        }

        let text = fs::read_to_string(&path).map_err(|source| DataSourceError::Read {
            path: path.clone(),
            source,
        })?;
        let dataset = Dataset::parse(&text)?;
        info!(
            path = %path.display(),
            stations = dataset.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

/// Parses the dataset on first use and hands out the same [`Dataset`]
/// afterwards. A failed load leaves the cache empty.
///
/// The cache is assigned once. Concurrent first calls may each read the
/// file; only one result is kept.
#[derive(Debug)]
pub struct DatasetCache {
    data: Data,
    dataset: OnceLock<Dataset>,
}

impl DatasetCache {
    pub fn new(data: Data) -> Self {
        Self {
            data,
            dataset: OnceLock::new(),
        }
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn get(&self) -> Result<&Dataset, DataSourceError> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }
        let dataset = self.data.load_dataset()?;
        Ok(self.dataset.get_or_init(|| dataset))
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }
}
