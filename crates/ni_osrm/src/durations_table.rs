use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Deserializer, Serialize};

use crate::OsrmError;

/// Travel time in seconds, `None` when the routing engine found no route.
pub type Seconds = Option<f64>;

/// Durations returned by the OSRM table service, one row per origin and one
/// column per destination, in the order of the requested points.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct DurationsTable {
    durations: Vec<Vec<Seconds>>,
}

/// A stored matrix is either the raw table response or the bare `durations`
/// field written by the fetch step.
#[derive(Deserialize)]
#[serde(untagged)]
enum DurationsFile {
    Response { durations: Vec<Vec<Seconds>> },
    Bare(Vec<Vec<Seconds>>),
}

impl<'de> Deserialize<'de> for DurationsTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let durations = match DurationsFile::deserialize(deserializer)? {
            DurationsFile::Response { durations } => durations,
            DurationsFile::Bare(durations) => durations,
        };

        Ok(DurationsTable { durations })
    }
}

impl DurationsTable {
    pub fn new(durations: Vec<Vec<Seconds>>) -> Self {
        Self { durations }
    }

    pub fn from_json_str(json: &str) -> Result<Self, OsrmError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OsrmError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<(), OsrmError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;

        Ok(())
    }

    pub fn rows(&self) -> &[Vec<Seconds>] {
        &self.durations
    }

    pub fn num_origins(&self) -> usize {
        self.durations.len()
    }

    pub fn num_cells(&self) -> usize {
        self.durations.iter().map(Vec::len).sum()
    }

    pub fn is_square(&self) -> bool {
        let n = self.durations.len();
        self.durations.iter().all(|row| row.len() == n)
    }
}

impl From<Vec<Vec<f64>>> for DurationsTable {
    fn from(durations: Vec<Vec<f64>>) -> Self {
        Self {
            durations: durations
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        }
    }
}
