use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Access to the integer id a stored record is looked up by.
///
/// Lecture and Task records key on their parent lesson's id; everything else
/// keys on its own id.
pub trait Record {
    fn id(&self) -> u64;
}

/// One entity kind's backing file: a JSON array of flat records.
///
/// Every mutation is a full read-modify-write cycle over the whole array.
pub struct JsonCollection<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Record,
{
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            path: dir.join(file_name),
            _marker: PhantomData,
        }
    }

    /// Seeds the backing file with an empty array if it does not exist yet.
    pub fn init(&self) -> Result<()> {
        if !self.path.exists() {
            self.write_file("[]")?;
        }
        Ok(())
    }

    /// Reads the whole collection. An absent file or unparseable content
    /// yields an empty collection, never an error.
    pub fn load_all(&self) -> Result<Vec<T>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "store not parseable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the whole collection, pretty-printed. The write goes to a
    /// temp sibling first and lands via rename.
    pub fn save_all(&self, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        self.write_file(&json)
    }

    /// First record whose id matches, if any.
    pub fn find_by_id(&self, id: u64) -> Result<Option<T>> {
        Ok(self.load_all()?.into_iter().find(|r| r.id() == id))
    }

    /// Appends a record and persists the collection.
    pub fn append(&self, record: T) -> Result<()> {
        let mut items = self.load_all()?;
        items.push(record);
        self.save_all(&items)
    }

    /// Replaces the record with the same id and persists. Returns whether a
    /// match was found.
    pub fn replace(&self, record: T) -> Result<bool> {
        let mut items = self.load_all()?;
        let Some(slot) = items.iter_mut().find(|r| r.id() == record.id()) else {
            return Ok(false);
        };
        *slot = record;
        self.save_all(&items)?;
        Ok(true)
    }

    /// Highest id currently persisted, used to seed the allocator.
    pub fn max_id(&self) -> Result<u64> {
        Ok(self.load_all()?.iter().map(Record::id).max().unwrap_or(0))
    }

    fn write_file(&self, contents: &str) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
        label: String,
    }

    impl Record for Row {
        fn id(&self) -> u64 {
            self.id
        }
    }

    fn row(id: u64, label: &str) -> Row {
        Row {
            id,
            label: label.to_string(),
        }
    }

    fn collection(dir: &tempfile::TempDir) -> JsonCollection<Row> {
        JsonCollection::new(dir.path(), "rows.json")
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collection(&dir).load_all().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rows.json"), "{ not an array").unwrap();
        assert!(collection(&dir).load_all().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        coll.save_all(&[row(2, "a"), row(3, "b")]).unwrap();
        assert_eq!(coll.load_all().unwrap(), vec![row(2, "a"), row(3, "b")]);
    }

    #[test]
    fn find_by_id_scans_for_an_exact_match() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        coll.save_all(&[row(2, "a"), row(3, "b")]).unwrap();
        assert_eq!(coll.find_by_id(3).unwrap(), Some(row(3, "b")));
        assert_eq!(coll.find_by_id(9).unwrap(), None);
    }

    #[test]
    fn replace_swaps_only_the_matching_record() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        coll.save_all(&[row(2, "a"), row(3, "b")]).unwrap();
        assert!(coll.replace(row(2, "changed")).unwrap());
        assert_eq!(
            coll.load_all().unwrap(),
            vec![row(2, "changed"), row(3, "b")]
        );
    }

    #[test]
    fn replace_of_an_unknown_id_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        coll.save_all(&[row(2, "a")]).unwrap();
        assert!(!coll.replace(row(9, "ghost")).unwrap());
        assert_eq!(coll.load_all().unwrap(), vec![row(2, "a")]);
    }

    #[test]
    fn init_seeds_an_empty_array_and_leaves_data_alone() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        coll.init().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("rows.json")).unwrap(),
            "[]"
        );
        coll.append(row(2, "a")).unwrap();
        coll.init().unwrap();
        assert_eq!(coll.load_all().unwrap(), vec![row(2, "a")]);
    }

    #[test]
    fn max_id_is_zero_for_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let coll = collection(&dir);
        assert_eq!(coll.max_id().unwrap(), 0);
        coll.save_all(&[row(5, "a"), row(3, "b")]).unwrap();
        assert_eq!(coll.max_id().unwrap(), 5);
    }
}
