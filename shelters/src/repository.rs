//! Where shelters come from.
//!
//! `Repository` hides whether we talk to the API (`RemoteRepository`), read a local JSON file
//! (`FileRepository`) or use a list already in memory (`MemoryRepository`).
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;
use tracing::trace;

use crate::{Shelter, ShelterError};

/// This trait enables us to access shelters under a single interface.
///
pub trait Repository: Debug + Send + Sync {
    /// Fetch every shelter
    fn get_all_shelters(&self) -> Result<Vec<Shelter>>;
    /// Fetch one shelter by id
    fn get_shelter(&self, id: &str) -> Result<Shelter>;
    /// Get a token for subsequent operations, caching it when non-empty
    fn get_token(&self) -> Result<String>;
}

/// Shelters already in memory
///
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    shelters: Vec<Shelter>,
}

impl MemoryRepository {
    pub fn new(shelters: Vec<Shelter>) -> Self {
        MemoryRepository { shelters }
    }
}

impl Repository for MemoryRepository {
    fn get_all_shelters(&self) -> Result<Vec<Shelter>> {
        Ok(self.shelters.clone())
    }

    fn get_shelter(&self, id: &str) -> Result<Shelter> {
        find_by_id(&self.shelters, id)
    }

    fn get_token(&self) -> Result<String> {
        Err(ShelterError::NoCredentials("memory".to_string()).into())
    }
}

/// Shelters from a JSON file holding an array, same format as the API.
///
#[derive(Clone, Debug)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: &Path) -> Self {
        FileRepository {
            path: path.to_path_buf(),
        }
    }
}

impl Repository for FileRepository {
    #[tracing::instrument(skip(self))]
    fn get_all_shelters(&self) -> Result<Vec<Shelter>> {
        trace!("reading {:?}", self.path);

        let data = fs::read_to_string(&self.path)?;
        let list: Vec<Shelter> =
            serde_json::from_str(&data).map_err(|e| ShelterError::Decoding(e.to_string()))?;
        Ok(list)
    }

    fn get_shelter(&self, id: &str) -> Result<Shelter> {
        find_by_id(&self.get_all_shelters()?, id)
    }

    fn get_token(&self) -> Result<String> {
        Err(ShelterError::NoCredentials(self.path.to_string_lossy().to_string()).into())
    }
}

fn find_by_id(list: &[Shelter], id: &str) -> Result<Shelter> {
    list.iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| ShelterError::NotFound(id.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Address;
    use std::path::PathBuf;

    fn testdata() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/shelters.json")
    }

    #[test]
    fn test_memory_repository() -> Result<()> {
        let s = Shelter {
            id: "1".to_string(),
            name: "A".to_string(),
            address: Address::new(1., 2.),
            ..Default::default()
        };
        let repo = MemoryRepository::new(vec![s.clone()]);
        assert_eq!(vec![s.clone()], repo.get_all_shelters()?);
        assert_eq!(s, repo.get_shelter("1")?);
        assert!(repo.get_shelter("2").is_err());
        assert!(repo.get_token().is_err());
        Ok(())
    }

    #[test]
    fn test_file_repository() -> Result<()> {
        let repo = FileRepository::new(&testdata());
        let list = repo.get_all_shelters()?;
        assert_eq!(5, list.len());

        let s = repo.get_shelter("3")?;
        assert_eq!("Clinica Veterinaria Sur", s.name);

        let r = repo.get_shelter("nope");
        assert_eq!(
            Some(&ShelterError::NotFound("nope".to_string())),
            r.unwrap_err().downcast_ref::<ShelterError>()
        );
        Ok(())
    }

    #[test]
    fn test_file_repository_bad_json() -> Result<()> {
        let f = tempfile::NamedTempFile::new()?;
        fs::write(f.path(), "{ not json")?;

        let repo = FileRepository::new(f.path());
        let r = repo.get_all_shelters();
        assert!(matches!(
            r.unwrap_err().downcast_ref::<ShelterError>(),
            Some(ShelterError::Decoding(_))
        ));
        Ok(())
    }

    #[test]
    fn test_file_repository_missing() {
        let repo = FileRepository::new(Path::new("/nonexistent/shelters.json"));
        assert!(repo.get_all_shelters().is_err());
    }
}
