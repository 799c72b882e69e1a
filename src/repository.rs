//! 활동 목록 저장소. 비용은 저장하지 않고 활동 레코드만 그대로 보관한다.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::activity::Activity;

/// 기본 저장 파일 이름.
pub const DEFAULT_DATA_FILE: &str = "activities.json";

/// 저장소 입출력 오류.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed activity data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize activities: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// 활동 목록을 불러오고 저장하는 경계.
pub trait ActivityRepository {
    fn load(&self) -> Result<Vec<Activity>, RepositoryError>;
    fn save(&self, activities: &[Activity]) -> Result<(), RepositoryError>;
}

/// JSON 파일 저장소. 파일이 없으면 빈 목록으로 본다.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ActivityRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Activity>, RepositoryError> {
        if !self.path.exists() {
            log::debug!("{} not found, starting with no activities", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| RepositoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let activities: Vec<Activity> =
            serde_json::from_str(&content).map_err(|source| RepositoryError::Parse {
                path: self.path.clone(),
                source,
            })?;
        log::debug!(
            "loaded {} activities from {}",
            activities.len(),
            self.path.display()
        );
        Ok(activities)
    }

    fn save(&self, activities: &[Activity]) -> Result<(), RepositoryError> {
        let content =
            serde_json::to_string_pretty(activities).map_err(RepositoryError::Serialize)?;
        fs::write(&self.path, content).map_err(|source| RepositoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!(
            "saved {} activities to {}",
            activities.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// 메모리 저장소. 테스트와 일회성 계산에 쓴다.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    activities: RefCell<Vec<Activity>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막으로 저장된 목록의 사본.
    pub fn snapshot(&self) -> Vec<Activity> {
        self.activities.borrow().clone()
    }
}

impl ActivityRepository for InMemoryRepository {
    fn load(&self) -> Result<Vec<Activity>, RepositoryError> {
        Ok(self.activities.borrow().clone())
    }

    fn save(&self, activities: &[Activity]) -> Result<(), RepositoryError> {
        *self.activities.borrow_mut() = activities.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("none.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let repo = JsonFileRepository::new(&path);
        assert!(matches!(repo.load(), Err(RepositoryError::Parse { .. })));
    }

    #[test]
    fn reads_records_written_by_the_web_app() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activities.json");
        fs::write(
            &path,
            r#"[{"id":"1718000000000","activityNumber":1,"name":"Weekly report",
                "frequency":1,"interval":"week","duration":2,"hourlyRate":45,
                "category":"Reporting"}]"#,
        )
        .unwrap();
        let loaded = JsonFileRepository::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Weekly report");
        assert_eq!(loaded[0].scenario, None);
    }
}
