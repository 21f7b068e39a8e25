use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vexi::prelude::*;

/// Mock AdvisorySource that "clones" by copying a fixture directory
#[derive(Clone)]
pub struct MockAdvisorySource {
    pub fixture_dir: PathBuf,
    pub should_fail: bool,
    /// (org, name, destination) of every provision call
    pub calls: Arc<Mutex<Vec<(String, String, PathBuf)>>>,
}

impl MockAdvisorySource {
    pub fn new(fixture_dir: PathBuf) -> Self {
        Self {
            fixture_dir,
            should_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(PathBuf::new())
        }
    }

    pub fn calls(&self) -> Vec<(String, String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdvisorySource for MockAdvisorySource {
    async fn provision(&self, org: &str, name: &str, destination: &Path) -> Result<()> {
        self.calls.lock().unwrap().push((
            org.to_string(),
            name.to_string(),
            destination.to_path_buf(),
        ));
        if self.should_fail {
            anyhow::bail!("Mock clone failure for {}/{}", org, name);
        }

        fs::create_dir_all(destination)?;
        for entry in fs::read_dir(&self.fixture_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                fs::copy(entry.path(), destination.join(entry.file_name()))?;
            }
        }
        Ok(())
    }
}
