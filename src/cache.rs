use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;

pub const DEFAULT_CACHE_DIR: &str = ".amphtml/cache";

#[derive(Serialize, Deserialize)]
pub struct CacheEntry {
    pub hash: String,
    pub code: String,
}

/// Generated modules keyed by output name, valid while the rule source,
/// configuration and generator version are unchanged.
pub struct IncrementalCache {
    cache_dir: PathBuf,
}

impl IncrementalCache {
    pub fn new(cache_dir: &Path) -> Self {
        if !cache_dir.exists() {
            if let Err(e) = fs::create_dir_all(cache_dir) {
                log::warn!("Could not create cache dir {}: {}", cache_dir.display(), e);
            }
        }
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn compute_hash(rules_source: &str, config: &GeneratorConfig) -> String {
        let mut hasher = Sha256::new();
        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        hasher.update([0u8]);
        hasher.update(config.fingerprint().as_bytes());
        hasher.update([0u8]);
        hasher.update(rules_source.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn get_cache_path(&self, output_name: &str) -> PathBuf {
        let safe_name = output_name
            .replace('/', "_")
            .replace('\\', "_")
            .replace(':', "_");
        self.cache_dir.join(format!("{}.json", safe_name))
    }

    pub fn get(&self, output_name: &str, hash: &str) -> Option<String> {
        let cache_path = self.get_cache_path(output_name);
        let data = fs::read_to_string(&cache_path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Discarding corrupt cache entry for {}: {}", output_name, e);
                fs::remove_file(&cache_path).ok();
                return None;
            }
        };

        if entry.hash == hash {
            log::debug!("Cache hit for {}", output_name);
            Some(entry.code)
        } else {
            None
        }
    }

    pub fn set(&self, output_name: &str, hash: &str, code: &str) {
        let cache_path = self.get_cache_path(output_name);
        let entry = CacheEntry {
            hash: hash.to_string(),
            code: code.to_string(),
        };

        let written = serde_json::to_string(&entry)
            .map_err(std::io::Error::from)
            .and_then(|data| fs::write(&cache_path, data));
        if let Err(e) = written {
            log::warn!("Could not write cache entry {}: {}", cache_path.display(), e);
        }
    }
}
