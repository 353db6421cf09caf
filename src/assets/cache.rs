//! Two-layer asset cache: bounded memory front, disk behind.
//!
//! Keys are `"{kind}/{identity}"` as produced by
//! [`AssetRequest::cache_key`](crate::assets::AssetRequest::cache_key); each
//! entry is one image file under `{root}/{kind}/{identity}.png`. Disk writes
//! go through a uniquely-named temp file and a rename, so a crash mid-write
//! never leaves a partial entry behind a live key.
//!
//! Same-key write races are prevented upstream by the request manager's
//! in-flight dedup; this type only needs plain thread safety.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use bytes::Bytes;
use uuid::Uuid;

/// Default bound on the memory layer.
const MEMORY_CAPACITY: usize = 256;

/// Disk/memory cache for fetched asset bytes.
pub struct AssetCache {
    root: PathBuf,
    memory: RwLock<MemoryLayer>,
    capacity: usize,
}

/// Memory front: map plus insertion order for capacity eviction.
struct MemoryLayer {
    entries: HashMap<String, Bytes>,
    order: VecDeque<String>,
}

impl AssetCache {
    /// Cache rooted at `root` with the default memory bound.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_memory_capacity(root, MEMORY_CAPACITY)
    }

    /// Cache rooted at `root` holding at most `capacity` entries in memory.
    pub fn with_memory_capacity(root: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            root: root.into(),
            memory: RwLock::new(MemoryLayer {
                entries: HashMap::new(),
                order: VecDeque::new(),
            }),
            capacity,
        }
    }

    /// Directory the disk layer lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a key: memory first, then disk (promoting to memory).
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        {
            let memory = self.memory.read().unwrap();
            if let Some(bytes) = memory.entries.get(key) {
                return Some(bytes.clone());
            }
        }

        let bytes = Bytes::from(tokio::fs::read(self.path_for(key)).await.ok()?);
        self.remember(key, &bytes);
        Some(bytes)
    }

    /// Store bytes under a key: disk first (atomically), then memory.
    ///
    /// An entry is replaced wholesale; readers either see the old bytes or
    /// the new ones, never a mix.
    pub async fn put(&self, key: &str, bytes: Bytes) -> io::Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Unique temp name in the target directory keeps the rename atomic
        let tmp = path.with_file_name(format!(".{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        self.remember(key, &bytes);
        Ok(())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let (kind, identity) = key.split_once('/').unwrap_or(("misc", key));
        // Keys from AssetRequest are already escaped; flatten anything else
        let identity = identity.replace('/', "_");
        self.root.join(kind).join(format!("{}.png", identity))
    }

    fn remember(&self, key: &str, bytes: &Bytes) {
        let mut memory = self.memory.write().unwrap();
        if memory.entries.insert(key.to_string(), bytes.clone()).is_some() {
            return;
        }
        if memory.order.len() >= self.capacity {
            if let Some(oldest) = memory.order.pop_front() {
                memory.entries.remove(&oldest);
            }
        }
        memory.order.push_back(key.to_string());
    }
}
