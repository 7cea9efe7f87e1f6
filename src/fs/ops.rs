//! Backend dispatch for the filesystem helpers.
//!
//! [`FileSystem`] routes every call to the local filesystem or to the object
//! store named by the path's prefix. The free functions in [`crate::fs`] use
//! a default instance.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlutilz::fs::{FileSystem, ListOptions, StorageConfig};
//!
//! # async fn example() -> Result<(), mlutilz::Error> {
//! let fs = FileSystem::new(StorageConfig::default());
//! let shards = fs.ls("gs://bucket/dataset", &ListOptions::default()).await?;
//! for shard in shards {
//!     println!("{}", shard);
//! }
//! # Ok(())
//! # }
//! ```

use super::config::StorageConfig;
use super::handle::{FileHandle, OpenMode};
use super::location::{IntoLocation, Location, RemoteUri, Scheme};
use super::store::RemoteStore;
use crate::error::Result;

use object_store::buffered::{BufReader, BufWriter};
use object_store::ObjectStore;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Prefix of manifest files skipped by [`ListOptions::ignore_manifest`].
pub const MANIFEST_PREFIX: &str = "_MANIFEST";

/// Options for [`FileSystem::ls`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Keep entries whose file name contains this substring.
    pub file_pattern: String,
    /// Descend into sub-directories.
    pub recursive: bool,
    /// Skip entries whose name starts with `_MANIFEST`.
    pub ignore_manifest: bool,
    /// Include directories in the results.
    pub with_dirs: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            file_pattern: ".parquet".into(),
            recursive: true,
            ignore_manifest: true,
            with_dirs: false,
        }
    }
}

impl ListOptions {
    /// Set the file name pattern.
    pub fn file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Set whether to descend into sub-directories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set whether to skip manifest files.
    pub fn ignore_manifest(mut self, ignore: bool) -> Self {
        self.ignore_manifest = ignore;
        self
    }

    /// Set whether to include directories.
    pub fn with_dirs(mut self, with_dirs: bool) -> Self {
        self.with_dirs = with_dirs;
        self
    }

    /// Whether an entry called `name` is kept.
    pub fn matches(&self, name: &str) -> bool {
        name.contains(&self.file_pattern)
            && !(self.ignore_manifest && name.starts_with(MANIFEST_PREFIX))
    }
}

/// Options for [`FileSystem::mkdir`].
#[derive(Debug, Clone, Copy)]
pub struct MkdirOptions {
    /// Create missing parent directories.
    pub parents: bool,
    /// Do not fail when the directory already exists.
    pub exist_ok: bool,
}

impl Default for MkdirOptions {
    fn default() -> Self {
        Self {
            parents: true,
            exist_ok: true,
        }
    }
}

/// Dispatches path operations to the local filesystem or an object store.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    config: StorageConfig,
    /// Pre-built clients, keyed by scheme (`gcs` folded into `gs`) and bucket.
    stores: HashMap<(Scheme, String), RemoteStore>,
}

impl FileSystem {
    /// Creates a filesystem using the given storage overrides.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            stores: HashMap::new(),
        }
    }

    /// Serve the bucket of `uri` with `store` instead of connecting to it.
    pub fn with_store(mut self, uri: &RemoteUri, store: Arc<dyn ObjectStore>) -> Self {
        self.stores
            .insert(store_key(uri), RemoteStore::with_store(uri, store));
        self
    }

    /// Gets the storage configuration.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Client for the bucket of `uri`.
    pub fn store(&self, uri: &RemoteUri) -> Result<RemoteStore> {
        match self.stores.get(&store_key(uri)) {
            Some(store) => Ok(store.clone()),
            None => RemoteStore::connect(uri, &self.config),
        }
    }

    /// List the entries under `path` that match `options`.
    pub async fn ls(&self, path: impl IntoLocation, options: &ListOptions) -> Result<Vec<Location>> {
        match path.into_location()? {
            Location::Remote(uri) => self.ls_remote(&uri, options).await,
            Location::Local(root) => {
                let options = options.clone();
                tokio::task::spawn_blocking(move || ls_local(root, &options)).await?
            }
        }
    }

    async fn ls_remote(&self, uri: &RemoteUri, options: &ListOptions) -> Result<Vec<Location>> {
        let store = self.store(uri)?;
        let listing = store.list(uri, options.recursive).await?;

        let mut keys: BTreeSet<String> = listing
            .objects
            .iter()
            .map(|meta| meta.location.to_string())
            .filter(|key| options.matches(last_segment(key)))
            .collect();

        // A key naming an object lists as itself.
        if listing.objects.is_empty() && listing.prefixes.is_empty() {
            if let Some(meta) = store.head(uri).await? {
                let key = meta.location.to_string();
                if options.matches(last_segment(&key)) {
                    keys.insert(key);
                }
            }
        }

        if options.with_dirs {
            let base = uri.key.trim_end_matches('/');
            let dirs = listing
                .prefixes
                .iter()
                .map(|prefix| prefix.to_string())
                .chain(
                    listing
                        .objects
                        .iter()
                        .flat_map(|meta| parent_dirs(base, meta.location.as_ref())),
                )
                .filter(|key| options.matches(last_segment(key)));
            keys.extend(dirs);
        }

        debug!("Listed {} entries under {}", keys.len(), uri);
        Ok(keys
            .into_iter()
            .map(|key| Location::Remote(uri.with_key(key)))
            .collect())
    }

    /// Whether `path` exists.
    ///
    /// A remote prefix with at least one object below it counts as existing.
    pub async fn exists(&self, path: impl IntoLocation) -> Result<bool> {
        match path.into_location()? {
            Location::Remote(uri) => {
                let store = self.store(&uri)?;
                if store.head(&uri).await?.is_some() {
                    return Ok(true);
                }
                store.has_children(&uri).await
            }
            Location::Local(path) => Ok(fs::try_exists(&path).await?),
        }
    }

    /// Open `path` for reading or writing.
    pub async fn open(&self, path: impl IntoLocation, mode: OpenMode) -> Result<FileHandle> {
        match path.into_location()? {
            Location::Remote(uri) => {
                let store = self.store(&uri)?;
                match mode {
                    OpenMode::Read => {
                        let meta = store.head(&uri).await?.ok_or_else(|| {
                            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", uri))
                        })?;
                        Ok(FileHandle::RemoteReader(BufReader::new(
                            store.inner().clone(),
                            &meta,
                        )))
                    }
                    OpenMode::Write => Ok(FileHandle::RemoteWriter(BufWriter::new(
                        store.inner().clone(),
                        uri.object_path(),
                    ))),
                }
            }
            Location::Local(path) => {
                let file = match mode {
                    OpenMode::Read => fs::File::open(&path).await?,
                    OpenMode::Write => fs::File::create(&path).await?,
                };
                Ok(FileHandle::Local { file, mode })
            }
        }
    }

    /// Create the directory `path`.
    ///
    /// Object stores have no directories, so remote paths are left untouched.
    pub async fn mkdir(&self, path: impl IntoLocation, options: MkdirOptions) -> Result<()> {
        let path = match path.into_location()? {
            Location::Remote(uri) => {
                debug!("Skipping mkdir for {}, object stores have no directories", uri);
                return Ok(());
            }
            Location::Local(path) => path,
        };

        if fs::try_exists(&path).await? {
            if options.exist_ok && fs::metadata(&path).await?.is_dir() {
                return Ok(());
            }
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )
            .into());
        }

        debug!("Creating directory {:?}", path);
        if options.parents {
            fs::create_dir_all(&path).await?;
        } else {
            fs::create_dir(&path).await?;
        }
        Ok(())
    }
}

fn store_key(uri: &RemoteUri) -> (Scheme, String) {
    let scheme = if uri.scheme.is_gcs() {
        Scheme::Gs
    } else {
        uri.scheme
    };
    (scheme, uri.bucket.clone())
}

fn last_segment(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Directory keys between `base` and the object `key`, outermost first.
fn parent_dirs(base: &str, key: &str) -> Vec<String> {
    let relative = match base {
        "" => key,
        _ => match key.strip_prefix(base).and_then(|k| k.strip_prefix('/')) {
            Some(relative) => relative,
            None => return Vec::new(),
        },
    };

    let mut dirs = Vec::new();
    let mut current = base.to_string();
    let segments: Vec<&str> = relative.split('/').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);
        dirs.push(current.clone());
    }
    dirs
}

fn ls_local(root: PathBuf, options: &ListOptions) -> Result<Vec<Location>> {
    if !root.exists() {
        return Ok(Vec::new());
    }
    if root.is_file() {
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(if options.matches(&name) {
            vec![Location::Local(root)]
        } else {
            Vec::new()
        });
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut found = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() && !options.with_dirs {
            continue;
        }
        if options.matches(&entry.file_name().to_string_lossy()) {
            found.push(Location::Local(entry.into_path()));
        }
    }
    Ok(found)
}
