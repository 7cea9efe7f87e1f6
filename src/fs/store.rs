//! Object store clients bound to a single bucket.

use super::config::StorageConfig;
use super::location::{IntoLocation, Location, RemoteUri};
use crate::error::Result;

use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectMeta, ObjectStore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Objects and sub-prefixes found under a prefix.
#[derive(Debug, Default)]
pub struct Listing {
    pub objects: Vec<ObjectMeta>,
    /// Only filled by delimited (one level) listings.
    pub prefixes: Vec<ObjectPath>,
}

/// A client for one bucket of a remote object store.
#[derive(Clone)]
pub struct RemoteStore {
    root: RemoteUri,
    store: Arc<dyn ObjectStore>,
}

impl fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStore")
            .field("root", &self.root.to_string())
            .field("store", &self.store.to_string())
            .finish()
    }
}

impl RemoteStore {
    /// Connect to the bucket addressed by `uri`.
    ///
    /// No request is sent; credentials are resolved lazily by the client.
    pub fn connect(uri: &RemoteUri, config: &StorageConfig) -> Result<Self> {
        debug!("Connecting to {}{}", uri.scheme.prefix(), uri.bucket);
        let store: Arc<dyn ObjectStore> = if uri.scheme.is_gcs() {
            let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(&uri.bucket);
            if let Some(ref path) = config.gcs_service_account_path {
                builder = builder.with_service_account_path(path.to_string_lossy());
            }
            Arc::new(builder.build()?)
        } else {
            let mut builder = AmazonS3Builder::from_env()
                .with_bucket_name(&uri.bucket)
                .with_allow_http(config.allow_http);
            if let Some(ref region) = config.s3_region {
                builder = builder.with_region(region);
            }
            if let Some(ref endpoint) = config.s3_endpoint {
                builder = builder.with_endpoint(endpoint);
            }
            Arc::new(builder.build()?)
        };

        Ok(Self::with_store(uri, store))
    }

    /// Wrap an already built client, e.g. an in-memory store.
    pub fn with_store(uri: &RemoteUri, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            root: uri.with_key(""),
            store,
        }
    }

    /// The underlying `object_store` client.
    pub fn inner(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Metadata of the object at `uri`, `None` when it does not exist.
    pub async fn head(&self, uri: &RemoteUri) -> Result<Option<ObjectMeta>> {
        if uri.key.trim_end_matches('/').is_empty() {
            return Ok(None);
        }
        match self.store.head(&uri.object_path()).await {
            Ok(meta) => Ok(Some(meta)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the objects under `uri`.
    ///
    /// Recursive listings return every object below the prefix. Otherwise only
    /// direct children are returned, with sub-directories in `prefixes`.
    pub async fn list(&self, uri: &RemoteUri, recursive: bool) -> Result<Listing> {
        let prefix = prefix_of(uri);
        if recursive {
            let objects: Vec<ObjectMeta> = self.store.list(prefix.as_ref()).try_collect().await?;
            Ok(Listing {
                objects,
                prefixes: Vec::new(),
            })
        } else {
            let result = self.store.list_with_delimiter(prefix.as_ref()).await?;
            Ok(Listing {
                objects: result.objects,
                prefixes: result.common_prefixes,
            })
        }
    }

    /// Whether at least one object lives under `uri` taken as a prefix.
    pub async fn has_children(&self, uri: &RemoteUri) -> Result<bool> {
        let prefix = prefix_of(uri);
        let mut stream = self.store.list(prefix.as_ref());
        Ok(stream.try_next().await?.is_some())
    }
}

fn prefix_of(uri: &RemoteUri) -> Option<ObjectPath> {
    let key = uri.key.trim_end_matches('/');
    (!key.is_empty()).then(|| ObjectPath::from(key))
}

/// Remote store client for `path`, or `None` when the path is local.
pub fn get_fs(path: impl IntoLocation) -> Result<Option<RemoteStore>> {
    get_fs_with_config(path, &StorageConfig::default())
}

/// Same as [`get_fs`] with explicit storage overrides.
pub fn get_fs_with_config(
    path: impl IntoLocation,
    config: &StorageConfig,
) -> Result<Option<RemoteStore>> {
    match path.into_location()? {
        Location::Local(_) => Ok(None),
        Location::Remote(uri) => RemoteStore::connect(&uri, config).map(Some),
    }
}
