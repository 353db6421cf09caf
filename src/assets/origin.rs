//! Asset origins: where bytes come from on a cache miss.
//!
//! The manager is origin-agnostic; implementations plug in behind
//! [`AssetOrigin`]. Two ship with the crate: [`HttpOrigin`] for a remote
//! image CDN and [`BundleOrigin`] for a local directory bundle laid out the
//! same way. Both convert every failure into a typed [`FetchFault`] — no
//! origin error escapes as a panic or raw error type.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use crate::assets::request::{escape, AssetRequest};
use crate::assets::response::FetchFault;
use crate::config::OriginConfig;

/// A source of asset bytes.
#[async_trait]
pub trait AssetOrigin: Send + Sync {
    /// Fetch the asset for `request`, or say why it could not be fetched.
    async fn fetch(&self, request: &AssetRequest) -> Result<Bytes, FetchFault>;
}

/// Relative path of an asset, shared by both origin layouts.
fn asset_path(request: &AssetRequest) -> String {
    match request {
        AssetRequest::Map { id, .. } => format!("map/map{}.png", escape(id)),
        AssetRequest::Champion { name } => format!("champion/{}.png", escape(name)),
        AssetRequest::Item { id } => format!("item/{}.png", escape(id)),
    }
}

/// Remote image CDN origin.
pub struct HttpOrigin {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrigin {
    /// Build an origin from configuration (base URL, timeout, user agent).
    pub fn new(config: &OriginConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &AssetRequest) -> String {
        format!("{}/{}", self.base_url, asset_path(request))
    }
}

#[async_trait]
impl AssetOrigin for HttpOrigin {
    async fn fetch(&self, request: &AssetRequest) -> Result<Bytes, FetchFault> {
        let url = self.url_for(request);
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "origin request failed");
            FetchFault::OriginError
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchFault::NotFound);
        }
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "origin answered with error status");
            return Err(FetchFault::OriginError);
        }

        response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "origin body read failed");
            FetchFault::OriginError
        })
    }
}

/// Local directory bundle origin.
///
/// Expects the same relative layout the HTTP origin serves, rooted at a
/// directory on disk. Useful for air-gapped installs and tests.
pub struct BundleOrigin {
    root: PathBuf,
}

impl BundleOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetOrigin for BundleOrigin {
    async fn fetch(&self, request: &AssetRequest) -> Result<Bytes, FetchFault> {
        let path = self.root.join(asset_path(request));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Bytes::from(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FetchFault::NotFound),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "bundle read failed");
                Err(FetchFault::IoError)
            }
        }
    }
}
