//! Public and transformed-image URLs for objects in the hosted storage buckets.
//! Pure string building; nothing here talks to the network.

use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    Cover,
    Contain,
    Fill,
}

impl ResizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Cover => "cover",
            ResizeMode::Contain => "contain",
            ResizeMode::Fill => "fill",
        }
    }
}

/// Image transform parameters. Unset fields are left out of the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u8>,
    pub resize: Option<ResizeMode>,
}

impl TransformOptions {
    /// Square thumbnail, cropped to fill.
    pub fn thumbnail(size: u32) -> Self {
        Self {
            width: Some(size),
            height: Some(size),
            quality: Some(80),
            resize: Some(ResizeMode::Cover),
        }
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(w) = self.width {
            pairs.push(("width", w.to_string()));
        }
        if let Some(h) = self.height {
            pairs.push(("height", h.to_string()));
        }
        if let Some(q) = self.quality {
            pairs.push(("quality", q.to_string()));
        }
        if let Some(r) = self.resize {
            pairs.push(("resize", r.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct StorageUrls {
    base_url: Url,
}

impl StorageUrls {
    /// `base_url` must be an http(s) URL (validated by `StudioConfig`).
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// `{base}/storage/v1/object/public/{bucket}/{path}`
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_url(&["storage", "v1", "object", "public"], bucket, path)
            .to_string()
    }

    /// `{base}/storage/v1/render/image/public/{bucket}/{path}?width=..&height=..&quality=..&resize=..`
    pub fn transformed_url(&self, bucket: &str, path: &str, options: &TransformOptions) -> String {
        let mut url = self.object_url(
            &["storage", "v1", "render", "image", "public"],
            bucket,
            path,
        );
        let pairs = options.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url.to_string()
    }

    fn object_url(&self, prefix: &[&str], bucket: &str, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(prefix)
                .push(bucket)
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}
