use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use time::OffsetDateTime;

pub type PhotoId = i64;

/// Opaque key of a voting category ("superlative"). The client never invents
/// one; it only echoes back ids the page or the API handed it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// One submitted photo as the photos endpoint reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: PhotoId,
    #[serde(alias = "uploaderName")]
    pub uploader_name: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub categories: BTreeSet<CategoryId>,
    #[serde(default)]
    pub votes: BTreeMap<CategoryId, u64>,
    #[serde(default, alias = "createdAt", with = "crate::timestamp")]
    pub created_at: Option<OffsetDateTime>,
}

impl Entry {
    pub fn competes_in(&self, category: &CategoryId) -> bool {
        self.categories.contains(category)
    }

    /// Votes are keyed by category; a missing key counts as zero.
    pub fn votes_in(&self, category: &CategoryId) -> u64 {
        self.votes.get(category).copied().unwrap_or(0)
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|caption| !caption.trim().is_empty())
    }
}

/// A ranked row of the results endpoint. `votes` is already specific to the
/// category the row is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(alias = "photoId")]
    pub photo_id: PhotoId,
    #[serde(alias = "uploaderName")]
    pub uploader_name: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub votes: u64,
}

impl ResultEntry {
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|caption| !caption.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotosResponse {
    #[serde(default)]
    pub photos: Vec<Entry>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub contest: Option<Contest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsResponse {
    #[serde(default)]
    pub results: BTreeMap<CategoryId, Vec<ResultEntry>>,
    #[serde(default)]
    pub contest: Option<Contest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVoteRequest {
    pub category: CategoryId,
    pub photo_id: PhotoId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub photo_id: Option<PhotoId>,
    #[serde(default)]
    pub contest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub id: Option<PhotoId>,
    #[serde(default)]
    pub message: Option<String>,
}
