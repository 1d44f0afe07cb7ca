use serde::{Deserialize, Serialize};

/// Tag attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// User who uploaded an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploader {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Asset record as returned by search, saved-assets and history endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_name: String,
    pub game_slug: String,
    #[serde(default)]
    pub category_id: String,
    pub category_name: String,
    #[serde(default)]
    pub category_slug: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub size: u64,
    pub extension: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_suggestive: bool,
    #[serde(default)]
    pub tags: Vec<AssetTag>,
    #[serde(default)]
    pub uploaded_by: Uploader,
}

impl Asset {
    /// Projects the fields the bulk downloader needs.
    pub fn to_ref(&self) -> AssetRef {
        AssetRef::from(self)
    }
}

/// Download-relevant projection of an [`Asset`].
///
/// `id` + `extension` locate the remote file; `game_slug` and
/// `category_name` pick the archive folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    pub id: String,
    pub name: String,
    pub extension: String,
    pub game_slug: String,
    pub category_name: String,
    #[serde(default)]
    pub size: u64,
}

impl From<&Asset> for AssetRef {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            name: asset.name.clone(),
            extension: asset.extension.clone(),
            game_slug: asset.game_slug.clone(),
            category_name: asset.category_name.clone(),
            size: asset.size,
        }
    }
}

/// Game embedded in an asset detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub asset_count: u64,
}

/// Category embedded in an asset detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// `GET /asset/{id}` payload: game and category are nested objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub size: u64,
    pub extension: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_suggestive: bool,
    #[serde(default)]
    pub uploaded_by: Uploader,
    pub game: GameSummary,
    pub category: CategorySummary,
    #[serde(default)]
    pub tags: Vec<AssetTag>,
}

impl AssetDetail {
    /// Flattens the nested game/category into the list-style [`Asset`].
    pub fn into_asset(self) -> Asset {
        Asset {
            id: self.id,
            name: self.name,
            game_id: self.game.id,
            game_name: self.game.name,
            game_slug: self.game.slug,
            category_id: self.category.id,
            category_name: self.category.name,
            category_slug: self.category.slug,
            download_count: self.download_count,
            view_count: self.view_count,
            size: self.size,
            extension: self.extension,
            created_at: self.created_at,
            is_suggestive: self.is_suggestive,
            tags: self.tags,
            uploaded_by: self.uploaded_by,
        }
    }
}

/// Envelope of `GET /asset/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetailResponse {
    pub success: bool,
    pub asset: AssetDetail,
}

/// Whether clicking an asset card navigates or toggles its selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    #[serde(rename = "view")]
    View,
    #[serde(rename = "multi-select")]
    MultiSelect,
}

impl SelectionMode {
    /// Returns the wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::MultiSelect => "multi-select",
        }
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "multi-select" | "multiselect" | "multi" => Ok(Self::MultiSelect),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}
