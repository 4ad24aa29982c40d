use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============ Envelope ============

/// Response envelope shared by every Halo admin endpoint.
///
/// `data` is absent when the request failed on the server side; callers
/// decide whether that is an error (it is for list and get).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T> {
    /// Status reported by the blog (mirrors the HTTP status).
    #[serde(default)]
    pub status: i32,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Developer message, only sent for failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_message: Option<String>,
    /// Payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> BaseResponse<T> {
    /// Wrap a payload in a successful envelope.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            message: "OK".to_string(),
            dev_message: None,
            data: Some(data),
        }
    }

    /// An envelope without payload.
    #[must_use]
    pub fn empty(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            dev_message: None,
            data: None,
        }
    }
}

/// Spring-style page returned by list endpoints.
///
/// Pages are 0-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Current page number.
    #[serde(default)]
    pub number: u32,
    /// Page size used for this request.
    #[serde(default)]
    pub size: u32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Items in the current page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

impl<T> PageResponse<T> {
    /// Build a single page holding all of `content`.
    #[must_use]
    pub fn single(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            number: 0,
            size: u32::try_from(len).unwrap_or(u32::MAX),
            total_elements: len as u64,
            total_pages: 1,
            content,
        }
    }
}

// ============ Posts ============

/// Publication status of a post.
///
/// Halo names the states `PUBLISHED`, `DRAFT` and `RECYCLE`. Older clients
/// sent the enum ordinal instead, so both encodings are accepted when
/// decoding. Encoding always uses the Halo name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostStatus {
    Published,
    #[default]
    Drafted,
    Deleted,
}

impl PostStatus {
    /// Name used by the Halo API (query parameters and URL segments).
    #[must_use]
    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Published => "PUBLISHED",
            Self::Drafted => "DRAFT",
            Self::Deleted => "RECYCLE",
        }
    }

    fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Published),
            1 => Some(Self::Drafted),
            2 => Some(Self::Deleted),
            _ => None,
        }
    }

    fn from_name(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PUBLISHED" => Some(Self::Published),
            "DRAFT" | "DRAFTED" => Some(Self::Drafted),
            "RECYCLE" | "DELETED" => Some(Self::Deleted),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl Serialize for PostStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_api_str())
    }
}

impl<'de> Deserialize<'de> for PostStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NameOrOrdinal {
            Name(String),
            Ordinal(i64),
        }

        match NameOrOrdinal::deserialize(deserializer)? {
            NameOrOrdinal::Name(name) => PostStatus::from_name(&name)
                .ok_or_else(|| Error::custom(format!("Unknown post status: {name}"))),
            NameOrOrdinal::Ordinal(ordinal) => PostStatus::from_ordinal(ordinal)
                .ok_or_else(|| Error::custom(format!("Unknown post status ordinal: {ordinal}"))),
        }
    }
}

/// Post metadata as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: i64,
    /// Natural key used to match a local `<title>.md` file.
    pub title: String,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub edit_time: Option<DateTime<Utc>>,
}

/// A full post, fetched individually by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    /// Markdown source.
    #[serde(default)]
    pub original_content: String,
    /// Rendered HTML.
    #[serde(default)]
    pub format_content: String,
}

impl Post {
    pub fn id(&self) -> i64 {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }
}

/// Body of a content-only update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContentRequest {
    pub content: String,
}

// ============ Queries ============

/// Query parameters for the post list endpoint.
///
/// # Default
///
/// The default is `page = 0, size = 10`, with no sort or filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    /// Page number (0-indexed).
    pub page: u32,
    /// Number of items per page.
    pub size: u32,
    /// Sort expressions such as `editTime,desc`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: Vec::new(),
            category_id: None,
            keyword: None,
            status: None,
        }
    }
}

impl PostQuery {
    /// Page size used when fetching the whole collection in one request.
    pub const FULL_CATALOG_SIZE: u32 = 100;

    /// Query used for catalog refreshes: first page, large enough to hold
    /// the whole collection, most recently edited first.
    #[must_use]
    pub fn full_catalog() -> Self {
        Self {
            page: 0,
            size: Self::FULL_CATALOG_SIZE,
            sort: vec!["editTime,desc".to_string()],
            ..Self::default()
        }
    }

    /// Render as a URL query string (without the leading `?`).
    ///
    /// `sort` is repeated once per expression, which is what Spring expects.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![
            format!("page={}", self.page),
            format!("size={}", self.size),
        ];
        for sort in &self.sort {
            pairs.push(format!("sort={}", urlencoding::encode(sort)));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(format!("categoryId={category_id}"));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(format!("keyword={}", urlencoding::encode(keyword)));
        }
        if let Some(status) = self.status {
            pairs.push(format!("status={}", status.as_api_str()));
        }
        pairs.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_ordinal_and_name() {
        let s: PostStatus = serde_json::from_str("0").unwrap();
        assert_eq!(s, PostStatus::Published);
        let s: PostStatus = serde_json::from_str("2").unwrap();
        assert_eq!(s, PostStatus::Deleted);
        let s: PostStatus = serde_json::from_str("\"DRAFT\"").unwrap();
        assert_eq!(s, PostStatus::Drafted);
        let s: PostStatus = serde_json::from_str("\"recycle\"").unwrap();
        assert_eq!(s, PostStatus::Deleted);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<PostStatus>("7").is_err());
        assert!(serde_json::from_str::<PostStatus>("\"INTIMATE\"").is_err());
    }

    #[test]
    fn status_serializes_as_halo_name() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Published).unwrap(),
            "\"PUBLISHED\""
        );
    }

    #[test]
    fn list_envelope_parses_minimal_summary() {
        let json = r#"{
            "status": 200,
            "message": "OK",
            "data": {
                "content": [{"id": 1, "title": "Hello", "status": 0, "editTime": 1577836800000}]
            }
        }"#;
        let resp: BaseResponse<PageResponse<PostSummary>> = serde_json::from_str(json).unwrap();
        let page = resp.data.unwrap();
        assert_eq!(page.content.len(), 1);
        let post = &page.content[0];
        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.edit_time.unwrap().timestamp(), 1_577_836_800);
        assert!(post.create_time.is_none());
    }

    #[test]
    fn envelope_without_data() {
        let json = r#"{"status": 400, "message": "bad", "devMessage": "trace"}"#;
        let resp: BaseResponse<Post> = serde_json::from_str(json).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.dev_message.as_deref(), Some("trace"));
    }

    #[test]
    fn post_flattens_summary() {
        let json = r##"{
            "id": 9, "title": "Notes", "status": "PUBLISHED",
            "originalContent": "# Notes", "formatContent": "<h1>Notes</h1>"
        }"##;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id(), 9);
        assert_eq!(post.title(), "Notes");
        assert_eq!(post.original_content, "# Notes");
    }

    #[test]
    fn full_catalog_query_string() {
        let q = PostQuery::full_catalog();
        assert_eq!(q.to_query_string(), "page=0&size=100&sort=editTime%2Cdesc");
    }

    #[test]
    fn query_string_with_filters() {
        let q = PostQuery {
            keyword: Some("rust async".to_string()),
            status: Some(PostStatus::Drafted),
            category_id: Some(3),
            ..PostQuery::default()
        };
        assert_eq!(
            q.to_query_string(),
            "page=0&size=10&categoryId=3&keyword=rust%20async&status=DRAFT"
        );
    }
}
