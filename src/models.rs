//! Request parameters and response models for the Dropbox API.

use serde::{Deserialize, Serialize};

/// Access token returned by the OAuth2 authorization-code exchange.
///
/// When the exchange fails, Dropbox reports the reason in `error` and the
/// remaining fields stay empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One file or folder record returned by a listing or search call.
///
/// `tag` maps the wire discriminator `.tag` (`"file"` or `"folder"`).
/// Folders carry no `rev` or `size`; those fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = ".tag", default)]
    pub tag: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path_display: String,
    #[serde(default)]
    pub rev: String,
    #[serde(default)]
    pub size: u64,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_str = if self.tag == "file" {
            format_size(self.size)
        } else {
            "-".to_string()
        };
        let path = if self.path_display.is_empty() {
            &self.name
        } else {
            &self.path_display
        };
        write!(f, "{}\t{}\t{}\t{}", self.id, size_str, self.tag, path)
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

/// Response from the `files/list_folder` endpoint.
///
/// `cursor` is an opaque continuation marker; this client does not follow
/// it, so `has_more = true` means the listing is a prefix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub cursor: String,
    #[serde(default)]
    pub has_more: bool,
}

/// Media or share link for a file, as returned by the `media/auto` and
/// `shares/auto` endpoints. Both fields are opaque strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SharedUrl {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expires: String,
}

/// Response from the `files/search` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub more: bool,
}

/// One search hit: what matched, and the entry it matched on.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMatch {
    pub match_type: MatchType,
    pub metadata: Entry,
}

/// Wire discriminator for a search match (e.g. `"filename"`).
#[derive(Debug, Clone, Deserialize)]
pub struct MatchType {
    #[serde(rename = ".tag", default)]
    pub tag: String,
}

/// Parameters for a folder listing request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFolderArgs {
    pub path: String,
    pub recursive: bool,
    pub include_media_info: bool,
    pub include_deleted: bool,
}

/// Parameters for a filename search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArgs {
    pub path: String,
    pub query: String,
    pub start: u64,
    pub max_results: u64,
    pub mode: String,
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            query: String::new(),
            start: 0,
            max_results: 100,
            mode: "filename".to_string(),
        }
    }
}

// Request bodies for the link endpoints stay crate-private; the path goes
// in the URL and the caller has nothing else to configure per call.

#[derive(Debug, Serialize)]
pub(crate) struct MediaParams {
    pub locale: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShareParams {
    pub locale: String,
    pub short_url: bool,
}

/// Error body Dropbox sends on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserialize() {
        let json = r#"{
            ".tag": "file",
            "name": "Prime_Numbers.txt",
            "path_display": "/Homework/math/Prime_Numbers.txt",
            "id": "id:a4ayc_80_OEAAAAAAAAAXw",
            "rev": "a1c10ce0dd78",
            "size": 7212
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tag, "file");
        assert_eq!(entry.name, "Prime_Numbers.txt");
        assert_eq!(entry.path_display, "/Homework/math/Prime_Numbers.txt");
        assert_eq!(entry.rev, "a1c10ce0dd78");
        assert_eq!(entry.size, 7212);
    }

    #[test]
    fn test_folder_entry_has_no_size() {
        let json = r#"{".tag": "folder", "name": "math", "id": "id:xyz"}"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.tag, "folder");
        assert_eq!(entry.size, 0);
        assert!(entry.rev.is_empty());
    }

    #[test]
    fn test_entry_ignores_unknown_fields() {
        let json = r#"{
            ".tag": "file",
            "name": "a.txt",
            "id": "id:abc",
            "size": 3,
            "client_modified": "2015-05-12T15:50:38Z",
            "sharing_info": {"read_only": true}
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "a.txt");
        assert_eq!(entry.size, 3);
    }

    #[test]
    fn test_token_with_error() {
        let json = r#"{"error": "invalid_grant"}"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.error.as_deref(), Some("invalid_grant"));
        assert!(token.access_token.is_empty());
        assert!(token.uid.is_empty());
    }

    #[test]
    fn test_token_ignores_token_type() {
        let json = r#"{"access_token": "t", "token_type": "bearer", "uid": "12345"}"#;

        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "t");
        assert_eq!(token.uid, "12345");
        assert!(token.error.is_none());
    }

    #[test]
    fn test_list_folder_args_round_trip() {
        let args = ListFolderArgs {
            path: "/music".to_string(),
            recursive: true,
            include_media_info: false,
            include_deleted: true,
        };

        let json = serde_json::to_string(&args).unwrap();
        let back: ListFolderArgs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, args);
    }

    #[test]
    fn test_list_folder_args_wire_names() {
        let json = serde_json::to_value(ListFolderArgs::default()).unwrap();
        assert_eq!(json["path"], "");
        assert_eq!(json["recursive"], false);
        assert_eq!(json["include_media_info"], false);
        assert_eq!(json["include_deleted"], false);
    }

    #[test]
    fn test_search_args_defaults() {
        let args = SearchArgs::default();
        assert_eq!(args.max_results, 100);
        assert_eq!(args.mode, "filename");
        assert_eq!(args.start, 0);
    }

    #[test]
    fn test_search_result_deserialize() {
        let json = r#"{
            "matches": [
                {
                    "match_type": {".tag": "filename"},
                    "metadata": {
                        ".tag": "file",
                        "name": "song.mp3",
                        "id": "id:abc",
                        "path_display": "/music/song.mp3",
                        "rev": "0011",
                        "size": 4096
                    }
                }
            ],
            "more": false,
            "start": 1
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].match_type.tag, "filename");
        assert_eq!(result.matches[0].metadata.name, "song.mp3");
        assert_eq!(result.start, 1);
        assert!(!result.more);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_entry_display() {
        let entry = Entry {
            tag: "file".to_string(),
            id: "id:abc".to_string(),
            name: "song.mp3".to_string(),
            path_display: "/music/song.mp3".to_string(),
            rev: "0011".to_string(),
            size: 1024,
        };

        let display = format!("{}", entry);
        assert!(display.contains("id:abc"));
        assert!(display.contains("1.00 KB"));
        assert!(display.contains("/music/song.mp3"));
    }
}
