//! dropbox_lite - a small client for the Dropbox HTTP API.
//!
//! This library provides functionality to:
//! - Build the OAuth2 authorization URL and exchange a code for a token
//! - List the entries of a folder
//! - Retrieve media (streamable) and share links for files
//! - Search for files by name
//!
//! # Example
//!
//! ```no_run
//! use dropbox_lite::{DropboxClient, ListFolderArgs};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = DropboxClient::new();
//!     client.set_access_token("my-access-token");
//!
//!     let folder = client.list_folder(&ListFolderArgs::default()).await?;
//!     for entry in &folder.entries {
//!         println!("{}", entry);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-exports for convenience
pub use auth::OAuth2Handler;
pub use client::DropboxClient;
pub use error::{DropboxError, Result};
pub use models::{Entry, Folder, ListFolderArgs, SearchArgs, SearchResult, SharedUrl, Token};
