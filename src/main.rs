//! dropbox_lite CLI - interact with the Dropbox API from the shell.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dropbox_lite::{DropboxClient, ListFolderArgs, SearchArgs};

/// CLI for the Dropbox API: authorization, listing, links, and search.
#[derive(Parser)]
#[command(name = "dropbox_lite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Access token for authenticated operations.
    #[arg(long, env = "DROPBOX_ACCESS_TOKEN")]
    token: Option<String>,

    /// App key from the Dropbox app console.
    #[arg(long, env = "DROPBOX_APP_KEY")]
    app_key: Option<String>,

    /// App secret from the Dropbox app console.
    #[arg(long, env = "DROPBOX_APP_SECRET")]
    app_secret: Option<String>,

    /// Redirect URL registered with the app.
    #[arg(long, env = "DROPBOX_REDIRECT_URL")]
    redirect_url: Option<String>,

    /// Locale sent to the API to translate/format messages.
    #[arg(long, default_value = "en")]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the URL the user must visit to authorize the app.
    AuthUrl,

    /// Exchange an authorization code for an access token.
    Exchange {
        /// Code obtained from the authorization page.
        code: String,
    },

    /// List the entries of a folder.
    List {
        /// Folder path ("" is the root).
        #[arg(default_value = "")]
        path: String,

        /// Descend into subfolders.
        #[arg(long)]
        recursive: bool,
    },

    /// Get a direct (streamable) link for a file.
    Media {
        /// File path.
        path: String,
    },

    /// Get a shareable link for a file or folder.
    Share {
        /// File or folder path.
        path: String,

        /// Request a shortened link.
        #[arg(long)]
        short: bool,
    },

    /// Search for files by name.
    Search {
        /// Substring to match against filenames.
        query: String,

        /// Folder path to search under ("" is the root).
        #[arg(long, default_value = "")]
        path: String,

        /// Maximum number of matches to return.
        #[arg(long, default_value_t = 100)]
        max_results: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut client = DropboxClient::new();
    client.set_locale(&cli.locale);

    if let (Some(key), Some(secret), Some(redirect)) =
        (&cli.app_key, &cli.app_secret, &cli.redirect_url)
    {
        client.set_app_info(key, secret, redirect);
    }

    if let Some(token) = &cli.token {
        client.set_access_token(token);
    }

    match cli.command {
        Commands::AuthUrl => {
            println!("{}", client.authorize_url()?);
        }

        Commands::Exchange { code } => {
            let token = client
                .exchange_token(&code)
                .await
                .context("token exchange failed")?;

            if let Some(error) = &token.error {
                bail!("Dropbox rejected the code: {}", error);
            }

            println!("uid: {}", token.uid);
            println!("access_token: {}", token.access_token);
        }

        Commands::List { path, recursive } => {
            let args = ListFolderArgs {
                path,
                recursive,
                ..ListFolderArgs::default()
            };

            let folder = client.list_folder(&args).await?;

            if folder.entries.is_empty() {
                println!("No entries found.");
            } else {
                for entry in &folder.entries {
                    println!("{}", entry);
                }
            }

            if folder.has_more {
                println!("(listing truncated; server has more entries)");
            }
        }

        Commands::Media { path } => {
            let link = client.get_media_url(&path).await?;
            println!("{}", link.url);
            if !link.expires.is_empty() {
                println!("expires: {}", link.expires);
            }
        }

        Commands::Share { path, short } => {
            let link = client.get_share_url(&path, short).await?;
            println!("{}", link.url);
            if !link.expires.is_empty() {
                println!("expires: {}", link.expires);
            }
        }

        Commands::Search {
            query,
            path,
            max_results,
        } => {
            let args = SearchArgs {
                path,
                query,
                max_results,
                ..SearchArgs::default()
            };

            let result = client.search(&args).await?;

            if result.matches.is_empty() {
                println!("No matches.");
            } else {
                for m in &result.matches {
                    println!("{}", m.metadata);
                }
            }

            if result.more {
                println!("(more matches available)");
            }
        }
    }

    Ok(())
}
