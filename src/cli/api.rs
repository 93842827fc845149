//
//  bitbucket-cloud
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Makes an authenticated GET request to any endpoint, similar to `gh api`
//! for GitHub. Useful for endpoints no other command covers, and for
//! following `next` links by hand.
//!
//! ## Examples
//!
//! ```bash
//! # Get repository info
//! bb api /repositories/workspace/repo
//!
//! # Follow a next link
//! bb api 'https://api.bitbucket.org/2.0/repositories/workspace?page=2'
//!
//! # Show status and response headers
//! bb api -i /user
//! ```

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use super::GlobalOptions;

/// Make a raw GET request
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path under the base URL (e.g. /repositories/workspace/repo) or an absolute URL
    pub path: String,

    /// Include response status and headers in output
    #[arg(long, short = 'i')]
    pub include: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let url = client.request_url(&normalize_path(&self.path), &[])?;
        tracing::debug!("GET {}", url);

        let response = client.get_text(&url).await?;

        if self.include {
            println!("HTTP {}", response.status);
            for (name, value) in response.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!();
        }

        println!("{}", render_body(&response.data));
        Ok(())
    }
}

/// Prefixes a relative path with `/` unless it is already absolute.
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Pretty-prints JSON bodies and passes anything else through.
fn render_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}
