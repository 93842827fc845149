//
//  bitbucket-cloud
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::cloud::Repository;
use crate::api::common::ListOpts;

use super::{print_json, GlobalOptions};

/// Work with repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories owned by a workspace or user
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View repository details
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Workspace or user
    pub owner: String,

    /// Page to fetch (1-based)
    #[arg(long)]
    pub page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Workspace or user
    pub owner: String,

    /// Repository slug
    pub slug: String,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, global).await,
            RepoSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let opts = ListOpts {
            page: args.page,
            pagelen: None,
        };
        let repos = client
            .repositories()
            .list(&args.owner, &[&opts])
            .await?
            .into_data();

        if global.json {
            return print_json(&repos);
        }

        if repos.is_empty() {
            println!("No repositories found for {}", args.owner);
            return Ok(());
        }

        for repo in &repos.values {
            println!("{}", repo_row(repo));
        }
        if repos.has_next() {
            println!(
                "(page {} of more; use --page {})",
                repos.page.unwrap_or(1),
                repos.page.unwrap_or(1) + 1
            );
        }
        Ok(())
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let repo = client
            .repositories()
            .get(&args.owner, &args.slug)
            .await?
            .into_data();

        if global.json {
            return print_json(&repo);
        }

        println!("{}", repo.full_name.as_deref().unwrap_or(&args.slug));
        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            println!("{}", description);
        }
        println!();
        println!("Visibility:  {}", visibility(&repo));
        if let Some(branch) = repo.mainbranch.as_ref().and_then(|b| b.name.as_deref()) {
            println!("Main branch: {}", branch);
        }
        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            println!("Language:    {}", language);
        }
        if let Some(updated) = repo.updated_on {
            println!("Updated:     {}", updated.format("%Y-%m-%d %H:%M"));
        }
        if let Some(url) = repo.links.as_ref().and_then(|l| l.html.as_ref()) {
            println!("URL:         {}", url.href);
        }
        Ok(())
    }
}

fn visibility(repo: &Repository) -> &'static str {
    match repo.is_private {
        Some(true) => "private",
        Some(false) => "public",
        None => "unknown",
    }
}

fn repo_row(repo: &Repository) -> String {
    format!(
        "{:<40} {:<8} {}",
        repo.full_name.as_deref().unwrap_or_default(),
        visibility(repo),
        repo.description.as_deref().unwrap_or_default()
    )
    .trim_end()
    .to_string()
}
