//
//  bitbucket-cloud
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::cloud::{PullRequest, PullRequestEndpoint};

use super::{print_json, GlobalOptions};

/// Work with pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository owner (workspace or user)
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Repository slug
    #[arg(long, short = 'r')]
    pub repo: String,

    /// Filter by state (defaults to OPEN on the server)
    #[arg(long, short = 's', value_parser = ["OPEN", "MERGED", "DECLINED", "SUPERSEDED"], ignore_case = true)]
    pub state: Option<String>,
}

/// `state` query parameter for the pull request listing.
#[derive(Debug, Serialize)]
struct StateOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

impl PrCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let opts = StateOpts {
            state: args.state.as_ref().map(|s| s.to_uppercase()),
        };

        let prs = client
            .pull_requests()
            .list(&args.owner, &args.repo, &[&opts])
            .await?
            .into_data();

        if global.json {
            return print_json(&prs);
        }

        if prs.is_empty() {
            println!("No pull requests found");
            return Ok(());
        }

        for pr in &prs.values {
            println!("{}", pr_row(pr));
        }
        Ok(())
    }
}

fn branch_name(endpoint: Option<&PullRequestEndpoint>) -> &str {
    endpoint
        .and_then(|e| e.branch.as_ref())
        .map(|b| b.name.as_str())
        .unwrap_or("?")
}

fn pr_row(pr: &PullRequest) -> String {
    format!(
        "#{:<6} {:<9} {} -> {}  {} ({})",
        pr.id.unwrap_or_default(),
        pr.state.as_deref().unwrap_or("-"),
        branch_name(pr.source.as_ref()),
        branch_name(pr.destination.as_ref()),
        pr.title.as_deref().unwrap_or_default(),
        pr.author.as_ref().map(|a| a.name()).unwrap_or("unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cloud::BranchName;

    fn endpoint(name: &str) -> Option<PullRequestEndpoint> {
        Some(PullRequestEndpoint {
            branch: Some(BranchName {
                name: name.to_string(),
            }),
            ..Default::default()
        })
    }

    #[test]
    fn test_pr_row() {
        let pr = PullRequest {
            id: Some(7),
            title: Some("Add login".to_string()),
            state: Some("OPEN".to_string()),
            source: endpoint("feature/login"),
            destination: endpoint("main"),
            ..Default::default()
        };
        assert_eq!(
            pr_row(&pr),
            "#7      OPEN      feature/login -> main  Add login (unknown)"
        );
    }

    #[test]
    fn test_state_opts_skip_unset() {
        let value = serde_json::to_value(StateOpts { state: None }).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
