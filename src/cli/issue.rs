//
//  bitbucket-cloud
//  cli/issue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Issue commands
//!
//! List, create and view issues in a repository's issue tracker.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::cloud::{Issue, IssueRequest};
use crate::api::common::FilterSortOpts;

use super::{print_json, GlobalOptions};

/// Work with issues
#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// List issues
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// View an issue
    View(ViewArgs),
}

/// Repository selector shared by the issue subcommands.
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// Repository owner (workspace or user)
    #[arg(long, short = 'o')]
    pub owner: String,

    /// Repository slug
    #[arg(long, short = 'r')]
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Filter expression, e.g. 'state="open" AND kind="bug"'
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Issue title
    #[arg(long, short = 't')]
    pub title: String,

    /// Kind
    #[arg(long, short = 'k', value_parser = ["bug", "enhancement", "proposal", "task"])]
    pub kind: Option<String>,

    /// Priority
    #[arg(long, short = 'p', value_parser = ["trivial", "minor", "major", "critical", "blocker"])]
    pub priority: Option<String>,

    /// Issue body/description
    #[arg(long, short = 'b')]
    pub body: Option<String>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    #[command(flatten)]
    pub target: RepoArgs,

    /// Issue ID
    pub id: i64,
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            IssueSubcommand::List(args) => self.list(args, global).await,
            IssueSubcommand::Create(args) => self.create(args, global).await,
            IssueSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let opts = FilterSortOpts {
            q: args.query.clone(),
            sort: None,
        };

        let issues = client
            .issues()
            .list(&args.target.owner, &args.target.repo, &[&opts])
            .await?
            .into_data();

        if global.json {
            return print_json(&issues);
        }

        if issues.is_empty() {
            println!("No issues found");
            return Ok(());
        }

        for issue in &issues.values {
            println!("{}", issue_row(issue));
        }
        if issues.has_next() {
            println!("(more results available)");
        }
        Ok(())
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let mut request = IssueRequest {
            title: Some(args.title.clone()),
            kind: args.kind.clone(),
            priority: args.priority.clone(),
            ..Default::default()
        };
        if let Some(body) = &args.body {
            request = request.with_content(body);
        }

        let issue = client
            .issues()
            .create(&args.target.owner, &args.target.repo, &request)
            .await?
            .into_data();

        if global.json {
            return print_json(&issue);
        }

        println!("Created issue #{}", issue.id.unwrap_or_default());
        if let Some(url) = issue.links.as_ref().and_then(|l| l.html.as_ref()) {
            println!("{}", url.href);
        }
        Ok(())
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let issue = client
            .issues()
            .get(&args.target.owner, &args.target.repo, args.id, &[])
            .await?
            .into_data();

        if global.json {
            return print_json(&issue);
        }

        println!(
            "#{} {}",
            issue.id.unwrap_or_default(),
            issue.title.as_deref().unwrap_or_default()
        );
        println!(
            "{} · {} · {}",
            issue.state.as_deref().unwrap_or("-"),
            issue.kind.as_deref().unwrap_or("-"),
            issue.priority.as_deref().unwrap_or("-")
        );
        if let Some(reporter) = &issue.reporter {
            println!("Reporter: {}", reporter.name());
        }
        if let Some(assignee) = &issue.assignee {
            println!("Assignee: {}", assignee.name());
        }
        if let Some(body) = issue
            .content
            .as_ref()
            .and_then(|c| c.raw.as_deref())
            .filter(|b| !b.is_empty())
        {
            println!();
            println!("{}", body);
        }
        Ok(())
    }
}

fn issue_row(issue: &Issue) -> String {
    format!(
        "#{:<6} {:<10} {:<9} {}",
        issue.id.unwrap_or_default(),
        issue.state.as_deref().unwrap_or("-"),
        issue.priority.as_deref().unwrap_or("-"),
        issue.title.as_deref().unwrap_or_default()
    )
}
