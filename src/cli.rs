//! Command-line interface.
//!
//! Each subcommand maps onto one client operation and prints the decoded
//! response as pretty JSON on stdout.

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::api::types::{LoginInput, ProjectsListFilter, ResolverResult};
use crate::app::Taiga;
use crate::error::{AppError, Result};

#[derive(Debug, Parser)]
#[command(name = "taiga")]
#[command(version, about = "Command-line client for the Taiga REST API")]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to <config dir>/taiga/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with username and password
    Login {
        #[arg(short, long)]
        username: String,
        /// Falls back to $TAIGA_PASSWORD, then one line of stdin
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Me,
    /// Resolve slugs and reference numbers to IDs
    Resolve(ResolveArgs),
    /// List the languages the instance offers
    Locales,
    /// Project operations
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    /// List memberships of a project
    Memberships {
        #[arg(long)]
        project: Option<u64>,
    },
    /// Look up an issue by reference number
    Issue {
        #[arg(long)]
        project: u64,
        #[arg(long = "ref")]
        reference: u64,
    },
    /// List tasks
    Tasks {
        #[arg(long)]
        project: Option<u64>,
        #[arg(long)]
        milestone: Option<u64>,
        #[arg(long)]
        user_story: Option<u64>,
    },
    /// List webhooks of a project
    Webhooks {
        #[arg(long)]
        project: Option<u64>,
    },
    /// List webhook delivery logs
    WebhookLogs {
        #[arg(long)]
        webhook: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    List {
        /// Only projects this user is a member of
        #[arg(long)]
        member: Option<u64>,
        #[arg(long)]
        featured: bool,
    },
    /// Show a project by slug
    Show { slug: String },
    /// Show burndown statistics
    Stats { id: u64 },
    /// Show tag colors
    Tags { id: u64 },
}

/// Identifiers to resolve within a project.
#[derive(Debug, Args, Default, PartialEq, Eq)]
pub struct ResolveArgs {
    /// Project slug
    #[arg(long)]
    pub project: String,
    /// User story reference
    #[arg(long, conflicts_with_all = ["issue", "milestone", "wikipage", "reference"])]
    pub us: Option<u64>,
    /// Task reference
    #[arg(long, conflicts_with_all = ["issue", "milestone", "wikipage", "reference"])]
    pub task: Option<u64>,
    /// Issue reference
    #[arg(long, conflicts_with_all = ["milestone", "wikipage", "reference"])]
    pub issue: Option<u64>,
    /// Sprint slug
    #[arg(long, conflicts_with_all = ["wikipage", "reference"])]
    pub milestone: Option<String>,
    /// Wiki page slug
    #[arg(long, conflicts_with = "reference")]
    pub wikipage: Option<String>,
    /// Any reference number
    #[arg(long = "ref")]
    pub reference: Option<u64>,
}

/// The resolver call a set of flags selects.
#[derive(Debug, PartialEq, Eq)]
enum Resolution<'a> {
    Project,
    UserStory(u64),
    Task(u64),
    Multiple { task: u64, us: u64 },
    Issue(u64),
    Milestone(&'a str),
    WikiPage(&'a str),
    Reference(u64),
}

impl ResolveArgs {
    fn resolution(&self) -> Resolution<'_> {
        match self {
            Self { reference: Some(r), .. } => Resolution::Reference(*r),
            Self { wikipage: Some(w), .. } => Resolution::WikiPage(w),
            Self { milestone: Some(m), .. } => Resolution::Milestone(m),
            Self { issue: Some(i), .. } => Resolution::Issue(*i),
            Self { task: Some(task), us: Some(us), .. } => Resolution::Multiple {
                task: *task,
                us: *us,
            },
            Self { task: Some(t), .. } => Resolution::Task(*t),
            Self { us: Some(u), .. } => Resolution::UserStory(*u),
            _ => Resolution::Project,
        }
    }

    async fn run(&self, taiga: &Taiga) -> Result<ResolverResult> {
        let resolver = taiga.resolver();
        let project = self.project.as_str();
        let resolution = self.resolution();
        debug!(?resolution, "Resolving");
        let result = match resolution {
            Resolution::Project => resolver.project(project).await?,
            Resolution::UserStory(us) => resolver.user_story(project, us).await?,
            Resolution::Task(task) => resolver.task(project, task).await?,
            Resolution::Multiple { task, us } => {
                resolver.multiple(project, Some(task), Some(us)).await?
            }
            Resolution::Issue(issue) => resolver.issue(project, issue).await?,
            Resolution::Milestone(slug) => resolver.milestone(project, slug).await?,
            Resolution::WikiPage(slug) => resolver.wiki_page(project, slug).await?,
            Resolution::Reference(r) => resolver.reference(project, r).await?,
        };
        Ok(result)
    }
}

/// Environment variable read when `login` gets no `--password`.
pub const PASSWORD_ENV: &str = "TAIGA_PASSWORD";

/// Pick the login password: the flag, then the environment, then stdin.
fn resolve_password(
    flag: Option<&str>,
    env: Option<String>,
    mut stdin: impl BufRead,
) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password.to_string());
    }
    if let Some(password) = env.filter(|p| !p.is_empty()) {
        debug!("Using password from {}", PASSWORD_ENV);
        return Ok(password);
    }

    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .map_err(|e| AppError::other(format!("failed to read password from stdin: {}", e)))?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(AppError::other(format!(
            "no password given; use --password, set {} or pipe it on stdin",
            PASSWORD_ENV
        )));
    }
    Ok(password.to_string())
}

/// Run one command against a bootstrapped client.
pub async fn run(command: &Command, taiga: &Taiga) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            let password = resolve_password(
                password.as_deref(),
                std::env::var(PASSWORD_ENV).ok(),
                io::stdin().lock(),
            )?;
            let auth = taiga
                .auth()
                .login(&LoginInput::normal(username, &password))
                .await?;
            print_json(&auth.user)
        }
        Command::Logout => {
            taiga.auth().logout()?;
            Ok(())
        }
        Command::Me => print_json(&taiga.users().me().await?),
        Command::Resolve(args) => print_json(&args.run(taiga).await?),
        Command::Locales => print_json(&taiga.locales().get().await?),
        Command::Projects { command } => run_projects(command, taiga).await,
        Command::Memberships { project } => {
            print_json(&taiga.memberships().list(*project).await?)
        }
        Command::Issue { project, reference } => {
            print_json(&taiga.issues().get_by_ref(*project, *reference).await?)
        }
        Command::Tasks {
            project,
            milestone,
            user_story,
        } => print_json(&taiga.tasks().list(*project, *milestone, *user_story).await?),
        Command::Webhooks { project } => print_json(&taiga.webhooks().list(*project).await?),
        Command::WebhookLogs { webhook } => {
            print_json(&taiga.webhook_logs().list(*webhook).await?)
        }
    }
}

async fn run_projects(command: &ProjectsCommand, taiga: &Taiga) -> Result<()> {
    let projects = taiga.projects();
    match command {
        ProjectsCommand::List { member, featured } => {
            let filter = ProjectsListFilter {
                member: *member,
                is_featured: featured.then_some(true),
                ..Default::default()
            };
            print_json(&projects.list(&filter, None).await?)
        }
        ProjectsCommand::Show { slug } => print_json(&projects.get_by_slug(slug).await?),
        ProjectsCommand::Stats { id } => print_json(&projects.stats(*id).await?),
        ProjectsCommand::Tags { id } => print_json(&projects.tags_colors(*id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::other(format!("failed to encode output: {}", e)))?;
    println!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use wiremock::MockServer;

    use crate::api::token_store::MemoryTokenStore;
    use crate::test_support::{config, expect_one, respond};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("taiga").chain(args.iter().copied())).unwrap()
    }

    fn resolve_args(args: &[&str]) -> ResolveArgs {
        match parse(args).command {
            Command::Resolve(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_login() {
        let cli = parse(&["login", "-u", "ana", "-p", "secret"]);
        assert!(matches!(cli.command, Command::Login { ref username, .. } if username == "ana"));
    }

    #[test]
    fn test_parse_login_without_password() {
        let cli = parse(&["login", "-u", "ana"]);
        assert!(matches!(cli.command, Command::Login { password: None, .. }));
    }

    #[test]
    fn test_password_flag_wins() {
        let password =
            resolve_password(Some("flag"), Some("env".into()), io::Cursor::new("stdin\n")).unwrap();
        assert_eq!(password, "flag");
    }

    #[test]
    fn test_password_from_env() {
        let password = resolve_password(None, Some("env".into()), io::Cursor::new("stdin\n")).unwrap();
        assert_eq!(password, "env");
    }

    #[test]
    fn test_password_from_stdin() {
        let password = resolve_password(None, None, io::Cursor::new("s3cret pass\r\nnext\n")).unwrap();
        assert_eq!(password, "s3cret pass");

        let password = resolve_password(None, Some(String::new()), io::Cursor::new("piped")).unwrap();
        assert_eq!(password, "piped");
    }

    #[test]
    fn test_password_missing_everywhere() {
        let result = resolve_password(None, None, io::Cursor::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_flag_selection() {
        assert_eq!(
            resolve_args(&["resolve", "--project", "p"]).resolution(),
            Resolution::Project
        );
        assert_eq!(
            resolve_args(&["resolve", "--project", "p", "--task", "8"]).resolution(),
            Resolution::Task(8)
        );
        assert_eq!(
            resolve_args(&["resolve", "--project", "p", "--task", "8", "--us", "12"]).resolution(),
            Resolution::Multiple { task: 8, us: 12 }
        );
        assert_eq!(
            resolve_args(&["resolve", "--project", "p", "--wikipage", "home"]).resolution(),
            Resolution::WikiPage("home")
        );
        assert_eq!(
            resolve_args(&["resolve", "--project", "p", "--ref", "42"]).resolution(),
            Resolution::Reference(42)
        );
    }

    #[test]
    fn test_resolve_rejects_conflicting_flags() {
        let result = Cli::try_parse_from(["taiga", "resolve", "--project", "p", "--issue", "1", "--ref", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["--verbose", "--api", "https://t.example/api/v1", "locales"]);
        assert!(cli.verbose);
        assert_eq!(cli.api.as_deref(), Some("https://t.example/api/v1"));
    }

    #[tokio::test]
    async fn test_resolve_runs_multiple() {
        let server = MockServer::start().await;
        respond(&server, 200, json!({"project": 1, "task": 80, "us": 120})).await;
        let taiga = Taiga::assemble(
            config(&server),
            Arc::new(MemoryTokenStore::new()),
            Duration::from_secs(5),
            None,
        )
        .unwrap();

        let args = resolve_args(&["resolve", "--project", "project-0", "--us", "12", "--task", "8"]);
        let result = args.run(&taiga).await.unwrap();
        assert_eq!(result.task, Some(80));
        expect_one(
            &server,
            "GET",
            "/api/v1/resolver?project=project-0&task=8&us=12",
        )
        .await;
    }
}
