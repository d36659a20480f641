//! Waypoint - CI/CD branch policy and deployment resolution
//!
//! Usage:
//!   waypoint check-pr ...   # Reject illegal pull requests
//!   waypoint plan ...       # Resolve environment, deployments and tags
//!   waypoint tags ...       # Generate image tags
//!   waypoint reset ...      # Select deployments for a reset
//!   waypoint set-tag ...    # Converge a live deployment to a tag
//!   waypoint notify ...     # Build a failure notification payload

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waypoint_core::cluster::{KubectlClient, reconcile_tag};
use waypoint_core::config::load_config;
use waypoint_core::deploy::{DispatchInput, select_for_reset};
use waypoint_core::event::{PipelineEvent, WORKFLOW_DISPATCH, read_dispatch_input, require};
use waypoint_core::notify::PipelineReport;
use waypoint_core::plan::resolve_plan;
use waypoint_core::policy::validate_pr;
use waypoint_core::tags::generate_tags;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "CI/CD branch policy and deployment resolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pull request's head and base branches
    CheckPr {
        #[arg(long)]
        head_ref: String,
        #[arg(long)]
        base_ref: String,
        #[arg(long)]
        repo_name: String,
    },

    /// Resolve the deployment plan for a push or dispatch event
    Plan(Box<PlanArgs>),

    /// Generate image tags for a build
    Tags {
        #[arg(long)]
        head_ref: String,
        #[arg(long)]
        base_ref: String,
        #[arg(long)]
        sha: String,
    },

    /// Select deployments for a manual reset
    ///
    /// INPUT_ENV is one of "All", "All stage", "All dev" or a namespace.
    Reset {
        #[arg(long)]
        input_env: String,
        /// Path to the environment config (JSON)
        #[arg(long)]
        config: PathBuf,
    },

    /// Converge a cluster deployment's container images to a tag
    SetTag {
        #[arg(long)]
        namespace: String,
        /// Deployment name
        #[arg(long, alias = "repo-name")]
        deployment: String,
        /// Desired image tag
        #[arg(long)]
        env_tag: String,
        /// kubectl executable
        #[arg(long, default_value = "kubectl")]
        kubectl: PathBuf,
    },

    /// Build the chat notification payload for a failed run
    Notify(NotifyArgs),
}

#[derive(Args)]
struct PlanArgs {
    #[arg(long)]
    repo_name: String,
    #[arg(long)]
    base_ref: String,
    #[arg(long)]
    head_ref: String,
    #[arg(long)]
    sha: String,
    /// Path to the environment config (JSON)
    #[arg(long)]
    config: PathBuf,
    /// Triggering event name (e.g. push, workflow_dispatch)
    #[arg(long, default_value = "")]
    event_name: String,
    /// Path to the triggering event payload
    #[arg(long)]
    event_path: Option<PathBuf>,
    /// Dispatch target <env>-<project>, overrides the event payload
    #[arg(long)]
    dispatch_input: Option<String>,
}

#[derive(Args)]
struct NotifyArgs {
    #[arg(long)]
    repo: String,
    #[arg(long)]
    actor: String,
    #[arg(long)]
    branch: String,
    #[arg(long)]
    environment: String,
    #[arg(long)]
    workflow_url: String,
    #[arg(long)]
    validate_status: String,
    #[arg(long)]
    build_status: String,
    #[arg(long)]
    deploy_status: String,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for pipeline outputs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waypoint=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run_cli(cli.command)
}

fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::CheckPr {
            head_ref,
            base_ref,
            repo_name,
        } => run_check_pr(&head_ref, &base_ref, &repo_name),
        Commands::Plan(args) => run_plan(*args),
        Commands::Tags {
            head_ref,
            base_ref,
            sha,
        } => run_tags(&head_ref, &base_ref, &sha),
        Commands::Reset { input_env, config } => run_reset(&input_env, &config),
        Commands::SetTag {
            namespace,
            deployment,
            env_tag,
            kubectl,
        } => run_set_tag(&namespace, &deployment, &env_tag, kubectl),
        Commands::Notify(args) => run_notify(args),
    }
}

fn run_check_pr(head_ref: &str, base_ref: &str, repo_name: &str) -> Result<()> {
    require("head_ref", head_ref)?;
    require("repo_name", repo_name)?;

    validate_pr(&head_ref.into(), &base_ref.into(), repo_name).into_result()?;
    Ok(())
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let dispatch = match (&args.dispatch_input, &args.event_path) {
        (Some(input), _) => Some(DispatchInput::parse(input)?),
        (None, Some(path)) => read_dispatch_input(&args.event_name, path)
            .with_context(|| format!("Failed to read dispatch target from {}", path.display()))?,
        (None, None) => {
            if args.event_name == WORKFLOW_DISPATCH {
                warn!(
                    "{} event given without --event-path or --dispatch-input, planning without a dispatch target",
                    WORKFLOW_DISPATCH
                );
            }
            None
        }
    };

    let event = PipelineEvent::new(&args.repo_name, &args.head_ref, &args.base_ref, &args.sha)?
        .with_dispatch(dispatch);
    let plan = resolve_plan(&event, &config)?;

    for line in plan.to_output_lines()? {
        println!("{line}");
    }
    Ok(())
}

fn run_tags(head_ref: &str, base_ref: &str, sha: &str) -> Result<()> {
    let pair = generate_tags(&head_ref.into(), &base_ref.into(), sha)?;
    println!("tag_suffix={}", pair.suffix);
    println!("tag_sha={}", pair.sha_tag);
    Ok(())
}

fn run_reset(input_env: &str, config_path: &std::path::Path) -> Result<()> {
    let config = load_config(config_path)?;
    let deployments = select_for_reset(&config, input_env);
    println!("{}", serde_json::to_string(&deployments)?);
    Ok(())
}

fn run_set_tag(namespace: &str, deployment: &str, env_tag: &str, kubectl: PathBuf) -> Result<()> {
    let client = KubectlClient::new(kubectl);
    let report = reconcile_tag(&client, namespace, deployment, env_tag)
        .with_context(|| format!("Failed to set tag on {namespace}/{deployment}"))?;
    println!("{}", report.to_json()?);
    Ok(())
}

fn run_notify(args: NotifyArgs) -> Result<()> {
    let report = PipelineReport {
        repo: args.repo,
        actor: args.actor,
        branch: args.branch,
        environment: args.environment,
        workflow_url: args.workflow_url,
        validate_status: args.validate_status,
        build_status: args.build_status,
        deploy_status: args.deploy_status,
    };
    println!("{}", serde_json::to_string(&report.to_payload())?);
    Ok(())
}
