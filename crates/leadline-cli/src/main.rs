mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    backup, completions, drafts, followups, leads, stats, workflow, zones, Context,
};
use crate::error::{exit_code_for, report_error};
use leadline_config as config;
use leadline_store::{paths, LeadStore, SqliteBackend, Store};

#[derive(Debug, Parser)]
#[command(name = "leadline", version, about = "leadline CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(name = "add-lead")]
    AddLead(leads::AddLeadArgs),
    #[command(name = "edit-lead")]
    EditLead(leads::EditLeadArgs),
    Show(leads::ShowArgs),
    List(leads::ListArgs),
    Search(leads::SearchArgs),
    Delete(leads::DeleteArgs),
    /// Move a lead to another pipeline stage
    Stage(workflow::StageArgs),
    Schedule(workflow::ScheduleArgs),
    #[command(name = "complete-followup")]
    CompleteFollowup(workflow::CompleteArgs),
    #[command(name = "mark-priority")]
    MarkPriority(workflow::MarkPriorityArgs),
    /// Append a paragraph to a lead's notes
    Note(workflow::NoteArgs),
    Followups(followups::FollowupsArgs),
    Stats(stats::StatsArgs),
    /// List supported zones, or the zone for a state
    Zones(zones::ZonesArgs),
    #[command(subcommand)]
    Draft(drafts::DraftCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Zones(args) => zones::list_zones(json, args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
            debug!(path = %db_path.display(), "database path resolved");

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .with_context(|| "start runtime")?;
            runtime.block_on(dispatch(store, json, &app_config, command))
        }
    }
}

async fn dispatch(
    store: Store,
    json: bool,
    app_config: &config::AppConfig,
    command: Command,
) -> Result<()> {
    let lead_store = LeadStore::new(SqliteBackend::new(store));
    lead_store.load_all().await.with_context(|| "load leads")?;

    let ctx = Context {
        leads: &lead_store,
        json,
        config: app_config,
    };

    match command {
        Command::Backup(args) => backup::backup(&ctx, args).await,
        Command::AddLead(args) => leads::add_lead(&ctx, args).await,
        Command::EditLead(args) => leads::edit_lead(&ctx, args).await,
        Command::Show(args) => leads::show_lead(&ctx, args),
        Command::List(args) => leads::list_leads(&ctx, args),
        Command::Search(args) => leads::search_leads(&ctx, args).await,
        Command::Delete(args) => leads::delete_lead(&ctx, args).await,
        Command::Stage(args) => workflow::change_stage(&ctx, args).await,
        Command::Schedule(args) => workflow::schedule_followup(&ctx, args).await,
        Command::CompleteFollowup(args) => workflow::complete_followup(&ctx, args).await,
        Command::MarkPriority(args) => workflow::mark_priority(&ctx, args).await,
        Command::Note(args) => workflow::add_note(&ctx, args).await,
        Command::Followups(args) => followups::list_followups(&ctx, args),
        Command::Stats(args) => stats::show_stats(&ctx, args),
        Command::Draft(cmd) => match cmd {
            drafts::DraftCommand::Save(args) => drafts::save_draft(&ctx, args).await,
            drafts::DraftCommand::Show => drafts::show_draft(&ctx).await,
            drafts::DraftCommand::Clear => drafts::clear_draft(&ctx).await,
        },
        Command::Completions(_) | Command::Zones(_) => {
            unreachable!("command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
