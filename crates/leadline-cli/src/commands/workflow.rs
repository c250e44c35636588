use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{now_utc, parse_lead_id};
use anyhow::Result;
use clap::Args;
use leadline_core::domain::{FollowupKind, FollowupPriority, FollowupSchedule, Lead, Stage};
use leadline_core::dto::followup_display;
use leadline_core::followup::compose_with_default;
use std::str::FromStr;

#[derive(Debug, Args)]
pub struct StageArgs {
    pub id: String,
    /// Stage label or slug, e.g. `email-sent`
    pub stage: String,
}

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    pub id: String,
    /// YYYY-MM-DD in the lead's zone
    #[arg(long)]
    pub date: String,
    /// HH:MM, 24-hour; defaults to the configured follow-up time
    #[arg(long)]
    pub time: Option<String>,
    /// call, email, meeting or check-in
    #[arg(long = "type", default_value = "call")]
    pub kind: String,
    #[arg(long, default_value = "medium")]
    pub priority: String,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct MarkPriorityArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct NoteArgs {
    pub id: String,
    pub text: String,
}

pub async fn change_stage(ctx: &Context<'_>, args: StageArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let stage = Stage::from_str(&args.stage)?;
    let now = now_utc();
    let lead = ctx
        .leads
        .modify(now, id, |lead| {
            lead.change_stage(stage, now);
            Ok(())
        })
        .await?;
    report(ctx, &lead, &format!("moved {} to {}", lead.id, lead.stage))
}

pub async fn schedule_followup(ctx: &Context<'_>, args: ScheduleArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let at = compose_with_default(
        &args.date,
        args.time.as_deref(),
        ctx.config.followups.default_time,
    )?
    .ok_or_else(|| invalid_input("follow-up date cannot be empty"))?;
    let schedule = FollowupSchedule {
        at,
        kind: FollowupKind::from_str(&args.kind)?,
        priority: FollowupPriority::from_str(&args.priority)?,
        notes: args.notes,
    };

    let now = now_utc();
    let lead = ctx
        .leads
        .modify(now, id, |lead| lead.schedule_followup(schedule, now))
        .await?;

    let display = followup_display(&lead);
    let message = format!(
        "scheduled {} for {} {} ({})",
        lead.id, display.date, display.time, display.zone_clock
    );
    report(ctx, &lead, &message)
}

pub async fn complete_followup(ctx: &Context<'_>, args: CompleteArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let existing = ctx
        .leads
        .get_by_id(id)
        .ok_or_else(|| not_found("lead not found"))?;
    if existing.next_followup.is_none() {
        return Err(invalid_input("lead has no follow-up scheduled"));
    }

    let now = now_utc();
    let lead = ctx
        .leads
        .modify(now, id, |lead| {
            lead.complete_followup(now);
            Ok(())
        })
        .await?;
    report(ctx, &lead, &format!("completed follow-up for {}", lead.id))
}

pub async fn mark_priority(ctx: &Context<'_>, args: MarkPriorityArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let now = now_utc();
    let lead = ctx
        .leads
        .modify(now, id, |lead| {
            lead.mark_high_priority(now);
            Ok(())
        })
        .await?;
    report(ctx, &lead, &format!("marked {} as high priority", lead.id))
}

pub async fn add_note(ctx: &Context<'_>, args: NoteArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let text = args.text.trim().to_string();
    if text.is_empty() {
        return Err(invalid_input("note cannot be empty"));
    }
    let now = now_utc();
    let lead = ctx
        .leads
        .modify(now, id, |lead| {
            lead.add_note(&text, now);
            Ok(())
        })
        .await?;
    report(ctx, &lead, &format!("noted on {}", lead.id))
}

fn report(ctx: &Context<'_>, lead: &Lead, message: &str) -> Result<()> {
    if ctx.json {
        return print_json(lead);
    }
    println!("{}", message);
    Ok(())
}
