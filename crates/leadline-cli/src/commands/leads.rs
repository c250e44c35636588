use crate::commands::fields::LeadFieldArgs;
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{due_state_label, now_utc, parse_lead_id};
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use leadline_core::domain::{format_phone_number, priority_cmp, Lead, LeadDraft};
use leadline_core::dto::{LeadDetailDto, LeadListItemDto};
use leadline_core::filter::{matches_filter, parse_filter, FilterContext};
use leadline_core::format::format_currency;
use leadline_core::timezone::zone_label;
use leadline_store::repo::ADD_LEAD_DRAFT;
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddLeadArgs {
    /// Start from the saved add-lead draft and clear it on success
    #[arg(long)]
    pub from_draft: bool,
    #[command(flatten)]
    pub fields: LeadFieldArgs,
}

#[derive(Debug, Args)]
pub struct EditLeadArgs {
    pub id: String,
    /// Also resets the follow-up priority and notes
    #[arg(
        long,
        conflicts_with_all = ["followup_date", "followup_time", "priority", "followup_notes"]
    )]
    pub clear_followup: bool,
    #[command(flatten)]
    pub fields: LeadFieldArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub filter: Option<String>,
    #[arg(long, value_enum, default_value_t = LeadSort::Created)]
    pub sort: LeadSort,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub term: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LeadSort {
    Created,
    Business,
    Funding,
    Followup,
    Priority,
}

pub async fn add_lead(ctx: &Context<'_>, args: AddLeadArgs) -> Result<()> {
    let mut draft = if args.from_draft {
        ctx.leads
            .backend()
            .with_store(|store| store.drafts().load(ADD_LEAD_DRAFT))
            .await?
            .ok_or_else(|| not_found("no saved add-lead draft"))?
    } else {
        LeadDraft {
            client_timezone: ctx.config.default_timezone.clone(),
            ..LeadDraft::default()
        }
    };
    let now = now_utc();
    args.fields
        .apply(&mut draft, ctx.config.followups.default_time, now)?;

    let lead = ctx.leads.create(now, draft).await?;

    if args.from_draft {
        ctx.leads
            .backend()
            .with_store(|store| store.drafts().clear(ADD_LEAD_DRAFT))
            .await
            .with_context(|| "clear add-lead draft")?;
        debug!("add-lead draft cleared");
    }

    if ctx.json {
        print_json(&lead)?;
    } else {
        println!("created {} {}", lead.id, lead.business_name);
    }
    Ok(())
}

pub async fn edit_lead(ctx: &Context<'_>, args: EditLeadArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let mut lead = ctx
        .leads
        .get_by_id(id)
        .ok_or_else(|| not_found("lead not found"))?;

    let now = now_utc();
    let mut draft = lead.to_draft();
    let mut changed = args
        .fields
        .apply(&mut draft, ctx.config.followups.default_time, now)?;
    if args.clear_followup {
        draft.clear_followup();
        changed = true;
    }
    if !changed {
        return Err(invalid_input("no updates provided"));
    }

    lead.apply_draft(draft);
    let lead = ctx.leads.update(now, lead).await?;
    if ctx.json {
        print_json(&lead)?;
    } else {
        println!("updated {} {}", lead.id, lead.business_name);
    }
    Ok(())
}

pub fn show_lead(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let lead = ctx
        .leads
        .get_by_id(id)
        .ok_or_else(|| not_found("lead not found"))?;
    let detail = LeadDetailDto::from_lead(lead, now_utc(), ctx.config.followups.upcoming_days);

    if ctx.json {
        return print_json(&detail);
    }

    let lead = &detail.lead;
    println!("id: {}", lead.id);
    println!("business: {}", lead.business_name);
    println!("owner: {}", lead.owner_name);
    println!("phone: {}", format_phone_number(&lead.phone));
    if let Some(email) = lead.email.as_deref() {
        println!("email: {}", email);
    }
    if let Some(business_type) = lead.business_type.as_deref() {
        match lead.business_type_details.as_deref() {
            Some(details) => println!("type: {} ({})", business_type, details),
            None => println!("type: {}", business_type),
        }
    }
    println!("stage: {}", lead.stage);
    if let Some(score) = lead.credit_score {
        println!("credit_score: {}", score);
    }
    println!("funding: {}", format_currency(lead.funding_amount));
    println!("monthly_revenue: {}", format_currency(lead.monthly_revenue));
    if let Some(purpose) = lead.funding_purpose.as_deref() {
        println!("purpose: {}", purpose);
    }
    if let Some(payback) = lead.payback_time {
        println!("payback: {}", payback.label());
    }
    println!(
        "mca_history: {}{}",
        if lead.has_mca_history { "yes" } else { "no" },
        if lead.has_defaults { " (has defaults)" } else { "" }
    );
    if let Some(details) = lead.default_details.as_deref() {
        println!("default_details: {}", details);
    }

    let location = [lead.client_city.as_deref(), lead.client_state.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    if !location.is_empty() {
        println!("location: {}", location);
    }
    println!(
        "timezone: {} (now {})",
        zone_label(&lead.client_timezone),
        detail.local_time
    );

    if detail.followup.is_scheduled() {
        println!(
            "followup: {} {} ({}) [{}] {}",
            detail.followup.date,
            detail.followup.time,
            detail.followup.zone_clock,
            due_state_label(detail.due_state),
            lead.followup_priority
        );
        if let Some(notes) = lead.followup_notes.as_deref() {
            println!("followup_notes: {}", notes);
        }
    } else {
        println!("followup: {}", detail.followup.date);
    }

    if detail.positions.count == 0 {
        println!("positions: none");
    } else {
        println!(
            "positions: {} (original {}, balance {})",
            detail.positions.count,
            format_currency(detail.positions.total_original),
            format_currency(detail.positions.total_balance)
        );
        for position in lead.active_positions() {
            println!(
                "  {}  {} -> {}  {}",
                position.lender_name,
                format_currency(position.original_amount),
                format_currency(position.current_balance),
                position.payment_frequency
            );
        }
    }

    if !lead.internal_notes.is_empty() {
        println!("notes:");
        for line in lead.internal_notes.lines() {
            println!("  {}", line);
        }
    }
    Ok(())
}

pub fn list_leads(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let filter_text = args.filter.as_deref().unwrap_or_default();
    let filter = parse_filter(filter_text)?;
    let now = now_utc();
    let upcoming_days = ctx.config.followups.upcoming_days;
    let filter_ctx = FilterContext { now, upcoming_days };

    let mut leads: Vec<Lead> = ctx
        .leads
        .leads()
        .into_iter()
        .filter(|lead| matches_filter(&filter, lead, &filter_ctx))
        .collect();
    sort_leads(&mut leads, args.sort);

    print_lead_items(ctx, &leads, "no leads")
}

pub async fn search_leads(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    let leads = ctx.leads.search(&args.term).await?;
    print_lead_items(ctx, &leads, "no matching leads")
}

pub async fn delete_lead(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    ctx.leads.delete(id).await?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn sort_leads(leads: &mut [Lead], sort: LeadSort) {
    match sort {
        LeadSort::Created => {}
        LeadSort::Business => leads.sort_by_key(|lead| lead.business_name.to_lowercase()),
        LeadSort::Funding => leads.sort_by(|a, b| b.funding_amount.cmp(&a.funding_amount)),
        // Unscheduled leads go last.
        LeadSort::Followup => leads.sort_by_key(|lead| (lead.next_followup.is_none(), lead.next_followup)),
        LeadSort::Priority => {
            leads.sort_by(|a, b| priority_cmp(&a.followup_priority, &b.followup_priority))
        }
    }
}

fn print_lead_items(ctx: &Context<'_>, leads: &[Lead], empty: &str) -> Result<()> {
    let now = now_utc();
    let upcoming_days = ctx.config.followups.upcoming_days;
    let items: Vec<LeadListItemDto> = leads
        .iter()
        .map(|lead| LeadListItemDto::from_lead(lead, now, upcoming_days))
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("{}", empty);
        return Ok(());
    }

    for item in items {
        let followup = if item.followup.is_scheduled() {
            format!("{} {}", item.followup.date, item.followup.time)
        } else {
            "-".to_string()
        };
        println!(
            "{}  {}  {}  [{}]  {}  {}  [{}]",
            item.id,
            item.business_name,
            item.owner_name,
            item.stage,
            item.funding,
            followup,
            due_state_label(item.due_state)
        );
    }
    Ok(())
}
