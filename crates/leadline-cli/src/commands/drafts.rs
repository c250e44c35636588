use crate::commands::fields::LeadFieldArgs;
use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::now_utc;
use anyhow::Result;
use clap::Subcommand;
use leadline_core::domain::LeadDraft;
use leadline_store::repo::ADD_LEAD_DRAFT;

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Merge the given fields into the saved add-lead draft
    Save(LeadFieldArgs),
    Show,
    Clear,
}

pub async fn save_draft(ctx: &Context<'_>, args: LeadFieldArgs) -> Result<()> {
    let backend = ctx.leads.backend();
    let mut draft = backend
        .with_store(|store| store.drafts().load(ADD_LEAD_DRAFT))
        .await?
        .unwrap_or_else(|| LeadDraft {
            client_timezone: ctx.config.default_timezone.clone(),
            ..LeadDraft::default()
        });
    let now = now_utc();
    if !args.apply(&mut draft, ctx.config.followups.default_time, now)? {
        return Err(invalid_input("no draft fields provided"));
    }

    backend
        .with_store(|store| store.drafts().save(now, ADD_LEAD_DRAFT, &draft))
        .await?;
    if ctx.json {
        print_json(&draft)?;
    } else {
        println!("draft saved");
    }
    Ok(())
}

pub async fn show_draft(ctx: &Context<'_>) -> Result<()> {
    let draft = ctx
        .leads
        .backend()
        .with_store(|store| store.drafts().load(ADD_LEAD_DRAFT))
        .await?
        .ok_or_else(|| not_found("no saved add-lead draft"))?;
    if ctx.json {
        return print_json(&draft);
    }

    let text = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    println!("business: {}", text(&draft.business_name));
    println!("owner: {}", text(&draft.owner_name));
    println!("phone: {}", text(&draft.phone));
    println!("email: {}", text(draft.email.as_deref().unwrap_or_default()));
    println!("stage: {}", draft.stage);
    println!("timezone: {}", draft.client_timezone);
    if let Some(at) = draft.next_followup {
        println!("followup: {}", at);
    }
    println!("positions: {}", draft.current_positions.len());
    Ok(())
}

pub async fn clear_draft(ctx: &Context<'_>) -> Result<()> {
    let removed = ctx
        .leads
        .backend()
        .with_store(|store| store.drafts().clear(ADD_LEAD_DRAFT))
        .await?;
    if ctx.json {
        print_json(&serde_json::json!({ "cleared": removed }))?;
    } else if removed {
        println!("draft cleared");
    } else {
        println!("no draft to clear");
    }
    Ok(())
}
