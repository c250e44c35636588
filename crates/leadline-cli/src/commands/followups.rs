use crate::commands::{print_json, Context};
use crate::util::{due_state_label, now_utc};
use anyhow::Result;
use clap::{Args, ValueEnum};
use leadline_core::domain::priority_cmp;
use leadline_core::dto::FollowupItemDto;
use leadline_core::rules::DueState;

#[derive(Debug, Args)]
pub struct FollowupsArgs {
    #[arg(long, value_enum, default_value_t = FollowupView::Due)]
    pub view: FollowupView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FollowupView {
    /// At or before now in each lead's zone
    Due,
    /// Within the configured upcoming window
    Upcoming,
    All,
}

impl FollowupView {
    fn includes(self, state: DueState) -> bool {
        match self {
            FollowupView::Due => state == DueState::Overdue,
            FollowupView::Upcoming => state == DueState::Upcoming,
            FollowupView::All => state != DueState::Unscheduled,
        }
    }
}

pub fn list_followups(ctx: &Context<'_>, args: FollowupsArgs) -> Result<()> {
    let now = now_utc();
    let upcoming_days = ctx.config.followups.upcoming_days;

    let mut leads = ctx.leads.leads();
    leads.retain(|lead| lead.next_followup.is_some());
    leads.sort_by(|a, b| {
        a.next_followup
            .cmp(&b.next_followup)
            .then_with(|| priority_cmp(&a.followup_priority, &b.followup_priority))
    });

    let items: Vec<FollowupItemDto> = leads
        .iter()
        .filter_map(|lead| FollowupItemDto::from_lead(lead, now, upcoming_days))
        .filter(|item| args.view.includes(item.due_state))
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no follow-ups");
        return Ok(());
    }

    for item in items {
        let notes = item
            .notes
            .as_deref()
            .map(|notes| format!("  {}", notes))
            .unwrap_or_default();
        println!(
            "{} {} ({})  [{}]  {}  {}  {}  {}{}",
            item.followup.date,
            item.followup.time,
            item.followup.zone_clock,
            due_state_label(item.due_state),
            item.priority,
            item.business_name,
            item.phone,
            item.lead_id,
            notes
        );
    }
    Ok(())
}
