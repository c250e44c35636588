use crate::commands::{print_json, Context};
use crate::util::now_utc;
use anyhow::Result;
use clap::Args;
use leadline_core::format::{format_currency, format_currency_abbreviated};
use leadline_core::stats::lead_statistics;

#[derive(Debug, Args)]
pub struct StatsArgs {}

pub fn show_stats(ctx: &Context<'_>, _args: StatsArgs) -> Result<()> {
    let leads = ctx.leads.leads();
    let stats = lead_statistics(&leads, now_utc(), ctx.config.followups.upcoming_days);

    if ctx.json {
        return print_json(&stats);
    }

    let funding = format_currency_abbreviated(stats.total_funding_requested);
    println!("total_leads: {}", stats.total_leads);
    println!("prospects: {}", stats.prospects);
    println!("in_pipeline: {}", stats.active_leads);
    println!("closed: {}", stats.closed_leads);
    println!(
        "funding_requested: {} ({})",
        funding.abbreviated,
        format_currency(stats.total_funding_requested)
    );
    match stats.avg_credit_score {
        Some(score) => println!("avg_credit_score: {}", score),
        None => println!("avg_credit_score: -"),
    }
    println!("followups_due: {}", stats.followups_due);
    println!("followups_upcoming: {}", stats.followups_upcoming);
    Ok(())
}
