use crate::commands::print_json;
use crate::util::now_utc;
use anyhow::Result;
use clap::Args;
use leadline_core::timezone::{current_time_in_zone, parse_state_code, states_in_zone, zone_info, ZONES};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ZonesArgs {
    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
struct ZoneRow {
    id: &'static str,
    label: &'static str,
    abbreviation: &'static str,
    local_time: String,
    states: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct StateRow {
    code: &'static str,
    name: &'static str,
    zone: &'static str,
    zone_label: &'static str,
    local_time: String,
}

pub fn list_zones(json: bool, args: ZonesArgs) -> Result<()> {
    let now = now_utc();

    if let Some(code) = args.state {
        let state = parse_state_code(&code)?;
        let row = StateRow {
            code: state.code,
            name: state.name,
            zone: state.zone,
            zone_label: zone_info(state.zone).label,
            local_time: current_time_in_zone(state.zone, now),
        };
        if json {
            return print_json(&row);
        }
        println!(
            "{} ({}): {} - now {}",
            row.name, row.code, row.zone_label, row.local_time
        );
        return Ok(());
    }

    let rows: Vec<ZoneRow> = ZONES
        .iter()
        .map(|zone| ZoneRow {
            id: zone.id,
            label: zone.label,
            abbreviation: zone.abbreviation,
            local_time: current_time_in_zone(zone.id, now),
            states: states_in_zone(zone.id).map(|state| state.code).collect(),
        })
        .collect();

    if json {
        return print_json(&rows);
    }
    for row in rows {
        println!(
            "{}  {}  [{}]  {}  {}",
            row.id,
            row.label,
            row.abbreviation,
            row.local_time,
            row.states.join(" ")
        );
    }
    Ok(())
}
