use anyhow::Result;
use leadline_config::AppConfig;
use leadline_store::{LeadStore, SqliteBackend};
use serde::Serialize;
use std::io::{self, Write};

pub mod backup;
pub mod completions;
pub mod drafts;
pub mod fields;
pub mod followups;
pub mod leads;
pub mod stats;
pub mod workflow;
pub mod zones;

pub struct Context<'a> {
    pub leads: &'a LeadStore<SqliteBackend>,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
