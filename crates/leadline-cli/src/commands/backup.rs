use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use leadline_store::error::StoreError;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    pub out: PathBuf,
}

pub async fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    let out = args.out;
    let result = ctx
        .leads
        .backend()
        .with_store(|store| store.backup_to(&out))
        .await;

    let report = match result {
        Ok(report) => report,
        Err(err @ StoreError::InvalidBackupPath(_)) => {
            return Err(err)
                .with_context(|| format!("backup path matches database: {}", out.display()));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("backup database to {}", out.display()));
        }
    };

    if ctx.json {
        return print_json(&report.to_json());
    }

    println!(
        "Backup written to {} ({} bytes)",
        report.path.display(),
        report.bytes
    );
    Ok(())
}
