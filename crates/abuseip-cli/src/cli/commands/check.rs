//! `abuseip check` - Check the abuse status of IP addresses.

use std::io::Write;

use abuseip_core::CheckReport;
use anyhow::Result;
use serde_json::Value;
use tracing::warn;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output;

pub async fn execute(mut ctx: Context, args: CheckArgs) -> Result<()> {
    let outcomes = ctx
        .client
        .check()
        .many(&args.ips, Some(&args.days), args.verbose)
        .await;

    // A failed lookup renders as null; the reason only reaches the logs.
    let reports: Vec<CheckReport> = outcomes
        .into_iter()
        .zip(&args.ips)
        .map(|(outcome, ip)| match outcome {
            Ok(report) => report,
            Err(err) => {
                warn!(ip = %ip, error = %err, "check failed");
                Value::Null
            }
        })
        .collect();

    let rendered = output::render_reports(&reports)?;
    ctx.sink.write_all(rendered.as_bytes())?;

    Ok(())
}
