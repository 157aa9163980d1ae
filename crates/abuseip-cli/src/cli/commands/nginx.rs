//! `abuseip nginx` - Render the blacklist as nginx deny directives.

use std::io::Write;

use anyhow::Result;

use super::Context;
use crate::cli::args::NginxArgs;
use crate::output;

pub async fn execute(mut ctx: Context, args: NginxArgs) -> Result<()> {
    let raw = ctx
        .client
        .blacklist()
        .fetch()
        .confidence_minimum(args.min)
        .plaintext()
        .await?;

    for directive in output::deny_directives(&raw) {
        writeln!(ctx.sink, "{directive}")?;
    }

    Ok(())
}
