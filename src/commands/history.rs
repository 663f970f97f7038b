use clap::Args;

use crate::error::Result;

use super::context::AppContext;
use super::display;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of check-ins to show (defaults to the configured history_limit)
    #[arg(short = 'n', long,
          value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: HistoryArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.history_limit);
    let recent = ctx.service.store().recent(limit);
    println!("{}", display::render_history(&recent));
    Ok(())
}
