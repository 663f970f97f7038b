use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::checkin::{CheckinForm, Mood, TraitSet, SLIDER_DEFAULT};
use crate::error::Result;
use crate::report::{write_report, ReportData};

use super::context::AppContext;
use super::display;

#[derive(Debug, Args)]
pub struct CheckinArgs {
    /// drained, neutral, steady, energized or focused
    #[arg(short, long)]
    pub mood: Mood,

    /// Anything to remember about today (context, wins, stressors)
    #[arg(long, default_value = "")]
    pub notes: String,

    /// D: drive, push
    #[arg(short = 'd', long, default_value_t = SLIDER_DEFAULT,
          value_parser = clap::value_parser!(u32).range(0..=100))]
    pub dominance: u32,

    /// I: energy, expression
    #[arg(short = 'i', long, default_value_t = SLIDER_DEFAULT,
          value_parser = clap::value_parser!(u32).range(0..=100))]
    pub influence: u32,

    /// S: support, patience
    #[arg(short = 's', long, default_value_t = SLIDER_DEFAULT,
          value_parser = clap::value_parser!(u32).range(0..=100))]
    pub steadiness: u32,

    /// C: detail, structure
    #[arg(short = 'c', long, default_value_t = SLIDER_DEFAULT,
          value_parser = clap::value_parser!(u32).range(0..=100))]
    pub conscientiousness: u32,

    /// Stage that feels most like you today: 3-7, a full label, or skip
    #[arg(long, default_value = "skip")]
    pub stage: String,

    /// Where to write the PDF report (defaults to the configured report_file)
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<PathBuf>,

    /// Skip writing the PDF report
    #[arg(long, conflicts_with = "pdf")]
    pub no_pdf: bool,
}

impl CheckinArgs {
    /// Validate the raw arguments into a form.
    pub fn to_form(&self, ctx: &AppContext) -> Result<CheckinForm> {
        let traits = TraitSet::from_sliders(
            self.dominance,
            self.influence,
            self.steadiness,
            self.conscientiousness,
            ctx.config.slider_step,
        )?;
        let perceived_stage = ctx.service.stages().table().resolve_perceived(&self.stage)?;

        Ok(CheckinForm {
            mood: self.mood,
            notes: self.notes.clone(),
            traits,
            perceived_stage,
        })
    }
}

/// Score, persist, report, then show the recent history.
pub fn run(ctx: &AppContext, args: CheckinArgs) -> Result<()> {
    let form = args.to_form(ctx)?;
    let outcome = ctx.service.submit(form)?;

    println!("{}", display::render_outcome(&outcome));

    if !args.no_pdf {
        let path = args.pdf.clone().unwrap_or_else(|| ctx.config.report_file.clone());
        write_report(&ReportData::from_outcome(&outcome), &path)?;
        info!("Report saved to {:?}", path);
        println!("Report saved to {}\n", path.display());
    }

    let recent = ctx.service.store().recent(ctx.config.history_limit);
    println!("{}", display::render_history(&recent));
    Ok(())
}
