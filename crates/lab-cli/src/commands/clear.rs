use std::error::Error;

use clap::Args;
use lab_store::{clear, ClearSelection};

use crate::{print_json, Context, Target};

#[derive(Args, Debug)]
pub struct ClearArgs {
    #[command(flatten)]
    pub target: Target,
    /// Keep data artifacts.
    #[arg(long)]
    pub no_data: bool,
    /// Keep figure artifacts.
    #[arg(long)]
    pub no_figures: bool,
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: &ClearArgs) -> Result<(), Box<dyn Error>> {
    let selection = ClearSelection {
        data: !args.no_data,
        figures: !args.no_figures,
    };
    let report = clear(&ctx.root, &args.target.notebook(), selection, ctx.verbose)?;
    if args.json {
        return print_json(&report);
    }
    println!(
        "removed {} data and {} figure files for version {}",
        report.data_removed, report.figures_removed, args.target.version
    );
    Ok(())
}
