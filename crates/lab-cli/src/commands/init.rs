use std::error::Error;

use clap::Args;
use lab_store::{initialize, initialize_with_template, InitOutcome};

use crate::{Context, Target};

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub target: Target,
    /// Also write a starter `config_<version>.yml` if none exists.
    #[arg(long)]
    pub template: bool,
}

pub fn run(ctx: &Context, args: &InitArgs) -> Result<(), Box<dyn Error>> {
    let outcome = if args.template {
        initialize_with_template(&ctx.root, &args.target.notebook(), ctx.verbose)?
    } else {
        initialize(&ctx.root, &args.target.folder, ctx.verbose)?
    };
    let folder = ctx.root.path().join(&args.target.folder);
    match outcome {
        InitOutcome::Created => println!("created {}", folder.display()),
        InitOutcome::AlreadyExists => println!("{} already exists", folder.display()),
    }
    Ok(())
}
