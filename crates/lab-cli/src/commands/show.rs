use std::error::Error;

use clap::Args;
use lab_store::{load_config, render_config};

use crate::{print_json, Context, Target};

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub target: Target,
    /// Emit the document as JSON instead of the indented listing.
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &Context, args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let doc = load_config(&ctx.root, &args.target.folder, &args.target.version)?;
    if args.json {
        return print_json(&doc);
    }
    print!("{}", render_config(doc.mapping()));
    Ok(())
}
