use std::error::Error;

use clap::{Args, ValueEnum};
use lab_store::{list_artifacts, ArtifactKind};
use serde::Serialize;

use crate::{print_json, Context, Target};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Data,
    Figures,
    All,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub target: Target,
    /// Which artifact directory to list.
    #[arg(long, value_enum, default_value_t = KindArg::All)]
    pub kind: KindArg,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Listing {
    kind: ArtifactKind,
    files: Vec<String>,
}

pub fn run(ctx: &Context, args: &LsArgs) -> Result<(), Box<dyn Error>> {
    let kinds: &[ArtifactKind] = match args.kind {
        KindArg::Data => &[ArtifactKind::Data],
        KindArg::Figures => &[ArtifactKind::Figure],
        KindArg::All => &[ArtifactKind::Data, ArtifactKind::Figure],
    };
    let notebook = args.target.notebook();
    let mut listings = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let files = list_artifacts(&ctx.root, &notebook, kind)?
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        listings.push(Listing { kind, files });
    }
    if args.json {
        return print_json(&listings);
    }
    for listing in &listings {
        for file in &listing.files {
            println!("{}/{}", listing.kind, file);
        }
    }
    Ok(())
}
