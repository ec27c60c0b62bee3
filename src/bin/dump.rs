use std::{io::stdout, path::PathBuf};

use clap::Parser;
use hmmtag::Model;

/// output the model stored in the file (MODEL) in a plain-text format
#[derive(Debug, Parser)]
struct Argv {
    #[arg(short, long, required = true, value_name = "MODEL")]
    model: PathBuf,
}

fn main() -> hmmtag::Result<()> {
    env_logger::init();
    let argv = Argv::parse();
    let model = Model::from_path(&argv.model)?;
    model.dump(stdout().lock())
}
