use std::path::PathBuf;

use clap::Parser;
use hmmtag::Corpus;

/// Train a part-of-speech model from a tag file and a line-aligned sentence file
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    /// one line of whitespace-separated tags per sentence
    #[arg(short, long, value_name = "FILE")]
    tags: PathBuf,
    /// one line of whitespace-separated words per sentence
    #[arg(short, long, value_name = "FILE")]
    sentences: PathBuf,
    /// write the trained model to MODEL
    #[arg(short, long, value_name = "MODEL")]
    model: PathBuf,
}

fn main() -> hmmtag::Result<()> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("argv: {:?}", argv);
    let corpus = Corpus::from_paths(&argv.tags, &argv.sentences)?;
    let model = corpus.train()?;
    model.save(&argv.model)?;
    log::info!("write model to {:?}", argv.model);
    Ok(())
}
