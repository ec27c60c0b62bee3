use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

use clap::Parser;
use hmmtag::{console, Corpus, Model, TaggerOptions};

/// Assign part-of-speech tags with a trained model
///
/// With --tags and --sentences, tag the sentences and report the accuracy
/// against the tags. Otherwise read sentences from STDIN, one per line, until
/// "exit" or end of input.
#[derive(Debug, Parser)]
struct Argv {
    /// read a model from a file (MODEL)
    #[arg(short, long, required = true, value_name = "MODEL")]
    model: PathBuf,
    /// reference tags, line-aligned with --sentences
    #[arg(short, long, value_name = "FILE", requires = "sentences")]
    tags: Option<PathBuf>,
    /// sentences to tag and evaluate
    #[arg(short, long, value_name = "FILE", requires = "tags")]
    sentences: Option<PathBuf>,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
    #[command(flatten)]
    opts: TaggerOptions,
}

fn main() -> hmmtag::Result<()> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);
    let model = Model::from_path(&argv.model)?;
    let tagger = model.tagger(argv.opts);
    log::info!(
        "{} labels, {} words, unseen penalty {}",
        model.num_labels(),
        model.num_words(),
        tagger.options().unseen_penalty
    );

    let (Some(tags), Some(sentences)) = (&argv.tags, &argv.sentences) else {
        console::interact(&tagger, stdin().lock(), stdout().lock())?;
        return Ok(());
    };
    let corpus = Corpus::from_paths(tags, sentences)?;
    let out = (!argv.quiet).then(|| stdout().lock());
    let evaluation = console::tag_corpus(&tagger, &corpus, out)?;
    println!("{}", evaluation);
    Ok(())
}
