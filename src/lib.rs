//! Part-of-speech tagging with a first-order hidden Markov model.
//!
//! A [`Trainer`] counts tag bigrams and tag/word pairs over an aligned corpus
//! and normalizes them once into log-probability tables held by a [`Model`].
//! A [`Tagger`] borrows the model and decodes sentences with Viterbi.
//!
//! ```
//! use hmmtag::{Trainer, TaggerOptions};
//!
//! let mut trainer = Trainer::new();
//! trainer.append(&["D", "N", "V"], &["the", "dog", "runs"])?;
//! trainer.append(&["N", "V"], &["dog", "runs"])?;
//! let model = trainer.train();
//!
//! let tagger = model.tagger(TaggerOptions::default());
//! assert_eq!(tagger.tag(&["dog", "runs"])?, ["N", "V"]);
//! # Ok::<(), hmmtag::Error>(())
//! ```

pub mod console;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod quark;

pub use dataset::{Corpus, TaggedSentence};
pub use error::{Error, Result};
pub use evaluation::{Estimation, Evaluation};
pub use hmm::{
    model::Model,
    tagger::{Path, Tagger, TaggerOptions, UNSEEN_PENALTY},
    trainer::{train, Trainer},
};
