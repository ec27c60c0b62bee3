use std::{iter::zip, time::Instant};

use super::{
    model::Model,
    table::{log_normalize, CountTable, Row},
};
use crate::{
    error::{Error, Result},
    quark::{Quark, StringTable, TextVectorizer},
};

/// Accumulates transition and emission counts sentence by sentence.
///
/// Counting and normalization are separate phases: [`Trainer::append`] only
/// adds counts, and [`Trainer::train`] consumes the trainer to produce an
/// immutable [`Model`].
#[derive(Debug, Default)]
pub struct Trainer {
    labels: Quark,
    words: Quark,
    /// First tag of each sentence.
    initial: Row,
    trans: CountTable,
    state: CountTable,
    num_sentences: usize,
    num_items: usize,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one sentence. Words are lower-cased before counting.
    ///
    /// The sentence is rejected as a whole, leaving the counts untouched, when
    /// the lengths differ.
    pub fn append<T: AsRef<str>, W: AsRef<str>>(&mut self, tags: &[T], words: &[W]) -> Result<()> {
        if tags.len() != words.len() {
            return Err(Error::MisalignedSentence {
                sentence: self.num_sentences,
                tags: tags.len(),
                words: words.len(),
            });
        }

        let mut prev = None;
        for (tag, word) in zip(tags, words) {
            let curr = self.labels.find_or_insert(tag.as_ref());
            let wid = self.words.find_or_insert(&word.as_ref().to_lowercase());
            match prev {
                None => *self.initial.entry(curr).or_insert(0.0) += 1.0,
                Some(prev) => self.trans.add(prev, curr),
            }
            self.state.add(curr, wid);
            prev = Some(curr);
        }
        self.num_sentences += 1;
        self.num_items += tags.len();
        Ok(())
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Number of distinct tags seen so far.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    pub fn train(self) -> Model {
        let begin = Instant::now();
        log::info!(
            "normalize (sentences: {}, items: {}, labels: {}, words: {}, transitions: {}, emissions: {})",
            self.num_sentences,
            self.num_items,
            self.num_labels(),
            self.words.len(),
            self.initial.len() + self.trans.num_entries(),
            self.state.num_entries(),
        );
        let model = Model::new(
            self.labels,
            self.words,
            log_normalize(self.initial),
            self.trans.normalize(),
            self.state.normalize(),
        );
        log::info!("time cost: {:?}", begin.elapsed());
        model
    }
}

/// Trains a model from parallel tag and word sequences.
pub fn train<T: AsRef<str>, W: AsRef<str>>(tags: &[Vec<T>], words: &[Vec<W>]) -> Result<Model> {
    if tags.len() != words.len() {
        return Err(Error::MisalignedCorpus {
            tags: tags.len(),
            words: words.len(),
        });
    }
    let mut trainer = Trainer::new();
    for (t, w) in zip(tags, words) {
        trainer.append(t, w)?;
    }
    Ok(trainer.train())
}
