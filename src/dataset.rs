use std::{
    fs::File,
    io::{BufRead, BufReader},
    iter::zip,
    path::Path,
};

use crate::{
    error::{Error, Result},
    hmm::{model::Model, trainer::Trainer},
};

/// One training sentence: a tag per word.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaggedSentence {
    pub tags: Vec<String>,
    pub words: Vec<String>,
}

impl TaggedSentence {
    /// Splits a tag line and a sentence line on whitespace.
    pub fn parse(tags: &str, words: &str) -> Self {
        Self {
            tags: tags.split_whitespace().map(str::to_string).collect(),
            words: words.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_aligned(&self) -> bool {
        self.tags.len() == self.words.len()
    }
}

/// Sentences read from a pair of line-aligned tag and sentence streams.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    seqs: Vec<TaggedSentence>,
}

impl Corpus {
    /// Reads line `i` of `tags` as the tags of line `i` of `sentences`.
    ///
    /// Pairs of blank lines are skipped. Differing line counts or a line pair
    /// with differing token counts are rejected. Warnings and errors number
    /// line pairs from 0, blank ones included.
    pub fn read<T: BufRead, S: BufRead>(tags: T, sentences: S) -> Result<Self> {
        let tags = tags.lines().collect::<std::io::Result<Vec<_>>>()?;
        let sentences = sentences.lines().collect::<std::io::Result<Vec<_>>>()?;
        if tags.len() != sentences.len() {
            return Err(Error::MisalignedCorpus {
                tags: tags.len(),
                words: sentences.len(),
            });
        }

        let mut this = Self::default();
        for (i, (t, s)) in zip(&tags, &sentences).enumerate() {
            let seq = TaggedSentence::parse(t, s);
            if seq.is_empty() {
                log::warn!("skip blank line pair #{i}");
                continue;
            }
            if !seq.is_aligned() {
                return Err(Error::MisalignedSentence {
                    sentence: i,
                    tags: seq.tags.len(),
                    words: seq.words.len(),
                });
            }
            this.seqs.push(seq);
        }
        log::info!("read {} sentences ({} items)", this.len(), this.total_items());
        Ok(this)
    }

    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(tags: P, sentences: Q) -> Result<Self> {
        log::info!("reading dataset from: {:?}, {:?}", tags.as_ref(), sentences.as_ref());
        let tags = BufReader::new(File::open(tags)?);
        let sentences = BufReader::new(File::open(sentences)?);
        Self::read(tags, sentences)
    }

    /// Collects sentences, dropping empty ones, and rejects the first one
    /// whose tags and words differ in number.
    pub fn from_sentences<I: IntoIterator<Item = TaggedSentence>>(iter: I) -> Result<Self> {
        let mut this = Self::default();
        for seq in iter {
            this.push(seq)?;
        }
        Ok(this)
    }

    /// Appends a sentence; an empty one is ignored. `sentence` in the error is
    /// the index the sentence would have had.
    pub fn push(&mut self, seq: TaggedSentence) -> Result<()> {
        if seq.is_empty() {
            return Ok(());
        }
        if !seq.is_aligned() {
            return Err(Error::MisalignedSentence {
                sentence: self.len(),
                tags: seq.tags.len(),
                words: seq.words.len(),
            });
        }
        self.seqs.push(seq);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedSentence> {
        self.seqs.iter()
    }

    pub fn train(&self) -> Result<Model> {
        let mut trainer = Trainer::new();
        for seq in &self.seqs {
            trainer.append(&seq.tags, &seq.words)?;
        }
        Ok(trainer.train())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TaggedSentence;
    type IntoIter = std::slice::Iter<'a, TaggedSentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.seqs.iter()
    }
}
