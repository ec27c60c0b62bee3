use std::{
    collections::{btree_map::Entry, BTreeMap},
    io,
};

use serde::{Deserialize, Serialize};

use super::model::Model;
use crate::{
    console,
    dataset::Corpus,
    error::{Error, Result},
    evaluation::Evaluation,
    quark::StringTable,
};

/// Default log-score charged when a tag never emitted the word in training.
pub const UNSEEN_PENALTY: f64 = -100.0;

#[derive(Debug, Clone, Copy, PartialEq, clap::Args, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerOptions {
    /// log-score of a word never seen with the tag during training
    #[arg(long, default_value_t = UNSEEN_PENALTY, allow_hyphen_values = true)]
    pub unseen_penalty: f64,
}

impl Default for TaggerOptions {
    fn default() -> Self {
        Self {
            unseen_penalty: UNSEEN_PENALTY,
        }
    }
}

/// Best way of reaching a tag at one position. `prev` is `None` at the
/// first word.
#[derive(Debug, Clone, Copy)]
struct Cell {
    score: f64,
    prev: Option<usize>,
}

/// Reachable tags at one position, ascending by tag id.
type Frontier = BTreeMap<usize, Cell>;

/// Keeps the candidate only when it beats the current best for `dst`.
fn relax(frontier: &mut Frontier, dst: usize, cell: Cell) {
    match frontier.entry(dst) {
        Entry::Vacant(e) => {
            e.insert(cell);
        }
        Entry::Occupied(mut e) => {
            if cell.score > e.get().score {
                e.insert(cell);
            }
        }
    }
}

/// The best tag sequence for a sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Tag ids, one per word.
    pub labels: Vec<usize>,
    /// Cumulative log-score of the path.
    pub score: f64,
}

/// Viterbi decoder over a borrowed [`Model`].
///
/// Ties are broken in favour of the lower tag id, i.e. the tag seen first in
/// the training data: candidates are visited in ascending id and only a
/// strictly better score replaces the current one.
#[derive(Debug, Clone, Copy)]
pub struct Tagger<'a> {
    model: &'a Model,
    opts: TaggerOptions,
}

impl<'a> Tagger<'a> {
    pub fn new(model: &'a Model, opts: TaggerOptions) -> Self {
        Self { model, opts }
    }

    pub fn options(&self) -> &TaggerOptions {
        &self.opts
    }

    /// Tags a whitespace-separated sentence.
    pub fn tag_sentence(&self, sentence: &str) -> Result<Vec<&'a str>> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        self.tag(&words)
    }

    pub fn tag<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<&'a str>> {
        let model: &'a Model = self.model;
        let labels = model.labels();
        self.viterbi(words)?
            .labels
            .into_iter()
            .map(|id| labels.to_str(id).ok_or_else(|| Error::InvalidModel(format!("unknown label #{id}"))))
            .collect()
    }

    pub fn viterbi<S: AsRef<str>>(&self, words: &[S]) -> Result<Path> {
        let model = self.model;
        let mut trellis: Vec<Frontier> = Vec::with_capacity(words.len());

        for (t, word) in words.iter().enumerate() {
            let wid = model.words().to_id(&word.as_ref().to_lowercase());
            let emit = |dst: usize| {
                wid.and_then(|w| model.emissions().get(dst, w))
                    .unwrap_or(self.opts.unseen_penalty)
            };
            let mut next = Frontier::new();
            match trellis.last() {
                None => {
                    for (dst, trans) in model.initial() {
                        let score = trans + emit(dst);
                        relax(&mut next, dst, Cell { score, prev: None });
                    }
                }
                Some(frontier) => {
                    for (&curr, cell) in frontier {
                        for (dst, trans) in model.transitions().row(curr) {
                            let score = cell.score + trans + emit(dst);
                            relax(&mut next, dst, Cell { score, prev: Some(curr) });
                        }
                    }
                }
            }
            if next.is_empty() {
                log::debug!("dead end at #{t} ({:?})", word.as_ref());
                return Err(Error::DeadEnd { position: t });
            }
            trellis.push(next);
        }

        let Some(last) = trellis.last() else {
            return Ok(Path {
                labels: Vec::new(),
                score: 0.0,
            });
        };
        let mut best: Option<(usize, f64)> = None;
        for (&tag, cell) in last {
            if best.map_or(true, |(_, score)| cell.score > score) {
                best = Some((tag, cell.score));
            }
        }
        let (tag, score) = best.ok_or(Error::DeadEnd {
            position: trellis.len() - 1,
        })?;

        let mut labels = Vec::with_capacity(trellis.len());
        let mut tag = Some(tag);
        for frontier in trellis.iter().rev() {
            let Some(id) = tag else { break };
            labels.push(id);
            tag = frontier[&id].prev;
        }
        labels.reverse();
        Ok(Path { labels, score })
    }

    /// Log-score of tagging `words` with `labels`, or `None` when the path
    /// uses an unknown tag or a transition never seen in training.
    pub fn score<S: AsRef<str>, L: AsRef<str>>(&self, words: &[S], labels: &[L]) -> Option<f64> {
        if words.len() != labels.len() {
            return None;
        }
        let model = self.model;
        let mut prev = None;
        let mut r = 0.0;
        for (word, label) in words.iter().zip(labels) {
            let curr = model.labels().to_id(label.as_ref())?;
            r += model.transition_by_id(prev, curr)?;
            r += model
                .words()
                .to_id(&word.as_ref().to_lowercase())
                .and_then(|w| model.emissions().get(curr, w))
                .unwrap_or(self.opts.unseen_penalty);
            prev = Some(curr);
        }
        Some(r)
    }

    /// Tags every sentence of `corpus` and compares against its tags.
    ///
    /// A sentence that cannot be decoded counts as entirely wrong.
    pub fn evaluate(&self, corpus: &Corpus) -> Result<Evaluation> {
        console::tag_corpus::<io::Sink>(self, corpus, None)
    }
}
