use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{
    table::{row_mass, ProbabilityTable, Row},
    tagger::{Tagger, TaggerOptions},
};
use crate::{
    error::{Error, Result},
    quark::{Quark, StringTable},
};

const MASS_TOLERANCE: f64 = 1e-6;

/// A trained first-order HMM.
///
/// `initial` holds the log-probability of each tag opening a sentence, so the
/// sentence boundary never takes up a tag id. `transitions` rows are indexed
/// by tag id, `emissions` rows by tag id and columns by word id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    labels: Quark,
    words: Quark,
    initial: Row,
    transitions: ProbabilityTable,
    emissions: ProbabilityTable,
}

impl Model {
    pub(crate) fn new(
        labels: Quark,
        words: Quark,
        initial: Row,
        transitions: ProbabilityTable,
        emissions: ProbabilityTable,
    ) -> Self {
        Self {
            labels,
            words,
            initial,
            transitions,
            emissions,
        }
    }

    pub fn tagger(&self, opts: TaggerOptions) -> Tagger<'_> {
        Tagger::new(self, opts)
    }

    pub fn labels(&self) -> &Quark {
        &self.labels
    }

    pub fn words(&self) -> &Quark {
        &self.words
    }

    /// Tags observed at the start of a sentence, ascending by id.
    pub fn initial(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.initial.iter().map(|(&dst, &p)| (dst, p))
    }

    pub fn transitions(&self) -> &ProbabilityTable {
        &self.transitions
    }

    pub fn emissions(&self) -> &ProbabilityTable {
        &self.emissions
    }

    /// Number of tags learned from the training data.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// `ln P(to | from)`, where `from == None` is the sentence start.
    pub fn transition(&self, from: Option<&str>, to: &str) -> Option<f64> {
        let src = match from {
            Some(s) => Some(self.labels.to_id(s)?),
            None => None,
        };
        self.transition_by_id(src, self.labels.to_id(to)?)
    }

    /// Same as [`Model::transition`] over tag ids.
    pub fn transition_by_id(&self, from: Option<usize>, to: usize) -> Option<f64> {
        match from {
            Some(src) => self.transitions.get(src, to),
            None => self.initial.get(&to).copied(),
        }
    }

    /// `ln P(word | tag)`; the word is lower-cased first.
    pub fn emission(&self, tag: &str, word: &str) -> Option<f64> {
        let wid = self.words.to_id(&word.to_lowercase())?;
        self.emissions.get(self.labels.to_id(tag)?, wid)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_memory(buffer: &[u8]) -> Result<Self> {
        let model: Self = serde_json::from_slice(buffer)?;
        model.validate()?;
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let model: Self = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write(&mut w)?;
        w.flush()?;
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks the invariants a trained model holds, for models read from
    /// outside.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(Error::InvalidModel(msg)) };
        if !self.labels.is_consistent() || !self.words.is_consistent() {
            return invalid("duplicate vocabulary entries".into());
        }
        let n = self.labels.len();
        if self.transitions.num_rows() > n || self.emissions.num_rows() > n {
            return invalid(format!("more table rows than the {n} labels"));
        }
        let max_initial = self.initial.keys().next_back().copied();
        if max_initial.max(self.transitions.max_destination()).map_or(false, |d| d >= n) {
            return invalid("transition to an unknown label".into());
        }
        if self.emissions.max_destination().map_or(false, |d| d >= self.words.len()) {
            return invalid("emission of an unknown word".into());
        }
        if self.initial.is_empty() {
            if self.emissions.sources().next().is_some() {
                return invalid("no tag starts a sentence".into());
            }
        } else {
            let mass = row_mass(&self.initial);
            if (mass - 1.0).abs() > MASS_TOLERANCE {
                return invalid(format!("initial row sums to {mass}"));
            }
        }
        for (name, table) in [("transition", &self.transitions), ("emission", &self.emissions)] {
            for src in table.sources() {
                let mass = table.mass(src);
                if (mass - 1.0).abs() > MASS_TOLERANCE {
                    return invalid(format!("{name} row #{src} sums to {mass}"));
                }
            }
        }
        Ok(())
    }

    /// Writes the model in a plain-text format.
    pub fn dump<W: Write>(&self, mut w: W) -> Result<()> {
        let label = |id: usize| self.labels.to_str(id).unwrap_or("?");
        let word = |id: usize| self.words.to_str(id).unwrap_or("?");

        writeln!(w, "LABELS = {{")?;
        for (id, s) in self.labels.iter() {
            writeln!(w, "    {id:5}: {s}")?;
        }
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "WORDS = {{")?;
        for (id, s) in self.words.iter() {
            writeln!(w, "    {id:5}: {s}")?;
        }
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "INITIAL = {{")?;
        for (dst, p) in self.initial() {
            writeln!(w, "    --> {}: {p:.6}", label(dst))?;
        }
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "TRANSITIONS = {{")?;
        for src in self.transitions.sources() {
            for (dst, p) in self.transitions.row(src) {
                writeln!(w, "    ({src}) {} --> {}: {p:.6}", label(src), label(dst))?;
            }
        }
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "EMISSIONS = {{")?;
        for src in self.emissions.sources() {
            for (dst, p) in self.emissions.row(src) {
                writeln!(w, "    ({src}) {} --> {}: {p:.6}", label(src), word(dst))?;
            }
        }
        writeln!(w, "}}")?;
        Ok(())
    }
}
