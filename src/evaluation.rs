use std::{collections::BTreeMap, fmt::Display};

/// Label-wise performance values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelMeasure {
    /// Number of correct predictions.
    pub num_correct: usize,
    /// Number of occurrences of the label in the gold-standard data.
    pub num_observation: usize,
    /// Number of predictions.
    pub num_prediction: usize,
}

impl LabelMeasure {
    pub fn precision(&self) -> f64 {
        if self.num_prediction == 0 {
            return 0.0;
        }
        self.num_correct as f64 / self.num_prediction as f64
    }

    pub fn recall(&self) -> f64 {
        if self.num_observation == 0 {
            return 0.0;
        }
        self.num_correct as f64 / self.num_observation as f64
    }

    pub fn fmeasure(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            p * r * 2.0 / (p + r)
        } else {
            0.0
        }
    }
}

/// Position-by-position comparison of gold and predicted tag sequences.
#[derive(Debug, Default, Clone)]
pub struct Evaluation {
    tbl: BTreeMap<String, LabelMeasure>,

    /// Number of correctly predicted items.
    item_total_correct: usize,
    /// Total number of items.
    item_total_num: usize,

    /// Number of sentences predicted without a single mistake.
    inst_total_correct: usize,
    /// Total number of sentences.
    inst_total_num: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    /// Macro-averaged over the labels present in the reference.
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub item_accuracy: f64,
    pub instance_accuracy: f64,
}

impl Evaluation {
    /// Adds one sentence. Reference positions missing from `prediction` count
    /// as mistakes.
    pub fn accumulate<R: AsRef<str>, P: AsRef<str>>(&mut self, reference: &[R], prediction: &[P]) {
        let mut matched = 0;
        for (i, r) in reference.iter().enumerate() {
            let r = r.as_ref();
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            if let Some(p) = prediction.get(i).map(AsRef::as_ref) {
                self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
                if r == p {
                    self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                    matched += 1;
                }
            }
        }
        self.item_total_correct += matched;
        self.item_total_num += reference.len();

        if matched == reference.len() && prediction.len() == reference.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    pub fn label(&self, label: &str) -> Option<&LabelMeasure> {
        self.tbl.get(label)
    }

    /// Number of reference labels seen.
    pub fn num_labels(&self) -> usize {
        self.tbl.values().filter(|lev| lev.num_observation > 0).count()
    }

    pub fn correct(&self) -> usize {
        self.item_total_correct
    }

    pub fn incorrect(&self) -> usize {
        self.item_total_num - self.item_total_correct
    }

    pub fn num_sentences(&self) -> usize {
        self.inst_total_num
    }

    pub fn evaluate(&self) -> Estimation {
        let mut est = Estimation {
            precision: 0.0,
            recall: 0.0,
            fmeasure: 0.0,
            item_accuracy: 0.0,
            instance_accuracy: 0.0,
        };
        for lev in self.tbl.values().filter(|lev| lev.num_observation > 0) {
            est.precision += lev.precision();
            est.recall += lev.recall();
            est.fmeasure += lev.fmeasure();
        }
        let n = self.num_labels();
        if n > 0 {
            est.precision /= n as f64;
            est.recall /= n as f64;
            est.fmeasure /= n as f64;
        }
        if self.item_total_num > 0 {
            est.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        }
        if self.inst_total_num > 0 {
            est.instance_accuracy = self.inst_total_correct as f64 / self.inst_total_num as f64;
        }
        est
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by label (#match, #model, #ref) (precision, recall, F1):")?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label,
                    lev.num_correct,
                    lev.num_prediction,
                    lev.num_observation,
                    lev.precision(),
                    lev.recall(),
                    lev.fmeasure()
                )?;
            }
        }
        let est = self.evaluate();
        writeln!(f, "Macro-average precision, recall, F1: ({:.6}, {:.6}, {:.6})", est.precision, est.recall, est.fmeasure)?;
        writeln!(f, "Item accuracy: {} / {} ({:.4})", self.item_total_correct, self.item_total_num, est.item_accuracy)?;
        writeln!(f, "Instance accuracy: {} / {} ({:.4})", self.inst_total_correct, self.inst_total_num, est.instance_accuracy)?;
        write!(f, "{} tags right and {} tags wrong", self.correct(), self.incorrect())
    }
}
