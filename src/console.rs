//! Line-oriented front-end of `hmm-tag`.
//!
//! Both modes print one `word/TAG` line per sentence. A sentence the model
//! cannot tag is reported on its own line and the run goes on.

use std::{
    io::{BufRead, Write},
    iter::zip,
};

use crate::{
    dataset::Corpus,
    error::{Error, Result},
    evaluation::Evaluation,
    hmm::tagger::Tagger,
};

/// Input line that ends an interactive session.
pub const EXIT: &str = "exit";

pub fn write_tagged<W: Write, S: AsRef<str>, T: AsRef<str>>(mut w: W, words: &[S], tags: &[T]) -> Result<()> {
    let line: Vec<String> = zip(words, tags)
        .map(|(w, t)| format!("{}/{}", w.as_ref(), t.as_ref()))
        .collect();
    writeln!(w, "{}", line.join(" "))?;
    Ok(())
}

/// Tags `input` line by line until [`EXIT`] or end of input.
///
/// Returns the number of lines read, the exit line excluded.
pub fn interact<R: BufRead, W: Write>(tagger: &Tagger<'_>, input: R, mut output: W) -> Result<usize> {
    writeln!(output, "Enter a sentence (\"{EXIT}\" to quit):")?;
    let mut n = 0;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line == EXIT {
            break;
        }
        n += 1;
        let words: Vec<&str> = line.split_whitespace().collect();
        match tagger.tag(&words) {
            Ok(tags) => write_tagged(&mut output, &words, &tags)?,
            Err(e @ Error::DeadEnd { .. }) => writeln!(output, "{e}")?,
            Err(e) => return Err(e),
        }
        output.flush()?;
    }
    Ok(n)
}

/// Tags every sentence of `corpus` once, writing the result to `output` when
/// given, and compares it against the reference tags.
///
/// A sentence that cannot be decoded counts as entirely wrong.
pub fn tag_corpus<W: Write>(tagger: &Tagger<'_>, corpus: &Corpus, mut output: Option<W>) -> Result<Evaluation> {
    let mut evaluation = Evaluation::default();
    for (i, seq) in corpus.iter().enumerate() {
        match tagger.tag(&seq.words) {
            Ok(prediction) => {
                log::debug!("#{i}: {:?}", prediction);
                if let Some(w) = output.as_mut() {
                    write_tagged(w, &seq.words, &prediction)?;
                }
                evaluation.accumulate(&seq.tags, &prediction);
            }
            Err(e @ Error::DeadEnd { position }) => {
                log::warn!("sentence #{i} has no path past word #{position}");
                if let Some(w) = output.as_mut() {
                    writeln!(w, "{e}")?;
                }
                evaluation.accumulate::<_, &str>(&seq.tags, &[]);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::{model::Model, tagger::TaggerOptions, trainer::train};

    fn toy() -> Model {
        train(
            &[vec!["D", "N", "V"], vec!["N", "V"]],
            &[vec!["the", "dog", "runs"], vec!["dog", "runs"]],
        )
        .unwrap()
    }

    fn test_corpus() -> Corpus {
        Corpus::read(
            "N V\nN V N V\nD N V\n".as_bytes(),
            "dog runs\ndog runs dog runs\nThe dog runs\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn tagged_line() {
        let mut out = Vec::new();
        write_tagged(&mut out, &["The", "dog"], &["D", "N"]).unwrap();
        write_tagged::<_, &str, &str>(&mut out, &[], &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "The/D dog/N\n\n");
    }

    #[test]
    fn stops_at_exit() {
        let model = toy();
        let tagger = model.tagger(TaggerOptions::default());
        let input = "dog runs\ndog runs dog runs\n  The dog runs \nexit\ndog runs\n";
        let mut out = Vec::new();
        let n = interact(&tagger, input.as_bytes(), &mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Enter a sentence (\"exit\" to quit):\n\
             dog/N runs/V\n\
             no transition reaches word #3\n\
             The/D dog/N runs/V\n"
        );
    }

    #[test]
    fn stops_at_end_of_input() {
        let model = toy();
        let tagger = model.tagger(TaggerOptions::default());
        let mut out = Vec::new();
        let n = interact(&tagger, "dog runs\n\nthe dog runs".as_bytes(), &mut out).unwrap();
        assert_eq!(n, 3);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().skip(1).collect::<Vec<_>>(), ["dog/N runs/V", "", "the/D dog/N runs/V"]);

        let mut out = Vec::new();
        assert_eq!(interact(&tagger, "".as_bytes(), &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn corpus_output_and_evaluation() {
        let model = toy();
        let tagger = model.tagger(TaggerOptions::default());
        let corpus = test_corpus();

        let mut out = Vec::new();
        let evaluation = tag_corpus(&tagger, &corpus, Some(&mut out)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "dog/N runs/V\nno transition reaches word #3\nThe/D dog/N runs/V\n"
        );
        assert_eq!(evaluation.correct(), 5);
        assert_eq!(evaluation.incorrect(), 4);
        assert_eq!(evaluation.num_sentences(), 3);
    }

    #[test]
    fn quiet_corpus() {
        let model = toy();
        let tagger = model.tagger(TaggerOptions::default());
        let corpus = test_corpus();
        let quiet = tag_corpus::<Vec<u8>>(&tagger, &corpus, None).unwrap();
        let mut out = Vec::new();
        let loud = tag_corpus(&tagger, &corpus, Some(&mut out)).unwrap();
        assert_eq!(quiet.to_string(), loud.to_string());
        assert_eq!(tagger.evaluate(&corpus).unwrap().to_string(), quiet.to_string());
    }
}
