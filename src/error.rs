use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The tag and sentence collections hold different numbers of sentences.
    #[error("corpus is misaligned: {tags} tag sequences vs {words} word sequences")]
    MisalignedCorpus { tags: usize, words: usize },

    /// A sentence has a different number of tags and words.
    #[error("sentence #{sentence} is misaligned: {tags} tags vs {words} words")]
    MisalignedSentence {
        sentence: usize,
        tags: usize,
        words: usize,
    },

    /// No tag of the frontier has an outgoing transition, so the word at
    /// `position` cannot be tagged.
    #[error("no transition reaches word #{position}")]
    DeadEnd { position: usize },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
