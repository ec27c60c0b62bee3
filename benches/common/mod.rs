use hmmtag::{Corpus, TaggedSentence};

const TAGS: [&str; 6] = ["DET", "ADJ", "N", "V", "P", "."];

/// Deterministic pseudo-corpus following DET (ADJ) N V (P DET N) .
pub fn synthetic(n: usize) -> Corpus {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |m: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) % m
    };
    let seqs = (0..n).map(|_| {
        let mut tags = vec![0, 2, 3];
        if next(2) == 0 {
            tags.insert(1, 1);
        }
        if next(2) == 0 {
            tags.extend([4, 0, 2]);
        }
        tags.push(5);
        let words = tags
            .iter()
            .map(|&t| if t == 5 { ".".to_string() } else { format!("{}{}", TAGS[t].to_lowercase(), next(200)) })
            .collect::<Vec<_>>()
            .join(" ");
        let tags = tags.iter().map(|&t| TAGS[t]).collect::<Vec<_>>().join(" ");
        TaggedSentence::parse(&tags, &words)
    });
    Corpus::from_sentences(seqs).expect("synthetic sentences are aligned")
}
