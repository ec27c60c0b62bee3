use hmmtag::{train, Corpus, Error, Model, TaggerOptions};

fn init() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn toy() -> Model {
    train(
        &[vec!["D", "N", "V"], vec!["N", "V"]],
        &[vec!["the", "dog", "runs"], vec!["dog", "runs"]],
    )
    .expect("failed to train")
}

fn brown_like() -> Corpus {
    let tags = "DET N V DET N .
PRO V DET ADJ N .
DET N V P DET N .
N V ADV .
PRO V .
DET ADJ N V ADV .
";
    let sentences = "The dog chased the cat .
She saw a big house .
The man sat on the chair .
Birds fly south .
They left .
The old cat slept peacefully .
";
    Corpus::read(tags.as_bytes(), sentences.as_bytes()).expect("failed to read corpus")
}

#[test]
fn end_to_end() {
    init();
    let model = toy();
    let tagger = model.tagger(TaggerOptions::default());
    assert_eq!(tagger.tag_sentence("dog runs").unwrap(), ["N", "V"]);
    assert_eq!(tagger.tag_sentence("the dog runs").unwrap(), ["D", "N", "V"]);
}

#[test]
fn idempotent_and_length() {
    init();
    let model = brown_like().train().unwrap();
    let tagger = model.tagger(TaggerOptions::default());
    for sentence in [
        "the cat chased the dog .",
        "she saw the old man .",
        "birds left .",
        "The Dog sat .",
    ] {
        let first = tagger.tag_sentence(sentence).unwrap();
        let second = tagger.tag_sentence(sentence).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), sentence.split_whitespace().count());
    }
    assert_eq!(
        tagger.tag_sentence("the cat chased the dog .").unwrap(),
        ["DET", "N", "V", "DET", "N", "."]
    );
}

#[test]
fn unseen_words() {
    init();
    let model = brown_like().train().unwrap();
    let tagger = model.tagger(TaggerOptions::default());
    let tags = tagger.tag_sentence("the zebra chased xylophones .").unwrap();
    assert_eq!(tags.len(), 5);
    assert_eq!(tags[0], "DET");
    assert_eq!(tags[4], ".");

    let tags = tagger.tag_sentence("qwerty").unwrap();
    assert_eq!(tags.len(), 1);
}

#[test]
fn empty_sentence() {
    init();
    let model = toy();
    let tagger = model.tagger(TaggerOptions::default());
    assert!(tagger.tag_sentence("").unwrap().is_empty());
    assert!(tagger.tag_sentence("   ").unwrap().is_empty());
}

#[test]
fn dead_end() {
    init();
    let model = toy();
    let tagger = model.tagger(TaggerOptions::default());
    // nothing ever follows "V" in training
    match tagger.tag_sentence("dog runs dog runs") {
        Err(Error::DeadEnd { position }) => assert_eq!(position, 3),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn shared_model() {
    init();
    let model = brown_like().train().unwrap();
    let expected = model
        .tagger(TaggerOptions::default())
        .tag_sentence("the dog slept .")
        .unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let tagger = model.tagger(TaggerOptions::default());
                assert_eq!(tagger.tag_sentence("the dog slept .").unwrap(), expected);
            });
        }
    });
}

#[test]
fn evaluate() {
    init();
    let corpus = brown_like();
    let model = corpus.train().unwrap();
    let tagger = model.tagger(TaggerOptions::default());
    let evaluation = tagger.evaluate(&corpus).unwrap();
    assert_eq!(evaluation.num_sentences(), corpus.len());
    assert_eq!(evaluation.correct() + evaluation.incorrect(), corpus.total_items());
    let est = evaluation.evaluate();
    assert!(est.item_accuracy > 0.9, "{}", evaluation);

    let test = Corpus::read("N V\nN V N V\n".as_bytes(), "dog runs\ndog runs dog runs\n".as_bytes()).unwrap();
    let model = toy();
    let evaluation = model.tagger(TaggerOptions::default()).evaluate(&test).unwrap();
    assert_eq!(evaluation.correct(), 2);
    assert_eq!(evaluation.incorrect(), 4);
}

#[test]
fn persistence() {
    init();
    let model = brown_like().train().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    model.save(&path).unwrap();
    let loaded = Model::from_path(&path).unwrap();
    assert_eq!(loaded, model);
    let sentence = "she saw the big cat .";
    assert_eq!(
        loaded.tagger(TaggerOptions::default()).tag_sentence(sentence).unwrap(),
        model.tagger(TaggerOptions::default()).tag_sentence(sentence).unwrap()
    );

    let missing = dir.path().join("missing.json");
    assert!(matches!(Model::from_path(missing), Err(Error::Io(_))));
}
