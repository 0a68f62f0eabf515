use mail_metrics::{LexiconScorer, TextScorer};

#[test]
fn test_positive_text() {
    assert!(LexiconScorer.polarity("What a great and wonderful day") > 0.5);
}

#[test]
fn test_negative_text() {
    assert!(LexiconScorer.polarity("This was a terrible, awful experience") < -0.5);
}

#[test]
fn test_neutral_text() {
    assert!(LexiconScorer.polarity("The meeting is on Tuesday").abs() < f64::EPSILON);
    assert!(LexiconScorer.polarity("").abs() < f64::EPSILON);
}

#[test]
fn test_negation_flips_polarity() {
    let plain = LexiconScorer.polarity("good");
    let negated = LexiconScorer.polarity("not good");

    assert!(plain > 0.0);
    assert!(negated < 0.0);
    assert!(negated.abs() < plain);
}

#[test]
fn test_intensifier_strengthens() {
    assert!(LexiconScorer.polarity("very good") > LexiconScorer.polarity("good"));
}

#[test]
fn test_score_is_bounded() {
    let score = LexiconScorer.polarity("extremely extremely extremely perfect!!!");

    assert!((-1.0..=1.0).contains(&score));
}

#[test]
fn test_punctuation_is_ignored() {
    assert!(
        (LexiconScorer.polarity("Great!") - LexiconScorer.polarity("great")).abs() < f64::EPSILON
    );
}
