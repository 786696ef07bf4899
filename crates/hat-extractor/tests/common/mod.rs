//! Shared annotation builders for integration tests
//!
//! Sentences are written in the annotation service's JSON wire format
//! so the tests exercise deserialization as well as extraction.

#![allow(dead_code)]

use hat_core::{AnnotatedDocument, SentenceAnnotation};
use serde_json::{json, Value};

/// Token as `[text, lemma, dep, head]`; the root's head is itself
pub fn sentence(
    text: &str,
    tokens: &[(&str, &str, &str, usize)],
    entities: Value,
    root: usize,
) -> SentenceAnnotation {
    let tokens: Vec<Value> = tokens
        .iter()
        .enumerate()
        .map(|(index, (text, lemma, dep, head))| {
            json!({
                "text": text,
                "lemma": lemma,
                "dep": dep,
                "index": index,
                "head": head,
            })
        })
        .collect();

    serde_json::from_value(json!({
        "text": text,
        "tokens": tokens,
        "entities": entities,
        "root": root,
    }))
    .unwrap()
}

pub fn document(title: &str, sentences: Vec<SentenceAnnotation>) -> AnnotatedDocument {
    AnnotatedDocument::new(title, sentences)
}

/// Alan Turing was born on June 23, 1912, in Maida Vale.
pub fn turing_born() -> SentenceAnnotation {
    sentence(
        "Alan Turing was born on June 23, 1912, in Maida Vale.",
        &[
            ("Alan", "Alan", "compound", 1),
            ("Turing", "Turing", "nsubjpass", 3),
            ("was", "be", "auxpass", 3),
            ("born", "bear", "ROOT", 3),
            ("on", "on", "prep", 3),
            ("June", "June", "pobj", 4),
            ("23", "23", "nummod", 5),
            (",", ",", "punct", 5),
            ("1912", "1912", "nummod", 5),
            (",", ",", "punct", 3),
            ("in", "in", "prep", 3),
            ("Maida", "Maida", "compound", 12),
            ("Vale", "Vale", "pobj", 10),
            (".", ".", "punct", 3),
        ],
        json!([
            {"text": "Alan Turing", "label": "PERSON", "start": 0, "end": 2},
            {"text": "June 23, 1912", "label": "DATE", "start": 5, "end": 9},
            {"text": "Maida Vale", "label": "LOC", "start": 11, "end": 13},
        ]),
        3,
    )
}

/// Disney acquired Pixar in 2006 and Marvel in 2009.
pub fn disney_acquisitions() -> SentenceAnnotation {
    sentence(
        "Disney acquired Pixar in 2006 and Marvel in 2009.",
        &[
            ("Disney", "Disney", "nsubj", 1),
            ("acquired", "acquire", "ROOT", 1),
            ("Pixar", "Pixar", "dobj", 1),
            ("in", "in", "prep", 1),
            ("2006", "2006", "pobj", 3),
            ("and", "and", "cc", 2),
            ("Marvel", "Marvel", "conj", 2),
            ("in", "in", "prep", 6),
            ("2009", "2009", "pobj", 7),
            (".", ".", "punct", 1),
        ],
        json!([
            {"text": "Disney", "label": "ORG", "start": 0, "end": 1},
            {"text": "Pixar", "label": "ORG", "start": 2, "end": 3},
            {"text": "2006", "label": "DATE", "start": 4, "end": 5},
            {"text": "Marvel", "label": "ORG", "start": 6, "end": 7},
            {"text": "2009", "label": "DATE", "start": 8, "end": 9},
        ]),
        1,
    )
}

/// Turing studied mathematics at Cambridge.
pub fn no_trigger() -> SentenceAnnotation {
    sentence(
        "Turing studied mathematics at Cambridge.",
        &[
            ("Turing", "Turing", "nsubj", 1),
            ("studied", "study", "ROOT", 1),
            ("mathematics", "mathematic", "dobj", 1),
            ("at", "at", "prep", 1),
            ("Cambridge", "Cambridge", "pobj", 3),
            (".", ".", "punct", 1),
        ],
        json!([
            {"text": "Turing", "label": "PERSON", "start": 0, "end": 1},
            {"text": "Cambridge", "label": "ORG", "start": 4, "end": 5},
        ]),
        1,
    )
}

/// Disney acquired the studio in 2006.
pub fn single_org_acquire() -> SentenceAnnotation {
    sentence(
        "Disney acquired the studio in 2006.",
        &[
            ("Disney", "Disney", "nsubj", 1),
            ("acquired", "acquire", "ROOT", 1),
            ("the", "the", "det", 3),
            ("studio", "studio", "dobj", 1),
            ("in", "in", "prep", 1),
            ("2006", "2006", "pobj", 4),
            (".", ".", "punct", 1),
        ],
        json!([
            {"text": "Disney", "label": "ORG", "start": 0, "end": 1},
            {"text": "2006", "label": "DATE", "start": 5, "end": 6},
        ]),
        1,
    )
}

/// Maida Vale is in the City of Westminster in London.
pub fn maida_vale_part_of() -> SentenceAnnotation {
    sentence(
        "Maida Vale is in the City of Westminster in London.",
        &[
            ("Maida", "Maida", "compound", 1),
            ("Vale", "Vale", "nsubj", 2),
            ("is", "be", "ROOT", 2),
            ("in", "in", "prep", 2),
            ("the", "the", "det", 5),
            ("City", "City", "pobj", 3),
            ("of", "of", "prep", 5),
            ("Westminster", "Westminster", "pobj", 6),
            ("in", "in", "prep", 5),
            ("London", "London", "pobj", 8),
            (".", ".", "punct", 2),
        ],
        json!([
            {"text": "Maida Vale", "label": "LOC", "start": 0, "end": 2},
            {"text": "the City of Westminster", "label": "GPE", "start": 4, "end": 8},
            {"text": "London", "label": "GPE", "start": 9, "end": 10},
        ]),
        2,
    )
}

/// Flat ACQUIRE sentence: buyer at token 0, then orgs and dates in `order`
///
/// `order[i] == true` places the next organization, `false` the next date.
/// With `orgs == 0` the subject token carries no entity.
pub fn acquire_with(orgs: usize, dates: usize, order: &[bool]) -> SentenceAnnotation {
    let mut tokens: Vec<(String, &'static str, &'static str, usize)> = vec![
        ("Buyer".to_string(), "buyer", "nsubj", 1),
        ("acquired".to_string(), "acquire", "ROOT", 1),
    ];
    let mut entities: Vec<Value> = Vec::new();
    if orgs > 0 {
        entities.push(json!({"text": "Buyer", "label": "ORG", "start": 0, "end": 1}));
    }

    let mut remaining_orgs = orgs.saturating_sub(1);
    let mut remaining_dates = dates;
    let mut choices = order.iter().copied();
    while remaining_orgs + remaining_dates > 0 {
        let pick_org = match (remaining_orgs, remaining_dates) {
            (0, _) => false,
            (_, 0) => true,
            _ => choices.next().unwrap_or(true),
        };

        let index = tokens.len();
        let (text, label, dep) = if pick_org {
            remaining_orgs -= 1;
            (format!("Org{index}"), "ORG", "dobj")
        } else {
            remaining_dates -= 1;
            (format!("{}", 1900 + index), "DATE", "npadvmod")
        };
        entities.push(json!({"text": text, "label": label, "start": index, "end": index + 1}));
        tokens.push((text, "x", dep, 1));
    }

    let text = tokens
        .iter()
        .map(|(t, ..)| t.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let borrowed: Vec<(&str, &str, &str, usize)> = tokens
        .iter()
        .map(|(t, l, d, h)| (t.as_str(), *l, *d, *h))
        .collect();

    sentence(&text, &borrowed, Value::Array(entities), 1)
}
