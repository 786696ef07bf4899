//! Hand-built annotations shared by unit tests

use hat_core::{
    AnnotatedSentence, EntityLabel, EntityMention, SentenceAnnotation, TokenAnnotation,
};

/// Token whose head equals its own index is the root
pub(crate) fn tok(
    index: usize,
    text: &str,
    lemma: &str,
    dep: &str,
    head: usize,
) -> TokenAnnotation {
    TokenAnnotation::new(index, text, lemma, dep, Some(head))
}

pub(crate) fn ent(text: &str, label: EntityLabel, start: usize, end: usize) -> EntityMention {
    EntityMention::new(text, label, start, end)
}

pub(crate) fn annotated(raw: SentenceAnnotation) -> AnnotatedSentence {
    AnnotatedSentence::from_annotation(&raw).unwrap()
}

/// Alan Turing was born on June 23, 1912, in Maida Vale.
pub(crate) fn turing_born() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Alan Turing was born on June 23, 1912, in Maida Vale.",
        vec![
            tok(0, "Alan", "Alan", "compound", 1),
            tok(1, "Turing", "Turing", "nsubjpass", 3),
            tok(2, "was", "be", "auxpass", 3),
            tok(3, "born", "bear", "ROOT", 3),
            tok(4, "on", "on", "prep", 3),
            tok(5, "June", "June", "pobj", 4),
            tok(6, "23", "23", "nummod", 5),
            tok(7, ",", ",", "punct", 5),
            tok(8, "1912", "1912", "nummod", 5),
            tok(9, ",", ",", "punct", 3),
            tok(10, "in", "in", "prep", 3),
            tok(11, "Maida", "Maida", "compound", 12),
            tok(12, "Vale", "Vale", "pobj", 10),
            tok(13, ".", ".", "punct", 3),
        ],
        vec![
            ent("Alan Turing", EntityLabel::Person, 0, 2),
            ent("June 23, 1912", EntityLabel::Date, 5, 9),
            ent("Maida Vale", EntityLabel::Loc, 11, 13),
        ],
        Some(3),
    )
}

/// Turing, who was born in London, studied.
pub(crate) fn nested_born() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Turing, who was born in London, studied.",
        vec![
            tok(0, "Turing", "Turing", "nsubj", 8),
            tok(1, ",", ",", "punct", 0),
            tok(2, "who", "who", "nsubjpass", 4),
            tok(3, "was", "be", "auxpass", 4),
            tok(4, "born", "bear", "relcl", 0),
            tok(5, "in", "in", "prep", 4),
            tok(6, "London", "London", "pobj", 5),
            tok(7, ",", ",", "punct", 0),
            tok(8, "studied", "study", "ROOT", 8),
            tok(9, ".", ".", "punct", 8),
        ],
        vec![
            ent("Turing", EntityLabel::Person, 0, 1),
            ent("London", EntityLabel::Gpe, 6, 7),
        ],
        Some(8),
    )
}

/// Disney acquired Pixar in 2006 and Marvel in 2009.
pub(crate) fn disney_acquisitions() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Disney acquired Pixar in 2006 and Marvel in 2009.",
        vec![
            tok(0, "Disney", "Disney", "nsubj", 1),
            tok(1, "acquired", "acquire", "ROOT", 1),
            tok(2, "Pixar", "Pixar", "dobj", 1),
            tok(3, "in", "in", "prep", 1),
            tok(4, "2006", "2006", "pobj", 3),
            tok(5, "and", "and", "cc", 2),
            tok(6, "Marvel", "Marvel", "conj", 2),
            tok(7, "in", "in", "prep", 6),
            tok(8, "2009", "2009", "pobj", 7),
            tok(9, ".", ".", "punct", 1),
        ],
        vec![
            ent("Disney", EntityLabel::Org, 0, 1),
            ent("Pixar", EntityLabel::Org, 2, 3),
            ent("2006", EntityLabel::Date, 4, 5),
            ent("Marvel", EntityLabel::Org, 6, 7),
            ent("2009", EntityLabel::Date, 8, 9),
        ],
        Some(1),
    )
}

/// Disney, which acquired Pixar in 2006, grew.
pub(crate) fn disney_relative() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Disney, which acquired Pixar in 2006, grew.",
        vec![
            tok(0, "Disney", "Disney", "nsubj", 8),
            tok(1, ",", ",", "punct", 0),
            tok(2, "which", "which", "nsubj", 3),
            tok(3, "acquired", "acquire", "relcl", 0),
            tok(4, "Pixar", "Pixar", "dobj", 3),
            tok(5, "in", "in", "prep", 3),
            tok(6, "2006", "2006", "pobj", 5),
            tok(7, ",", ",", "punct", 0),
            tok(8, "grew", "grow", "ROOT", 8),
            tok(9, ".", ".", "punct", 8),
        ],
        vec![
            ent("Disney", EntityLabel::Org, 0, 1),
            ent("Pixar", EntityLabel::Org, 4, 5),
            ent("2006", EntityLabel::Date, 6, 7),
        ],
        Some(8),
    )
}

/// Mary bore John in 1900 in Paris.
pub(crate) fn mary_bore_john() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Mary bore John in 1900 in Paris.",
        vec![
            tok(0, "Mary", "Mary", "nsubj", 1),
            tok(1, "bore", "bear", "ROOT", 1),
            tok(2, "John", "John", "dobj", 1),
            tok(3, "in", "in", "prep", 1),
            tok(4, "1900", "1900", "pobj", 3),
            tok(5, "in", "in", "prep", 1),
            tok(6, "Paris", "Paris", "pobj", 5),
            tok(7, ".", ".", "punct", 1),
        ],
        vec![
            ent("Mary", EntityLabel::Person, 0, 1),
            ent("John", EntityLabel::Person, 2, 3),
            ent("1900", EntityLabel::Date, 4, 5),
            ent("Paris", EntityLabel::Gpe, 6, 7),
        ],
        Some(1),
    )
}

/// Pixar was acquired by Disney in 2006.
pub(crate) fn pixar_passive() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Pixar was acquired by Disney in 2006.",
        vec![
            tok(0, "Pixar", "Pixar", "nsubjpass", 2),
            tok(1, "was", "be", "auxpass", 2),
            tok(2, "acquired", "acquire", "ROOT", 2),
            tok(3, "by", "by", "agent", 2),
            tok(4, "Disney", "Disney", "pobj", 3),
            tok(5, "in", "in", "prep", 2),
            tok(6, "2006", "2006", "pobj", 5),
            tok(7, ".", ".", "punct", 2),
        ],
        vec![
            ent("Pixar", EntityLabel::Org, 0, 1),
            ent("Disney", EntityLabel::Org, 4, 5),
            ent("2006", EntityLabel::Date, 6, 7),
        ],
        Some(2),
    )
}

/// Disney bought the studio in 2006.
pub(crate) fn single_org_acquire() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Disney bought the studio in 2006.",
        vec![
            tok(0, "Disney", "Disney", "nsubj", 1),
            tok(1, "bought", "buy", "ROOT", 1),
            tok(2, "the", "the", "det", 3),
            tok(3, "studio", "studio", "dobj", 1),
            tok(4, "in", "in", "prep", 1),
            tok(5, "2006", "2006", "pobj", 4),
            tok(6, ".", ".", "punct", 1),
        ],
        vec![
            ent("Disney", EntityLabel::Org, 0, 1),
            ent("2006", EntityLabel::Date, 5, 6),
        ],
        Some(1),
    )
}

/// Maida Vale is in the City of Westminster in London.
pub(crate) fn maida_vale_part_of() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Maida Vale is in the City of Westminster in London.",
        vec![
            tok(0, "Maida", "Maida", "compound", 1),
            tok(1, "Vale", "Vale", "nsubj", 2),
            tok(2, "is", "be", "ROOT", 2),
            tok(3, "in", "in", "prep", 2),
            tok(4, "the", "the", "det", 5),
            tok(5, "City", "City", "pobj", 3),
            tok(6, "of", "of", "prep", 5),
            tok(7, "Westminster", "Westminster", "pobj", 6),
            tok(8, "in", "in", "prep", 5),
            tok(9, "London", "London", "pobj", 8),
            tok(10, ".", ".", "punct", 2),
        ],
        vec![
            ent("Maida Vale", EntityLabel::Loc, 0, 2),
            ent("the City of Westminster", EntityLabel::Gpe, 4, 8),
            ent("London", EntityLabel::Gpe, 9, 10),
        ],
        Some(2),
    )
}

/// Turing studied mathematics.
pub(crate) fn no_trigger() -> SentenceAnnotation {
    SentenceAnnotation::new(
        "Turing studied mathematics.",
        vec![
            tok(0, "Turing", "Turing", "nsubj", 1),
            tok(1, "studied", "study", "ROOT", 1),
            tok(2, "mathematics", "mathematic", "dobj", 1),
            tok(3, ".", ".", "punct", 1),
        ],
        vec![ent("Turing", EntityLabel::Person, 0, 1)],
        Some(1),
    )
}
