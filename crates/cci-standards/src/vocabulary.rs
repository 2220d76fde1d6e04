//! Controlled vocabulary access.
//!
//! The tagger only talks to the vocabulary through [`VocabularyClient`]. The
//! in-memory [`Vocabulary`] is the client used by the command line tool; it is
//! filled from a CSV export of the SKOS concept schemes (see
//! [`crate::vocab_loader`]).

use std::collections::BTreeMap;

use cci_model::Term;

/// Query contract for the concept store.
///
/// Labels passed to the lookup methods are already lower-cased; implementations
/// match them case-insensitively against the scheme's labels.
pub trait VocabularyClient {
    /// Find the concept in `scheme` whose preferred label matches.
    fn lookup_by_pref_label(&self, scheme: &str, label: &str) -> Option<Term>;

    /// Find the concept in `scheme` with a matching alternate label.
    fn lookup_by_alt_label(&self, scheme: &str, label: &str) -> Option<Term>;

    fn pref_label(&self, uri: &str) -> Option<String>;

    fn alt_label(&self, uri: &str) -> Option<String>;

    /// The broader concept as `(pref_label, uri)`, if there is one.
    fn broader(&self, uri: &str) -> Option<(String, String)>;
}

impl<T: VocabularyClient + ?Sized> VocabularyClient for &T {
    fn lookup_by_pref_label(&self, scheme: &str, label: &str) -> Option<Term> {
        (**self).lookup_by_pref_label(scheme, label)
    }

    fn lookup_by_alt_label(&self, scheme: &str, label: &str) -> Option<Term> {
        (**self).lookup_by_alt_label(scheme, label)
    }

    fn pref_label(&self, uri: &str) -> Option<String> {
        (**self).pref_label(uri)
    }

    fn alt_label(&self, uri: &str) -> Option<String> {
        (**self).alt_label(uri)
    }

    fn broader(&self, uri: &str) -> Option<(String, String)> {
        (**self).broader(uri)
    }
}

#[derive(Debug, Clone)]
struct Concept {
    scheme: String,
    term: Term,
    broader: Option<String>,
}

/// In-memory concept store indexed by scheme and lower-cased label.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    concepts: BTreeMap<String, Concept>,
    pref_index: BTreeMap<(String, String), String>,
    alt_index: BTreeMap<(String, String), String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a concept. Adding the same URI again merges in extra alternate labels.
    ///
    /// The first alternate label becomes the term's `alt_label`.
    pub fn add_concept(
        &mut self,
        scheme: &str,
        uri: &str,
        pref_label: &str,
        alt_labels: &[String],
        broader: Option<&str>,
    ) {
        let entry = self
            .concepts
            .entry(uri.to_string())
            .or_insert_with(|| Concept {
                scheme: scheme.to_string(),
                term: Term::new(uri, pref_label, ""),
                broader: None,
            });
        if entry.term.alt_label.is_empty()
            && let Some(first) = alt_labels.first()
        {
            entry.term.alt_label = first.clone();
        }
        if entry.broader.is_none() {
            entry.broader = broader.filter(|b| !b.is_empty()).map(str::to_string);
        }

        self.pref_index
            .entry((scheme.to_string(), pref_label.to_lowercase()))
            .or_insert_with(|| uri.to_string());
        for alt in alt_labels {
            self.alt_index
                .entry((scheme.to_string(), alt.to_lowercase()))
                .or_insert_with(|| uri.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Number of concepts in each scheme.
    pub fn scheme_sizes(&self) -> BTreeMap<&str, usize> {
        let mut sizes = BTreeMap::new();
        for concept in self.concepts.values() {
            *sizes.entry(concept.scheme.as_str()).or_insert(0) += 1;
        }
        sizes
    }

    fn lookup(
        &self,
        index: &BTreeMap<(String, String), String>,
        scheme: &str,
        label: &str,
    ) -> Option<Term> {
        let uri = index.get(&(scheme.to_string(), label.to_lowercase()))?;
        self.concepts.get(uri).map(|concept| concept.term.clone())
    }
}

impl VocabularyClient for Vocabulary {
    fn lookup_by_pref_label(&self, scheme: &str, label: &str) -> Option<Term> {
        self.lookup(&self.pref_index, scheme, label)
    }

    fn lookup_by_alt_label(&self, scheme: &str, label: &str) -> Option<Term> {
        self.lookup(&self.alt_index, scheme, label)
    }

    fn pref_label(&self, uri: &str) -> Option<String> {
        self.concepts
            .get(uri)
            .map(|concept| concept.term.pref_label.clone())
    }

    fn alt_label(&self, uri: &str) -> Option<String> {
        self.concepts
            .get(uri)
            .map(|concept| concept.term.alt_label.clone())
            .filter(|label| !label.is_empty())
    }

    fn broader(&self, uri: &str) -> Option<(String, String)> {
        let broader_uri = self.concepts.get(uri)?.broader.as_deref()?;
        let broader = self.concepts.get(broader_uri)?;
        Some((broader.term.pref_label.clone(), broader_uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATFORM: &str = "http://vocab/scheme/platform";
    const PROGRAMME: &str = "http://vocab/scheme/platformProg";

    fn sample() -> Vocabulary {
        let mut vocab = Vocabulary::new();
        vocab.add_concept(PROGRAMME, "http://vocab/prog/noaa", "NOAA POES", &[], None);
        vocab.add_concept(
            PLATFORM,
            "http://vocab/platform/noaa-12",
            "NOAA-12",
            &["N12".to_string()],
            Some("http://vocab/prog/noaa"),
        );
        vocab
    }

    #[test]
    fn lookups_are_case_insensitive_and_scoped_to_scheme() {
        let vocab = sample();
        let term = vocab.lookup_by_pref_label(PLATFORM, "noaa-12").unwrap();
        assert_eq!(term.uri, "http://vocab/platform/noaa-12");
        assert_eq!(term.alt_label, "N12");
        assert!(vocab.lookup_by_pref_label(PROGRAMME, "noaa-12").is_none());
        assert!(vocab.lookup_by_alt_label(PLATFORM, "n12").is_some());
    }

    #[test]
    fn broader_returns_label_and_uri() {
        let vocab = sample();
        assert_eq!(
            vocab.broader("http://vocab/platform/noaa-12"),
            Some(("NOAA POES".to_string(), "http://vocab/prog/noaa".to_string()))
        );
        assert_eq!(vocab.broader("http://vocab/prog/noaa"), None);
    }

    #[test]
    fn missing_alt_label_is_none() {
        let vocab = sample();
        assert_eq!(vocab.alt_label("http://vocab/prog/noaa"), None);
        assert_eq!(vocab.pref_label("http://vocab/prog/noaa").as_deref(), Some("NOAA POES"));
    }
}
