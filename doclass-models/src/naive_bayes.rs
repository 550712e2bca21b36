#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use doclass_core::{
    accuracy, count_words, count_words_filtered, tokenize, Corpus, DoclassError, Field, Float,
    Label, Predictions, Result, StopWords, Table, WordCounts,
};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Training options for [`NaiveBayesTextClassifier`].
///
/// Stop-word filtering is off by default. When it is on, the configured
/// [`StopWords`] are removed from the vocabulary, from every per-category
/// frequency table and from each document before it is scored.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NaiveBayesConfig {
    filter_stop_words: bool,
    stop_words: StopWords,
}

impl NaiveBayesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_word_filtering(mut self, enabled: bool) -> Self {
        self.filter_stop_words = enabled;
        self
    }

    /// Replaces the stop-word set. Has no effect unless filtering is enabled.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn filter_stop_words(&self) -> bool {
        self.filter_stop_words
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    fn active_stop_words(&self) -> Option<&StopWords> {
        self.filter_stop_words.then_some(&self.stop_words)
    }
}

/// Log-posterior score of one category for one document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: Label,
    pub score: Float,
}

/// Per-category statistics learned at fit time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
struct CategoryModel {
    label: Label,
    documents: usize,
    prior: Float,
    frequencies: HashMap<String, usize>,
}

impl CategoryModel {
    fn new(label: Label) -> Self {
        Self {
            label,
            documents: 0,
            prior: 0.0,
            frequencies: HashMap::new(),
        }
    }

    fn frequency(&self, token: &str) -> usize {
        self.frequencies.get(token).copied().unwrap_or(0)
    }

    /// `ln P(c) + Σ_w ln((n_w + 1) / (f(c, w) + V))`
    fn log_posterior(&self, counts: &WordCounts<'_>, vocabulary_size: Float) -> Float {
        let mut score = self.prior.ln();
        for (token, &n) in counts {
            let num = (n + 1) as Float;
            let denom = self.frequency(token) as Float + vocabulary_size;
            score += (num / denom).ln();
        }
        score
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
struct FittedModel {
    /// In order of first appearance in the training corpus.
    categories: Vec<CategoryModel>,
    vocabulary: BTreeSet<String>,
    training: Corpus,
}

/// A **multinomial Naive Bayes** document classifier with Laplace smoothing.
///
/// Documents are split on whitespace into tokens. Fitting learns, once:
/// - the prior `P(c)` of every category (its share of training documents)
/// - the vocabulary, i.e. every distinct training token (size `V`)
/// - a token -> count table per category
///
/// A document is assigned the category with the largest log posterior
///
/// ```text
/// score(c) = ln P(c) + Σ_w ln((n_w + 1) / (f(c, w) + V))
/// ```
///
/// where `n_w` is the number of times token `w` occurs in the document and
/// `f(c, w)` the number of times it occurs across training documents of
/// category `c` (0 when unseen). Working in log space keeps long documents
/// from underflowing to zero.
///
/// # Tie-breaking
///
/// Categories are kept in the order they first appear in the training
/// corpus. When several categories share the maximal score, the first one in
/// that order wins.
///
/// # Errors
///
/// - [`DoclassError::EmptyTrainingData`] if the training corpus is empty.
/// - [`DoclassError::InvalidTrainingData`] if the vocabulary ends up empty.
/// - [`DoclassError::NotFitted`] if the model is queried before fitting.
///
/// # Example
///
/// ```rust
/// use doclass_core::Corpus;
/// use doclass_models::naive_bayes::NaiveBayesTextClassifier;
///
/// let corpus: Corpus = [("cat sat", "A"), ("dog ran", "B"), ("cat ran", "A")]
///     .into_iter()
///     .collect();
///
/// let mut model = NaiveBayesTextClassifier::new();
/// model.fit(&corpus).unwrap();
///
/// assert_eq!(model.classify("cat sat").unwrap(), "A");
/// assert_eq!(model.vocabulary_size().unwrap(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesTextClassifier {
    config: NaiveBayesConfig,
    model: Option<FittedModel>,
}

impl NaiveBayesTextClassifier {
    /// Creates a new, unfitted classifier with stop-word filtering disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, unfitted classifier with the given options.
    pub fn with_config(config: NaiveBayesConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Extracts a corpus from `table` and fits a new classifier on it.
    ///
    /// # Errors
    ///
    /// Everything [`Corpus::from_table`] and [`fit`](Self::fit) can return.
    pub fn from_table(
        table: &Table,
        text_field: impl Into<Field>,
        category_field: impl Into<Field>,
        config: NaiveBayesConfig,
    ) -> Result<Self> {
        let corpus = Corpus::from_table(table, text_field, category_field)?;
        let mut classifier = Self::with_config(config);
        classifier.fit(&corpus)?;
        Ok(classifier)
    }

    /// Learns priors, vocabulary and per-category word frequencies from `corpus`.
    ///
    /// Refitting discards everything learned before. The corpus is cloned and
    /// kept for [`training_accuracy`](Self::training_accuracy).
    ///
    /// # Errors
    ///
    /// - [`DoclassError::EmptyTrainingData`] if `corpus` has no documents.
    /// - [`DoclassError::InvalidTrainingData`] if no token survives
    ///   tokenization and stop-word filtering, which would leave `V = 0`.
    pub fn fit(&mut self, corpus: &Corpus) -> Result<()> {
        if corpus.is_empty() {
            return Err(DoclassError::EmptyTrainingData);
        }

        let stop_words = self.config.active_stop_words();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut categories: Vec<CategoryModel> = Vec::new();
        let mut vocabulary: BTreeSet<String> = BTreeSet::new();

        for document in corpus {
            let slot = match slots.get(document.category.as_str()) {
                Some(&slot) => slot,
                None => {
                    slots.insert(document.category.as_str(), categories.len());
                    categories.push(CategoryModel::new(document.category.clone()));
                    categories.len() - 1
                }
            };

            let category = &mut categories[slot];
            category.documents += 1;

            for token in tokenize(&document.text) {
                match category.frequencies.get_mut(token) {
                    Some(count) => *count += 1,
                    None => {
                        category.frequencies.insert(token.to_string(), 1);
                    }
                }

                let excluded = stop_words.is_some_and(|sw| sw.contains(token));
                if !excluded && !vocabulary.contains(token) {
                    vocabulary.insert(token.to_string());
                }
            }
        }

        // Stop words are dropped from the token keys of each category table;
        // category labels are never filtered.
        if let Some(stop_words) = stop_words {
            for category in &mut categories {
                category
                    .frequencies
                    .retain(|token, _| !stop_words.contains(token));
            }
        }

        if vocabulary.is_empty() {
            return Err(DoclassError::InvalidTrainingData {
                message: String::from("Vocabulary is empty after tokenization."),
            });
        }

        let total = corpus.len() as Float;
        for category in &mut categories {
            category.prior = category.documents as Float / total;
        }

        info!(
            documents = corpus.len(),
            categories = categories.len(),
            vocabulary = vocabulary.len(),
            stop_words = self.config.filter_stop_words,
            "fitted naive Bayes text classifier"
        );

        self.model = Some(FittedModel {
            categories,
            vocabulary,
            training: corpus.clone(),
        });
        Ok(())
    }

    fn fitted(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(DoclassError::NotFitted)
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Category priors `P(c)` in category order. They sum to 1.
    pub fn priors(&self) -> Result<Vec<(&str, Float)>> {
        let model = self.fitted()?;
        Ok(model
            .categories
            .iter()
            .map(|c| (c.label.as_str(), c.prior))
            .collect())
    }

    /// Known categories in the order used for tie-breaking.
    pub fn categories(&self) -> Result<Vec<&str>> {
        let model = self.fitted()?;
        Ok(model.categories.iter().map(|c| c.label.as_str()).collect())
    }

    /// Vocabulary size `V`, the smoothing term of every denominator.
    pub fn vocabulary_size(&self) -> Result<usize> {
        Ok(self.fitted()?.vocabulary.len())
    }

    pub fn vocabulary(&self) -> Result<impl Iterator<Item = &str>> {
        Ok(self.fitted()?.vocabulary.iter().map(String::as_str))
    }

    /// Number of times `token` occurred across training documents of `category`.
    ///
    /// Returns `None` for an unknown category and `Some(0)` for a token the
    /// category never saw.
    pub fn word_frequency(&self, category: &str, token: &str) -> Result<Option<usize>> {
        let model = self.fitted()?;
        Ok(model
            .categories
            .iter()
            .find(|c| c.label == category)
            .map(|c| c.frequency(token)))
    }

    fn document_counts<'a>(&self, text: &'a str) -> WordCounts<'a> {
        match self.config.active_stop_words() {
            Some(stop_words) => count_words_filtered(text, stop_words),
            None => count_words(text),
        }
    }

    fn scores(&self, model: &FittedModel, text: &str) -> Vec<CategoryScore> {
        let counts = self.document_counts(text);
        let vocabulary_size = model.vocabulary.len() as Float;

        model
            .categories
            .iter()
            .map(|c| CategoryScore {
                category: c.label.clone(),
                score: c.log_posterior(&counts, vocabulary_size),
            })
            .collect()
    }

    /// Predicts the most probable category of `text`.
    ///
    /// An empty (or all stop-word) document is ranked by prior alone.
    ///
    /// # Errors
    ///
    /// - [`DoclassError::NotFitted`] if `fit` has not been called.
    pub fn classify(&self, text: &str) -> Result<Label> {
        let model = self.fitted()?;
        let scores = self.scores(model, text);
        let best = argmax(&scores)?;
        Ok(scores[best].category.clone())
    }

    /// Like [`classify`](Self::classify), but also returns the log-posterior
    /// of every category, in category order.
    ///
    /// The scores are meant for inspection and debugging; they are also
    /// emitted as a `debug` tracing event.
    pub fn classify_with_scores(&self, text: &str) -> Result<(Label, Vec<CategoryScore>)> {
        let model = self.fitted()?;
        let scores = self.scores(model, text);
        let best = argmax(&scores)?;
        debug!(?scores, winner = %scores[best].category, "scored document");
        Ok((scores[best].category.clone(), scores))
    }

    /// Classifies every text, preserving input order.
    pub fn predict<S>(&self, texts: &[S]) -> Result<Predictions>
    where
        S: AsRef<str> + Sync,
    {
        let model = self.fitted()?;

        #[cfg(feature = "parallel")]
        {
            texts
                .par_iter()
                .map(|text| {
                    let scores = self.scores(model, text.as_ref());
                    argmax(&scores).map(|best| scores[best].category.clone())
                })
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            texts
                .iter()
                .map(|text| {
                    let scores = self.scores(model, text.as_ref());
                    argmax(&scores).map(|best| scores[best].category.clone())
                })
                .collect()
        }
    }

    /// Fraction of documents in `corpus` whose predicted category matches
    /// their label.
    ///
    /// # Errors
    ///
    /// - [`DoclassError::NotFitted`] if `fit` has not been called.
    /// - [`DoclassError::EmptyTrainingData`] if `corpus` is empty.
    pub fn score(&self, corpus: &Corpus) -> Result<Float> {
        let texts: Vec<&str> = corpus.iter().map(|d| d.text.as_str()).collect();
        let labels: Vec<&str> = corpus.iter().map(|d| d.category.as_str()).collect();
        let predictions = self.predict(&texts)?;
        accuracy(&predictions, &labels)
    }

    /// Accuracy of the model on its own training corpus.
    ///
    /// This is an **in-sample** figure: every document was seen during fit,
    /// so it overstates how well the model generalizes. Use
    /// [`score`](Self::score) on held-out documents for that.
    pub fn training_accuracy(&self) -> Result<Float> {
        let model = self.fitted()?;
        self.score(&model.training)
    }
}

/// Index of the first maximal score.
fn argmax(scores: &[CategoryScore]) -> Result<usize> {
    let mut best: Option<usize> = None;
    for (i, s) in scores.iter().enumerate() {
        match best {
            Some(b) if s.score <= scores[b].score => {}
            _ => best = Some(i),
        }
    }
    best.ok_or(DoclassError::EmptyTrainingData)
}
