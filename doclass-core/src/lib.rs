pub mod dataset;
pub mod error;
pub mod metrics;
pub mod stop_words;
pub mod text;
pub mod types;

pub use types::{Float, Label, Predictions};

pub use error::{DoclassError, Result};

pub use dataset::{Corpus, Document, Field, Table};
pub use metrics::accuracy;
pub use stop_words::{StopWords, ENGLISH_STOP_WORDS};
pub use text::{count_words, count_words_filtered, tokenize, WordCounts};
