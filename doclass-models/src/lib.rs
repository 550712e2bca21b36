pub mod naive_bayes;

pub use naive_bayes::{CategoryScore, NaiveBayesConfig, NaiveBayesTextClassifier};
