use doclass::{Corpus, NaiveBayesConfig, NaiveBayesTextClassifier, Result, Table};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let table = Table::new(["text", "category"])
        .with_row(["cat sat on the mat", "pets"])?
        .with_row(["dog ran in the park", "pets"])?
        .with_row(["stocks fell on the news", "finance"])?
        .with_row(["bond yields rose", "finance"])?;

    let corpus = Corpus::from_table(&table, "text", "category")?;
    let config = NaiveBayesConfig::new().with_stop_word_filtering(true);
    let mut model = NaiveBayesTextClassifier::with_config(config);
    model.fit(&corpus)?;

    for (category, prior) in model.priors()? {
        println!("P({category}) = {prior:.3}");
    }

    for text in ["the cat ran", "yields fell", ""] {
        let (label, scores) = model.classify_with_scores(text)?;
        println!("{text:?} -> {label} {scores:?}");
    }

    println!("training accuracy (in-sample): {:.3}", model.training_accuracy()?);
    Ok(())
}
