pub type Float = f64;

/// Category label attached to a document.
pub type Label = String;

/// Predicted labels, one per input document.
pub type Predictions = Vec<Label>;
