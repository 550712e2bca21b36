#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DoclassError, Label, Result};

/// Identifies a table column either by header name or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name(String),
    Index(usize),
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::Name(name.to_string())
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::Name(name)
    }
}

impl From<usize> for Field {
    fn from(index: usize) -> Self {
        Field::Index(index)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name(name) => write!(f, "{}", name),
            Field::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// An already-parsed table of string cells with named columns.
///
/// Cells are `Option<String>` so that a missing value survives parsing and
/// can be reported when the corpus is extracted instead of being dropped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// - [`DoclassError::ShapeMismatch`] if the row width differs from the
    ///   number of columns.
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(DoclassError::ShapeMismatch {
                expected: format!("Expected {} cells", self.columns.len()),
                got: format!("Got {}", row.len()),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Builder-style [`push_row`](Table::push_row) for rows with no missing cells.
    pub fn with_row<I, S>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(row.into_iter().map(|s| Some(s.into())).collect())?;
        Ok(self)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Resolves a [`Field`] to a column position.
    ///
    /// # Errors
    ///
    /// - [`DoclassError::UnknownField`] if no column has that name or the
    ///   index is out of range.
    pub fn column_index(&self, field: &Field) -> Result<usize> {
        match field {
            Field::Name(name) => self
                .columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DoclassError::UnknownField(name.clone())),
            Field::Index(index) if *index < self.columns.len() => Ok(*index),
            Field::Index(_) => Err(DoclassError::UnknownField(field.to_string())),
        }
    }
}

/// One training record: a document and its category.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub category: Label,
}

impl Document {
    pub fn new(text: impl Into<String>, category: impl Into<Label>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// Ordered collection of labelled documents.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Extracts `(text, category)` records from `table`, preserving row order.
    ///
    /// Every row must carry both values. A missing cell fails the whole
    /// extraction; rows are never skipped since that would silently shift
    /// the category priors.
    ///
    /// # Errors
    ///
    /// - [`DoclassError::UnknownField`] if either field does not resolve.
    /// - [`DoclassError::MissingValue`] for the first row missing a value.
    pub fn from_table(
        table: &Table,
        text_field: impl Into<Field>,
        category_field: impl Into<Field>,
    ) -> Result<Self> {
        let text_field = text_field.into();
        let category_field = category_field.into();
        let text_col = table.column_index(&text_field)?;
        let category_col = table.column_index(&category_field)?;

        let mut documents = Vec::with_capacity(table.nrows());
        for (row, cells) in table.rows.iter().enumerate() {
            let text = cells[text_col]
                .as_ref()
                .ok_or_else(|| DoclassError::MissingValue {
                    row,
                    field: text_field.to_string(),
                })?;
            let category = cells[category_col]
                .as_ref()
                .ok_or_else(|| DoclassError::MissingValue {
                    row,
                    field: category_field.to_string(),
                })?;
            documents.push(Document::new(text.clone(), category.clone()));
        }

        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }
}

impl<T, C> FromIterator<(T, C)> for Corpus
where
    T: Into<String>,
    C: Into<Label>,
{
    fn from_iter<I: IntoIterator<Item = (T, C)>>(iter: I) -> Self {
        Self {
            documents: iter
                .into_iter()
                .map(|(text, category)| Document::new(text, category))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
