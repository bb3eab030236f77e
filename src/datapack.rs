use serde::{Deserialize, Serialize};

use crate::{GenErr, Result};

/// A single text pair instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub text_left: Vec<u32>,
    pub text_right: Vec<u32>,
    pub label: f32,
    pub id_left: String,
    pub id_right: String,
}

/// An in-memory table of text pairs, stored as five parallel columns.
///
/// Invariants, checked on construction:
/// - there is at least one row
/// - all five columns have the same length
/// - every left sequence has the same length, and so does every right one
#[derive(Debug, Clone)]
pub struct DataPack {
    text_left: Vec<Vec<u32>>,
    text_right: Vec<Vec<u32>>,
    label: Vec<f32>,
    id_left: Vec<String>,
    id_right: Vec<String>,
}

impl DataPack {
    /// Creates a new `DataPack` from owned columns.
    ///
    /// # Arguments
    /// * `text_left` - The left token sequences.
    /// * `text_right` - The right token sequences.
    /// * `label` - The label of each pair.
    /// * `id_left` - The identifier of each left text.
    /// * `id_right` - The identifier of each right text.
    ///
    /// # Returns
    /// An error if any of the invariants doesn't hold.
    pub fn new(
        text_left: Vec<Vec<u32>>,
        text_right: Vec<Vec<u32>>,
        label: Vec<f32>,
        id_left: Vec<String>,
        id_right: Vec<String>,
    ) -> Result<Self> {
        let expected = text_left.len();
        if expected == 0 {
            return Err(GenErr::EmptyDataPack);
        }

        let lengths = [
            ("text_right", text_right.len()),
            ("label", label.len()),
            ("id_left", id_left.len()),
            ("id_right", id_right.len()),
        ];

        for (column, got) in lengths {
            if got != expected {
                return Err(GenErr::ColumnLength {
                    column,
                    got,
                    expected,
                });
            }
        }

        check_rectangular("text_left", &text_left)?;
        check_rectangular("text_right", &text_right)?;

        Ok(Self {
            text_left,
            text_right,
            label,
            id_left,
            id_right,
        })
    }

    /// Creates a new `DataPack` from a list of rows.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        let rows = rows.into_iter();
        let (lower, _) = rows.size_hint();

        let mut text_left = Vec::with_capacity(lower);
        let mut text_right = Vec::with_capacity(lower);
        let mut label = Vec::with_capacity(lower);
        let mut id_left = Vec::with_capacity(lower);
        let mut id_right = Vec::with_capacity(lower);

        for row in rows {
            text_left.push(row.text_left);
            text_right.push(row.text_right);
            label.push(row.label);
            id_left.push(row.id_left);
            id_right.push(row.id_right);
        }

        Self::new(text_left, text_right, label, id_left, id_right)
    }

    /// Creates a new `DataPack` from a json array of row records.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<Row> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// The amount of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.label.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }

    #[inline]
    pub fn text_left(&self) -> &[Vec<u32>] {
        &self.text_left
    }

    #[inline]
    pub fn text_right(&self) -> &[Vec<u32>] {
        &self.text_right
    }

    #[inline]
    pub fn label(&self) -> &[f32] {
        &self.label
    }

    #[inline]
    pub fn id_left(&self) -> &[String] {
        &self.id_left
    }

    #[inline]
    pub fn id_right(&self) -> &[String] {
        &self.id_right
    }

    /// The common length of the left sequences.
    pub fn left_len(&self) -> usize {
        self.text_left.first().map_or(0, Vec::len)
    }

    /// The common length of the right sequences.
    pub fn right_len(&self) -> usize {
        self.text_right.first().map_or(0, Vec::len)
    }
}

fn check_rectangular(column: &'static str, texts: &[Vec<u32>]) -> Result<()> {
    let Some(first) = texts.first() else {
        return Ok(());
    };

    let expected = first.len();
    match texts.iter().position(|text| text.len() != expected) {
        Some(row) => Err(GenErr::RaggedText {
            column,
            row,
            got: texts[row].len(),
            expected,
        }),
        None => Ok(()),
    }
}
