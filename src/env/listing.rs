//! Listings
//!
//! Tabular results returned by the environment for `show`-style queries.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::fmt;

/// A header plus rows, rendered as a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Listing {
    /// Create an empty listing with the given column names
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(self.header.clone());

        for row in &self.rows {
            table.add_row(row.clone());
        }

        write!(f, "{}", table)
    }
}
