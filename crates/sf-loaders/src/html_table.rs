/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Candidate rows from a saved HTML screener page

use scraper::{ElementRef, Html, Selector};
use sf_models::table::{
  BASE_COLUMNS, CHANGE_COLUMN, CODE_COLUMN, CandidateRow, INDUSTRY_COLUMN, LISTING_DATE_COLUMN,
  NAME_COLUMN, PRICE_COLUMN,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::{LoaderError, LoaderResult};

/// Reads the first `<table>` of a snapshot into [`CandidateRow`]s
#[derive(Debug, Clone)]
pub struct HtmlTableReader {
  increment_rate_columns: Vec<String>,
}

impl HtmlTableReader {
  pub fn new(increment_rate_columns: Vec<String>) -> Self {
    Self { increment_rate_columns }
  }

  pub fn read_path<P: AsRef<Path>>(&self, path: P) -> LoaderResult<Vec<CandidateRow>> {
    let path = path.as_ref();
    let html = fs::read_to_string(path)
      .map_err(|e| LoaderError::IoError(format!("{}: {}", path.display(), e)))?;

    let rows = self.parse(&html)?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
  }

  /// Parse a document.
  ///
  /// Rows under `<thead>` are ignored and the first remaining row is the
  /// header. Every required column must be present by exact (trimmed) title.
  pub fn parse(&self, html: &str) -> LoaderResult<Vec<CandidateRow>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("th, td")?;

    let table = document
      .select(&table_selector)
      .next()
      .ok_or_else(|| LoaderError::InvalidData("No <table> element in document".to_string()))?;

    let mut rows = table
      .select(&row_selector)
      .filter(|row| owned_by(row, &table, "table") && !inside_thead(row))
      .map(|row| {
        row
          .select(&cell_selector)
          .filter(|cell| owned_by(cell, &row, "tr"))
          .map(cell_text)
          .collect::<Vec<_>>()
      })
      .filter(|cells| !cells.is_empty());

    let header = rows
      .next()
      .ok_or_else(|| LoaderError::InvalidData("Table has no header row".to_string()))?;
    debug!("Table header: {:?}", header);

    let layout = self.column_layout(&header)?;
    Ok(rows.map(|cells| layout.row(&cells)).collect())
  }

  fn column_layout(&self, header: &[String]) -> LoaderResult<ColumnLayout> {
    let position = |title: &str| header.iter().position(|h| h == title);

    let missing: Vec<String> = BASE_COLUMNS
      .iter()
      .map(|title| title.to_string())
      .chain(self.increment_rate_columns.iter().cloned())
      .filter(|title| position(title).is_none())
      .collect();
    if !missing.is_empty() {
      return Err(LoaderError::MissingColumns(missing));
    }

    let index = |title: &str| position(title).unwrap_or_default();
    Ok(ColumnLayout {
      code: index(CODE_COLUMN),
      name: index(NAME_COLUMN),
      price: index(PRICE_COLUMN),
      change_pct: index(CHANGE_COLUMN),
      listed_on: index(LISTING_DATE_COLUMN),
      industry: index(INDUSTRY_COLUMN),
      increment_rates: self.increment_rate_columns.iter().map(|c| index(c)).collect(),
    })
  }
}

/// Header positions of the columns a [`CandidateRow`] is built from
struct ColumnLayout {
  code: usize,
  name: usize,
  price: usize,
  change_pct: usize,
  listed_on: usize,
  industry: usize,
  increment_rates: Vec<usize>,
}

impl ColumnLayout {
  fn row(&self, cells: &[String]) -> CandidateRow {
    let cell = |idx: usize| cells.get(idx).cloned().unwrap_or_default();

    CandidateRow {
      code: cell(self.code),
      name: cell(self.name),
      price: cell(self.price),
      change_pct: cell(self.change_pct),
      listed_on: cell(self.listed_on),
      industry: cell(self.industry),
      increment_rates: self.increment_rates.iter().map(|&idx| cell(idx)).collect(),
    }
  }
}

fn selector(css: &str) -> LoaderResult<Selector> {
  Selector::parse(css).map_err(|e| LoaderError::HtmlError(format!("Bad selector {}: {:?}", css, e)))
}

fn inside_thead(row: &ElementRef<'_>) -> bool {
  row.ancestors().any(|node| node.value().as_element().is_some_and(|e| e.name() == "thead"))
}

/// Whether the closest `tag` ancestor of `element` is `owner`; keeps nested tables out
fn owned_by(element: &ElementRef<'_>, owner: &ElementRef<'_>, tag: &str) -> bool {
  element
    .ancestors()
    .filter_map(ElementRef::wrap)
    .find(|ancestor| ancestor.value().name() == tag)
    .is_some_and(|ancestor| ancestor.id() == owner.id())
}

fn cell_text(cell: ElementRef<'_>) -> String {
  let mut text = String::new();
  push_text(cell, &mut text);
  text.trim().to_string()
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
  for child in element.children() {
    if let Some(text) = child.value().as_text() {
      out.push_str(text);
    } else if let Some(child) = ElementRef::wrap(child) {
      if child.value().name() != "table" {
        push_text(child, out);
      }
    }
  }
}
