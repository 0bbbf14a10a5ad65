use crate::error::SheetMapResult;
use crate::excel::{WorkbookReader, Worksheet};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One addressable header of a worksheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderColumn {
    pub name: String,
    /// Zero-based column position (A = 0)
    pub index: usize,
    /// Column letter as shown by spreadsheet applications
    pub letter: String,
}

/// Column letter as spreadsheet applications show it (0 → A, 26 → AA)
///
/// Bijective base 26: work on the 1-based column number, peeling off the
/// last letter each step.
pub fn column_letter(index: usize) -> String {
    let letters: Vec<char> = std::iter::successors(Some(index + 1), |&n| Some((n - 1) / 26))
        .take_while(|&n| n > 0)
        .map(|n| char::from(b'A' + ((n - 1) % 26) as u8))
        .collect();
    letters.into_iter().rev().collect()
}

/// Addressable headers of a worksheet, left to right
pub fn header_columns(worksheet: &Worksheet) -> Vec<HeaderColumn> {
    worksheet
        .column_index_map()
        .iter()
        .map(|(name, index)| HeaderColumn {
            name: name.to_string(),
            index,
            letter: column_letter(index),
        })
        .collect()
}

/// Data rows keyed by header text
///
/// Cells under no header, or under a duplicate header, are left out.
pub fn keyed_rows(worksheet: &Worksheet) -> Vec<BTreeMap<String, String>> {
    let columns = worksheet.column_index_map();

    worksheet
        .used_rows()
        .iter()
        .skip(1)
        .map(|row| {
            columns
                .iter()
                .map(|(name, index)| (name.to_string(), row.cell(index).to_string()))
                .collect()
        })
        .collect()
}

fn load_worksheet(file: &Path, sheet: &str) -> SheetMapResult<Worksheet> {
    let mut workbook = WorkbookReader::open(file)?;
    workbook.worksheet(sheet)
}

/// Execute the sheets command
pub fn sheets(file: PathBuf) -> SheetMapResult<()> {
    let workbook = WorkbookReader::open(&file)?;

    println!("{}", "📒 sheetmap - Worksheets".bold().green());
    println!("   File: {}\n", file.display());

    for (index, name) in workbook.sheet_names().iter().enumerate() {
        println!("   {}. {}", index + 1, name.bright_blue());
    }
    println!();

    Ok(())
}

/// Execute the headers command
pub fn headers(file: PathBuf, sheet: String, json: bool) -> SheetMapResult<()> {
    let worksheet = load_worksheet(&file, &sheet)?;
    let columns = header_columns(&worksheet);

    if json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
        return Ok(());
    }

    println!("{}", "📒 sheetmap - Header row".bold().green());
    println!("   File:  {}", file.display());
    println!("   Sheet: {}", worksheet.name());

    match worksheet.first_used_row() {
        Some(header) => println!("   Row:   {}\n", header.number),
        None => {
            println!("\n{}", "⚠️  Worksheet is empty".yellow());
            return Ok(());
        }
    }

    for column in &columns {
        println!(
            "   {:>4}  {}",
            column.letter.cyan(),
            column.name.bright_blue()
        );
    }
    println!();

    Ok(())
}

/// Execute the rows command
pub fn rows(file: PathBuf, sheet: String, json: bool, limit: Option<usize>) -> SheetMapResult<()> {
    let worksheet = load_worksheet(&file, &sheet)?;
    let mut records = keyed_rows(&worksheet);
    let total = records.len();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{}", "📒 sheetmap - Data rows".bold().green());
    println!("   File:  {}", file.display());
    println!("   Sheet: {}", worksheet.name());
    println!("   Rows:  {}\n", total);

    for (index, record) in records.iter().enumerate() {
        println!("   {}", format!("#{}", index + 1).bold());
        for (header, value) in record {
            if !value.is_empty() {
                println!("      {}: {}", header.cyan(), value);
            }
        }
    }

    if records.len() < total {
        println!("\n   … {} more rows", total - records.len());
    }
    println!();

    Ok(())
}
