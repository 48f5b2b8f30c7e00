//! Boxed text tables.
use std::fmt;

/// A table with a header row, rendered as an ASCII grid with every cell centered in its column.
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        Table { header, rows }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell.chars().count()).collect();
        for row in self.rows.iter() {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

fn write_separator(f: &mut fmt::Formatter, widths: &[usize]) -> fmt::Result {
    for &width in widths {
        write!(f, "+{}", "-".repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_row(f: &mut fmt::Formatter, widths: &[usize], row: &[String]) -> fmt::Result {
    for (&width, cell) in widths.iter().zip(row.iter()) {
        write!(f, "| {:^width$} ", cell, width = width)?;
    }
    writeln!(f, "|")
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let widths = self.widths();

        write_separator(f, &widths)?;
        write_row(f, &widths, &self.header)?;
        write_separator(f, &widths)?;

        if !self.rows.is_empty() {
            for row in self.rows.iter() {
                write_row(f, &widths, row)?;
            }
            write_separator(f, &widths)?;
        }

        Ok(())
    }
}
