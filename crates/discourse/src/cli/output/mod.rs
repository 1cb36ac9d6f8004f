//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use discourse_analysis::{
    CooccurrenceEdge, FramingReport, TermFrequency, TfIdfScore, TopicDiagnostics, TopicSummary,
};
use serde::Serialize;

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats a section header with bold cyan styling.
fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Creates an empty table with the shared preset and header row.
fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(columns.to_vec());
    table
}

/// Right-aligned numeric cell.
fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// Right-aligned cell with a fixed number of decimals.
fn decimal(value: f64, places: usize) -> Cell {
    number(format!("{value:.places$}"))
}

/// Prints ranked TF-IDF scores, grouped by document.
pub fn print_tfidf(scores: &[TfIdfScore]) {
    println!("{}", header("TF-IDF"));
    if scores.is_empty() {
        println!("{}", dim("(no terms)"));
        return;
    }

    let mut table = table(&["Document", "Term", "Count", "TF", "IDF", "TF-IDF"]);
    let mut previous = None;
    for score in scores {
        let document = if previous == Some(&score.document) {
            String::new()
        } else {
            score.document.to_string()
        };
        previous = Some(&score.document);
        table.add_row(vec![
            Cell::new(document),
            Cell::new(&score.term),
            number(score.count),
            decimal(score.tf, 4),
            decimal(score.idf, 4),
            decimal(score.tf_idf, 4),
        ]);
    }
    println!("{table}");
}

/// Prints the top terms of each topic followed by the fit diagnostics.
pub fn print_topics(topics: &[TopicSummary], diagnostics: &TopicDiagnostics) {
    println!("{}", header("Topics"));
    let mut table = table(&["Topic", "Term", "Weight"]);
    for summary in topics {
        for (rank, term) in summary.terms.iter().enumerate() {
            let topic = if rank == 0 {
                summary.topic.to_string()
            } else {
                String::new()
            };
            table.add_row(vec![
                Cell::new(topic),
                Cell::new(&term.term),
                decimal(term.weight, 4),
            ]);
        }
    }
    println!("{table}");

    let status = if diagnostics.converged {
        dim("converged")
    } else {
        warning("not converged")
    };
    println!(
        "{} {} after {} iterations, log-likelihood {:.2}",
        subheader("Fit:"),
        status,
        diagnostics.iterations,
        diagnostics.log_likelihood
    );
}

/// Prints corpus-wide framing totals and the per-document breakdown.
pub fn print_framing(report: &FramingReport) {
    println!("{}", header("Framing"));
    if report.categories.is_empty() {
        println!("{}", dim("(no framing categories configured)"));
    }

    let total = report.classified() + report.unclassified;
    let mut totals = table(&["Category", "Tokens", "Share"]);
    for category in &report.categories {
        totals.add_row(vec![
            Cell::new(&category.category),
            number(category.count),
            decimal(share(category.count, total), 3),
        ]);
    }
    totals.add_row(vec![
        Cell::new("unclassified"),
        number(report.unclassified),
        decimal(share(report.unclassified, total), 3),
    ]);
    println!("{totals}");

    if report.documents.is_empty() || report.categories.is_empty() {
        return;
    }

    println!();
    println!("{}", subheader("Per document:"));
    let mut columns = vec!["Document"];
    columns.extend(report.categories.iter().map(|c| c.category.as_str()));
    columns.push("unclassified");
    let mut documents = table(&columns);
    for doc in &report.documents {
        let mut row = vec![Cell::new(doc.document.as_str())];
        row.extend(doc.categories.iter().map(|c| number(c.count)));
        row.push(number(doc.unclassified));
        documents.add_row(row);
    }
    println!("{documents}");
}

/// Fraction of `total` represented by `count`, zero for an empty total.
fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Prints co-occurrence edges, heaviest first.
pub fn print_graph(edges: &[CooccurrenceEdge], threshold: u64) {
    println!("{}", header("Co-occurrence"));
    if edges.is_empty() {
        println!(
            "{}",
            dim(&format!("(no word pair occurs more than {threshold} times)"))
        );
        return;
    }

    let mut table = table(&["Source", "Target", "Count"]);
    for edge in edges {
        table.add_row(vec![
            Cell::new(&edge.source),
            Cell::new(&edge.target),
            number(edge.count),
        ]);
    }
    println!("{table}");
}

/// Prints the most frequent terms across the corpus.
pub fn print_frequencies(frequencies: &[TermFrequency]) {
    println!("{}", header("Frequencies"));
    if frequencies.is_empty() {
        println!("{}", dim("(no terms)"));
        return;
    }

    let mut table = table(&["Rank", "Term", "Count"]);
    for (rank, frequency) in frequencies.iter().enumerate() {
        table.add_row(vec![
            number(rank + 1),
            Cell::new(&frequency.term),
            number(frequency.count),
        ]);
    }
    println!("{table}");
}
