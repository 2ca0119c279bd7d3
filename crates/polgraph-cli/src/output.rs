//! Terminal output formatting.

use colored::Colorize;
use polgraph_core::person::model::PoliticalPerson;
use polgraph_graph::IngestReport;
use unicode_width::UnicodeWidthStr;

/// Print the summary of an ingestion run.
pub fn print_ingest_report(report: &IngestReport, dry_run: bool) {
    for failure in &report.failures {
        println!("{} Skipped record: {}", "warning:".yellow(), failure);
    }

    if !report.failures.is_empty() {
        println!();
    }

    if dry_run {
        println!(
            "{} Validated {} record(s) (dry run).",
            "✓".green().bold(),
            report.succeeded
        );
    } else {
        println!(
            "{} Ingested {} record(s) into Neo4j.",
            "✓".green().bold(),
            report.succeeded
        );
    }

    if report.failed > 0 {
        println!(
            "{} {} record(s) failed validation or ingestion.",
            "note:".cyan(),
            report.failed
        );
    }
}

/// Print persons as a table.
pub fn print_persons_table(persons: &[PoliticalPerson]) {
    if persons.is_empty() {
        println!("{}", "No political persons found.".dimmed());
        return;
    }

    println!(
        "{} {} {} {}",
        pad_right("ID", 10),
        pad_right("Name", 28),
        pad_right("Role", 15),
        "Affiliation"
    );
    println!("{}", "─".repeat(75));

    for person in persons {
        let id = person.id.as_deref().unwrap_or("-");
        let role = person.role.map(|r| r.as_str()).unwrap_or("-");

        println!(
            "{} {} {} {}",
            pad_right(&truncate(id, 8), 10).dimmed(),
            pad_right(&truncate(&person.name, 26), 28),
            pad_right(role, 15).yellow(),
            person.affiliation.as_deref().unwrap_or("").dimmed()
        );
    }

    println!();
    println!("{} person(s) total", persons.len());
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string to a visual width, marking the cut with "..".
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 2 {
        return ".".repeat(max_width);
    }

    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
