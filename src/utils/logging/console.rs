//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use itertools::Itertools;

use crate::models::PatientRecord;
use crate::query::PaginationMeta;

const HEADERS: [&str; 6] = ["ID", "Name", "Age", "Medical Issue", "Phone", "Email"];
const MISSING: &str = "-";

/// Render a page of patients as a fixed-width table followed by a pagination line
#[must_use]
pub fn format_patient_table(patients: &[&PatientRecord], pagination: &PaginationMeta) -> String {
    let rows: Vec<[String; 6]> = patients
        .iter()
        .map(|p| {
            let contact = p.primary_contact();
            [
                p.patient_id.to_string(),
                p.patient_name.clone(),
                p.age.to_string(),
                p.medical_issue.clone(),
                contact.number.clone().unwrap_or_else(|| MISSING.to_string()),
                contact.email.clone().unwrap_or_else(|| MISSING.to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![
        render_row(HEADERS.iter().copied(), &widths),
        widths.iter().map(|&w| "-".repeat(w)).join("  "),
    ];
    lines.extend(
        rows.iter()
            .map(|row| render_row(row.iter().map(String::as_str), &widths)),
    );
    if rows.is_empty() {
        lines.push("(no patients on this page)".to_string());
    }
    lines.push(pagination_footer(pagination));
    lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .join("  ")
        .trim_end()
        .to_string()
}

/// Page position plus the `--page` values that lead to neighbouring pages
fn pagination_footer(pagination: &PaginationMeta) -> String {
    let mut footer = format!(
        "Page {} of {} ({} matching patients, {} per page)",
        pagination.page, pagination.total_pages, pagination.total, pagination.limit
    );
    let mut hints = Vec::new();
    if pagination.has_previous() {
        // Past the end, step back to the last page rather than page - 1
        let previous = (pagination.page as usize - 1).min(pagination.total_pages);
        hints.push(format!("previous: --page {previous}"));
    }
    if pagination.has_next() {
        hints.push(format!("next: --page {}", pagination.page + 1));
    }
    if !hints.is_empty() {
        footer.push_str("; ");
        footer.push_str(&hints.join(", "));
    }
    footer
}
