use itertools::Itertools;

use crate::{RunMetadata, StructuredSummary};

/// Human readable rendering: bold title, overview, key point bullets and conclusion.
pub fn format_summary_markdown(summary: &StructuredSummary) -> String {
    let mut output = Vec::new();

    let title = summary.title_text();
    if !title.is_empty() {
        output.push(format!("**{title}**\n"));
    }

    let overview = summary.overview_text();
    if !overview.is_empty() {
        output.push(format!("{overview}\n"));
    }

    if !summary.key_points.is_empty() {
        output.push("**Key Points:**".to_string());
        for point in &summary.key_points {
            output.push(format!("• {point}"));
        }
        output.push(String::new());
    }

    let conclusion = summary.conclusion_text();
    if !conclusion.is_empty() {
        output.push(format!("**Conclusion:**\n{conclusion}"));
    }

    output.join("\n")
}

pub fn format_summary_json(summary: &StructuredSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

/// Compact block fed to the consolidation pass for one batch summary.
pub fn format_batch_block(summary: &StructuredSummary) -> String {
    format!(
        "Title: {}\nOverview: {}\nKey Points: {}",
        summary.title_text(),
        summary.overview_text(),
        summary.key_points.iter().join(", ")
    )
}

pub fn format_metadata(metadata: &RunMetadata) -> String {
    [
        format!(
            "Transcript Length: {} chars",
            format_thousands(metadata.transcript_chars)
        ),
        format!("Chunks Created: {}", metadata.chunk_count),
        format!("Batches: {}", metadata.batch_count),
        format!(
            "API Calls Used: {}/{}",
            metadata.api_calls_used, metadata.api_calls_max
        ),
        format!("Processing Time: {:.2}s", metadata.elapsed_seconds()),
    ]
    .join("\n")
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();

    digits
        .chars()
        .enumerate()
        .fold(String::with_capacity(len + len / 3), |mut acc, (i, c)| {
            if i > 0 && (len - i) % 3 == 0 {
                acc.push(',');
            }
            acc.push(c);
            acc
        })
}
