//! Plain-text rendering of analysis documents

use chrono::NaiveDate;
use std::fmt::Write;
use watchworthy_core::{AnalysisDocument, HistoryEntry, VideoMetadata};

const UNKNOWN: &str = "unknown";

pub fn document(doc: &AnalysisDocument) -> String {
    let mut out = String::new();
    let meta = &doc.metadata;

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", meta.title.as_deref().unwrap_or("Untitled video"));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Upload date:  {}",
        meta.upload_date.as_deref().map(upload_date).unwrap_or_else(|| UNKNOWN.into())
    );
    let _ = writeln!(out, "Uploader:     {}", uploader(meta));
    let _ = writeln!(out, "Views:        {}", count(meta.view_count));
    let _ = writeln!(out, "Likes:        {}", count(meta.like_count));
    let _ = writeln!(
        out,
        "Categories:   {}",
        categories(meta.categories.as_deref().unwrap_or_default())
    );
    if let Some(thumbnail) = &meta.thumbnail_url {
        let _ = writeln!(out, "Thumbnail:    {}", thumbnail);
    }

    if !doc.summary.people.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "People in the video");
        for person in &doc.summary.people {
            match &person.background {
                Some(background) => {
                    let _ = writeln!(out, "  - {}: {}", person.name, background);
                }
                None => {
                    let _ = writeln!(out, "  - {}", person.name);
                }
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Summary (AI-generated, interpret with caution)");
    let _ = writeln!(out);
    let _ = write!(out, "{}", doc.summary.video_summary.trim_end());

    out
}

/// One line of the history listing
pub fn history_line(index: usize, entry: &HistoryEntry) -> String {
    match &entry.document.metadata.title {
        Some(title) => format!("[{}] {}  ({})", index, title, entry.query.url),
        None => format!("[{}] {}", index, entry.query.url),
    }
}

/// `20240131` becomes `Wednesday 31 January 2024`; anything else is shown as given
fn upload_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(|date| date.format("%A %d %B %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn uploader(meta: &VideoMetadata) -> String {
    match (&meta.uploader_name, &meta.uploader_url) {
        (Some(name), Some(url)) => format!("{} ({})", name, url),
        (Some(name), None) => name.clone(),
        (None, Some(url)) => url.clone(),
        (None, None) => UNKNOWN.to_string(),
    }
}

fn categories(categories: &[String]) -> String {
    if categories.is_empty() {
        "N/A".to_string()
    } else {
        categories.join(", ")
    }
}

fn count(value: Option<u64>) -> String {
    value.map(thousands).unwrap_or_else(|| UNKNOWN.to_string())
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
