//! Tip corpus loading: a plain-text document split on `## Title` lines.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

pub const GENERAL_TITLE: &str = "General";
pub const DEFAULT_TIP: &str = "Stay calm and reduce stimuli.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipSection {
    pub title: String,
    pub text: String,
}

impl TipSection {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// The single section used when no corpus file is available.
pub fn default_sections() -> Vec<TipSection> {
    vec![TipSection::new(GENERAL_TITLE, DEFAULT_TIP)]
}

/// Read `path`; a missing or unreadable file yields [`default_sections`].
pub fn load_sections(path: &Path) -> Vec<TipSection> {
    match fs::read_to_string(path) {
        Ok(doc) => {
            let sections = parse_sections(&doc);
            info!(target: "tips", path = %path.display(), sections = sections.len(), "tip corpus loaded");
            sections
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(target: "tips", path = %path.display(), "tip corpus missing; using default tip");
            default_sections()
        }
        Err(e) => {
            warn!(target: "tips", path = %path.display(), error = %e, "tip corpus unreadable; using default tip");
            default_sections()
        }
    }
}

/// Split a document into sections. Text before the first `## ` line (or the
/// whole document without markers) becomes the "General" section, kept only
/// when non-blank. Titled sections are kept even with an empty body.
pub fn parse_sections(doc: &str) -> Vec<TipSection> {
    let mut out = Vec::new();
    let mut title: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in doc.lines() {
        if let Some(rest) = line.strip_prefix("## ") {
            flush(&mut out, title.take(), &body);
            body.clear();
            let t = rest.trim().trim_matches('#').trim();
            title = Some(if t.is_empty() { GENERAL_TITLE.to_string() } else { t.to_string() });
        } else {
            body.push(line);
        }
    }
    flush(&mut out, title, &body);
    out
}

fn flush(out: &mut Vec<TipSection>, title: Option<String>, body: &[&str]) {
    let text = body.join("\n").trim().to_string();
    match title {
        Some(t) => out.push(TipSection::new(t, text)),
        None if !text.is_empty() => out.push(TipSection::new(GENERAL_TITLE, text)),
        None => {}
    }
}
