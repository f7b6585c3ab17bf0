//! Advisory HTML checks
//!
//! A lightweight structural check run on markup assets before they are
//! copied. Findings are reported but never stop the copy; only a failure to
//! run the check at all does (see [`super::copier`]).

use crate::infra::FileSystem;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Elements that never take a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is raw text and must not be scanned for tags
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!([^>]*)>|<(/?)([A-Za-z][A-Za-z0-9-]*)(?:\s[^>]*)?>")
        .expect("tag pattern is valid")
});

/// A single finding of the markup check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupIssue {
    /// 1-based line the finding points at
    pub line: usize,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for MarkupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Findings of one markup check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupReport {
    /// Issues in document order
    pub issues: Vec<MarkupIssue>,
}

impl MarkupReport {
    /// True when the document passed without findings
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The check could not run
#[derive(Error, Debug)]
pub enum MarkupError {
    /// The file could not be read
    #[error("Cannot read {} for markup check", path.display())]
    Read {
        /// Markup file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// The file is not valid UTF-8
    #[error("{} is not valid UTF-8", path.display())]
    NotUtf8 {
        /// Markup file
        path: PathBuf,
    },
}

/// Whether a path names an HTML document
pub fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Read and check a markup file
pub fn check_markup_file<FS: FileSystem>(
    fs: &FS,
    path: &Path,
) -> Result<MarkupReport, MarkupError> {
    let bytes = fs.read(path).map_err(|source| MarkupError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let html = String::from_utf8(bytes).map_err(|_| MarkupError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(check_markup(&html))
}

/// Check a document for a doctype and balanced element nesting
pub fn check_markup(html: &str) -> MarkupReport {
    let mut issues = Vec::new();
    let mut open: Vec<(String, usize)> = Vec::new();
    let mut seen_doctype = false;
    let mut seen_element = false;
    let mut pos = 0;

    let mut lines = LineCounter::new(html);

    while let Some(caps) = TAG_RE.captures_at(html, pos) {
        let whole = caps.get(0).expect("group 0 always matches");
        pos = whole.end();

        if let Some(decl) = caps.get(1) {
            let is_doctype = decl
                .as_str()
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("doctype");
            if is_doctype && !seen_element {
                seen_doctype = true;
            }
            continue;
        }

        let Some(name) = caps.get(3) else {
            // comment
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        let closing = caps.get(2).is_some_and(|m| !m.as_str().is_empty());
        let line = lines.line_at(whole.start());

        if !seen_element {
            seen_element = true;
            if !seen_doctype {
                issues.push(MarkupIssue {
                    line: 1,
                    message: "missing <!DOCTYPE html> declaration".to_string(),
                });
            }
        }

        if closing {
            close_element(&mut open, &mut issues, &name, line);
            continue;
        }

        if VOID_ELEMENTS.contains(&name.as_str()) || whole.as_str().ends_with("/>") {
            continue;
        }

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let terminator = format!("</{}", name);
            match find_ascii_case_insensitive(&html[pos..], &terminator) {
                Some(offset) => {
                    // resume at the closing tag itself so it pops normally
                    pos += offset;
                }
                None => {
                    issues.push(MarkupIssue {
                        line,
                        message: format!("<{}> opened here is never closed", name),
                    });
                    pos = html.len();
                    continue;
                }
            }
        }

        open.push((name, line));
    }

    if !seen_element && !seen_doctype {
        issues.push(MarkupIssue {
            line: 1,
            message: "missing <!DOCTYPE html> declaration".to_string(),
        });
    }

    for (name, line) in open {
        issues.push(MarkupIssue {
            line,
            message: format!("<{}> opened here is never closed", name),
        });
    }

    MarkupReport { issues }
}

/// 1-based line lookup for offsets visited in increasing order
struct LineCounter<'a> {
    html: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        debug_assert!(offset >= self.offset);
        self.line += self.html[self.offset..offset].matches('\n').count();
        self.offset = offset;
        self.line
    }
}

fn close_element(
    open: &mut Vec<(String, usize)>,
    issues: &mut Vec<MarkupIssue>,
    name: &str,
    line: usize,
) {
    let Some(index) = open.iter().rposition(|(candidate, _)| candidate == name) else {
        issues.push(MarkupIssue {
            line,
            message: format!("</{}> has no matching opening tag", name),
        });
        return;
    };

    for (unclosed, opened_on) in open.drain(index + 1..) {
        issues.push(MarkupIssue {
            line: opened_on,
            message: format!(
                "<{}> is not closed before </{}> on line {}",
                unclosed, name, line
            ),
        });
    }
    open.pop();
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
