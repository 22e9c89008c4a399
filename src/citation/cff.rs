//! Partial parser for the citation file (CITATION.cff)
//!
//! Only the handful of fields the metadata assembler needs are extracted:
//! a few top-level scalars, the keyword list, and the first author's name.
//! Anything else in the file is skipped, and malformed input degrades to
//! omitted fields rather than an error.

/// Bibliographic fields extracted from a citation file.
///
/// Absent fields stay `None` (or empty, for `keywords`) - nothing is
/// defaulted at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationRecord {
    pub title: Option<String>,
    pub doi: Option<String>,
    pub date_released: Option<String>,
    pub version: Option<String>,
    pub url: Option<String>,
    pub repository_code: Option<String>,
    pub license: Option<String>,
    pub abstract_text: Option<String>,
    /// First listed author as "given family"; later authors are ignored.
    pub author: Option<String>,
    /// Keyword list in source order.
    pub keywords: Vec<String>,
}

/// Line-classification state while scanning the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Inside an `abstract: >` literal block.
    Abstract,
    /// Inside a `keywords:` list.
    Keywords,
}

/// Extract a [`CitationRecord`] from raw citation-file text.
///
/// The text is processed line by line with an explicit mode switch. A line
/// that terminates a capture mode is re-inspected under normal rules rather
/// than consumed, so `license:` immediately after an abstract block is still
/// picked up. If a scalar key appears more than once, the last occurrence
/// wins.
pub fn parse_citation(text: &str) -> CitationRecord {
    let lines: Vec<&str> = text.lines().collect();

    let mut record = CitationRecord::default();
    let mut mode = Mode::Normal;
    let mut abstract_lines: Vec<&str> = Vec::new();
    let mut first_author_given: Option<String> = None;
    let mut first_author_family: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if mode == Mode::Abstract {
            if !line.starts_with("  ") && !line.trim().is_empty() && line.contains(':') {
                // Block ended; re-inspect this line in normal mode.
                commit_abstract(&mut record, &abstract_lines);
                abstract_lines.clear();
                mode = Mode::Normal;
                continue;
            }
            abstract_lines.push(line.strip_prefix("  ").unwrap_or(line));
            i += 1;
            continue;
        }

        if mode == Mode::Keywords {
            if let Some(rest) = line.trim().strip_prefix('-') {
                if let Some(keyword) = clean_scalar(rest) {
                    record.keywords.push(keyword);
                }
                i += 1;
                continue;
            }
            // First non-item line ends the list; re-inspect it.
            mode = Mode::Normal;
            continue;
        }

        let stripped = line.trim();

        if stripped.starts_with("abstract:") && stripped.ends_with('>') {
            mode = Mode::Abstract;
        } else if stripped.starts_with("keywords:") {
            mode = Mode::Keywords;
        } else if stripped.starts_with("authors:") {
            scan_first_author(
                &lines[i + 1..],
                &mut first_author_given,
                &mut first_author_family,
            );
        } else if let Some(rest) = stripped.strip_prefix("title:") {
            set_scalar(&mut record.title, rest);
        } else if let Some(rest) = stripped.strip_prefix("doi:") {
            set_scalar(&mut record.doi, rest);
        } else if let Some(rest) = stripped.strip_prefix("date-released:") {
            set_scalar(&mut record.date_released, rest);
        } else if let Some(rest) = stripped.strip_prefix("version:") {
            set_scalar(&mut record.version, rest);
        } else if let Some(rest) = stripped.strip_prefix("url:") {
            set_scalar(&mut record.url, rest);
        } else if let Some(rest) = stripped.strip_prefix("repository-code:") {
            set_scalar(&mut record.repository_code, rest);
        } else if let Some(rest) = stripped.strip_prefix("license:") {
            set_scalar(&mut record.license, rest);
        }

        i += 1;
    }

    if mode == Mode::Abstract && !abstract_lines.is_empty() {
        commit_abstract(&mut record, &abstract_lines);
    }

    let author: Vec<&str> = [first_author_given.as_deref(), first_author_family.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();
    if !author.is_empty() {
        record.author = Some(author.join(" "));
    }

    record
}

/// Scan the lines following `authors:` for the first author's names.
///
/// Stops at `preferred-citation:`, at the first unindented key line, or as
/// soon as both names are known. Only the first occurrence of each name is
/// kept, so a second author never contributes.
fn scan_first_author(lines: &[&str], given: &mut Option<String>, family: &mut Option<String>) {
    for line in lines {
        let stripped = line.trim();

        if stripped.starts_with("preferred-citation:")
            || (!stripped.is_empty() && !line.starts_with(' ') && stripped.contains(':'))
        {
            break;
        }

        // Entries are YAML list items, e.g. "- family-names: Doe".
        let key = stripped.trim_start_matches(['-', ' ']);
        if let Some(rest) = key.strip_prefix("family-names:") {
            if family.is_none() {
                *family = Some(strip_matching_quotes(rest.trim()).to_string());
            }
        }
        if let Some(rest) = key.strip_prefix("given-names:") {
            if given.is_none() {
                *given = Some(strip_matching_quotes(rest.trim()).to_string());
            }
        }

        if let (Some(g), Some(f)) = (given.as_deref(), family.as_deref()) {
            if !g.is_empty() && !f.is_empty() {
                break;
            }
        }
    }
}

fn commit_abstract(record: &mut CitationRecord, lines: &[&str]) {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    record.abstract_text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
}

/// Overwrite `field` with the cleaned value; empty values leave it untouched.
fn set_scalar(field: &mut Option<String>, raw: &str) {
    if let Some(value) = clean_scalar(raw) {
        *field = Some(value);
    }
}

/// Trim whitespace and one layer of matching quotes; `None` if nothing is left.
fn clean_scalar(raw: &str) -> Option<String> {
    let unquoted = strip_matching_quotes(raw.trim());
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_string())
    }
}

fn strip_matching_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
