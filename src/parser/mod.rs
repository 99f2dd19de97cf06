//! Tolerant line-oriented parser for unit files
//!
//! Parsing never fails. Anything that is not a well formed section header or
//! `Key=Value` line inside a section is dropped, so partially edited files
//! still produce a usable [`Document`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::models::{Directive, Document, Section, Span};

static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\[\]]+)\]$").expect("Invalid section header regex"));

/// What to do with the line after a value ending in `\`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Off,
    /// Join the next line onto the last directive's value
    Append,
    /// The continued line belongs to something we dropped
    Discard,
}

/// Parse unit file text into sections and directives.
///
/// All spans are byte offsets into `text`.
pub fn parse(text: &str) -> Document {
    let mut sections: Vec<Section> = Vec::new();
    let mut continuation = Continuation::Off;

    for (offset, line) in lines_with_offsets(text) {
        let trimmed = line.trim();

        if continuation != Continuation::Off {
            // Comments inside a continued value are skipped, the value keeps going
            if is_comment(trimmed) {
                continue;
            }
            let (segment, more) = split_continuation(trimmed);
            if continuation == Continuation::Append
                && let Some(directive) = sections
                    .last_mut()
                    .and_then(|section| section.directives.last_mut())
            {
                append_segment(&mut directive.value, segment);
            }
            if !more {
                continuation = Continuation::Off;
            }
            continue;
        }

        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }

        if trimmed.starts_with('[') {
            match SECTION_HEADER.captures(trimmed) {
                Some(captures) => {
                    let start = offset + leading_whitespace(line);
                    sections.push(Section {
                        name: captures[1].to_string(),
                        span: Span::new(start, start + trimmed.len()),
                        directives: Vec::new(),
                    });
                }
                None => trace!("Skipping malformed section header at byte {offset}"),
            }
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            trace!("Skipping line without '=' at byte {offset}");
            continue;
        };

        let key = raw_key.trim();
        let (value, more) = split_continuation(raw_value.trim());

        let section = match sections.last_mut() {
            Some(section) if !key.is_empty() => section,
            _ => {
                continuation = if more {
                    Continuation::Discard
                } else {
                    Continuation::Off
                };
                continue;
            }
        };

        let key_start = offset + leading_whitespace(raw_key);
        section.directives.push(Directive {
            key: key.to_string(),
            key_span: Span::new(key_start, key_start + key.len()),
            value: value.to_string(),
        });

        continuation = if more {
            Continuation::Append
        } else {
            Continuation::Off
        };
    }

    Document { sections }
}

/// Lines without their terminators, paired with the byte offset they start at
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut offset = text.len() - body.len();
    body.split_inclusive('\n').map(move |chunk| {
        let start = offset;
        offset += chunk.len();
        (start, chunk.trim_end_matches(['\n', '\r']))
    })
}

fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#') || trimmed.starts_with(';')
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Strip a trailing line-continuation backslash, reporting whether one was present
fn split_continuation(value: &str) -> (&str, bool) {
    match value.strip_suffix('\\') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (value, false),
    }
}

fn append_segment(value: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_directives() {
        let text = "[Unit]\nDescription=Hello Good Sir\n[Install]\nAlias=Foo\n";
        let doc = parse(text);

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].name, "Unit");
        assert_eq!(doc.sections[0].span.slice(text), "[Unit]");
        assert_eq!(doc.sections[0].directives.len(), 1);

        let description = &doc.sections[0].directives[0];
        assert_eq!(description.key, "Description");
        assert_eq!(description.value, "Hello Good Sir");
        assert_eq!(description.key_span.slice(text), "Description");

        assert_eq!(doc.sections[1].name, "Install");
        assert_eq!(doc.sections[1].directives[0].key_span.slice(text), "Alias");
    }

    #[test]
    fn test_key_span_excludes_whitespace_and_value() {
        let text = "[Service]\n   Type  =  simple  \n";
        let doc = parse(text);
        let directive = &doc.sections[0].directives[0];

        assert_eq!(directive.key, "Type");
        assert_eq!(directive.key_span.slice(text), "Type");
        assert_eq!(directive.value, "simple");
    }

    #[test]
    fn test_first_equals_is_the_delimiter() {
        let text = "[Service]\nEnvironment=FOO=bar\n";
        let doc = parse(text);
        let directive = &doc.sections[0].directives[0];

        assert_eq!(directive.key, "Environment");
        assert_eq!(directive.value, "FOO=bar");
    }

    #[test]
    fn test_directives_before_first_header_are_dropped() {
        let doc = parse("Orphan=1\n[Unit]\nDescription=x\n");

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.directive_count(), 1);
        assert_eq!(doc.sections[0].directives[0].key, "Description");
    }

    #[test]
    fn test_comments_blank_and_malformed_lines_are_skipped() {
        let text = "[Unit]\n# comment=1\n; other=2\n\nno equals here\n=novalue\n[Broken\nDescription=x\n";
        let doc = parse(text);

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].directives.len(), 1);
        assert_eq!(doc.sections[0].directives[0].key, "Description");
    }

    #[test]
    fn test_empty_header_is_malformed() {
        let doc = parse("[Unit]\n[]\nDescription=x\n");

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].directives.len(), 1);
    }

    #[test]
    fn test_header_span_with_indentation() {
        let text = "  [Service]  \nType=simple";
        let doc = parse(text);

        assert_eq!(doc.sections[0].name, "Service");
        assert_eq!(doc.sections[0].span.slice(text), "[Service]");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "[Unit]\r\nBadKey=x\r\nDescription=y\r\n";
        let doc = parse(text);
        let directives = &doc.sections[0].directives;

        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].key_span.slice(text), "BadKey");
        assert_eq!(directives[0].value, "x");
        assert_eq!(directives[1].key_span.slice(text), "Description");
    }

    #[test]
    fn test_continuation_lines_join_value() {
        let text = "[Service]\nExecStart=/bin/echo \\\n  one \\\n# note\n  two\nType=oneshot\n";
        let doc = parse(text);
        let directives = &doc.sections[0].directives;

        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].key, "ExecStart");
        assert_eq!(directives[0].value, "/bin/echo one two");
        assert_eq!(directives[1].key, "Type");
    }

    #[test]
    fn test_continuation_line_is_not_a_directive() {
        let doc = parse("[Service]\nEnvironment=A=1 \\\n  BadKey=2\n");
        let directives = &doc.sections[0].directives;

        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].value, "A=1 BadKey=2");
    }

    #[test]
    fn test_dropped_directive_continuation_is_discarded() {
        let doc = parse("Orphan=1 \\\n  Still=orphan\n[Unit]\nDescription=x\n");

        assert_eq!(doc.directive_count(), 1);
        assert_eq!(doc.sections[0].directives[0].value, "x");
    }

    #[test]
    fn test_repeated_sections_stay_separate() {
        let doc = parse("[Service]\nType=simple\n[Unit]\n[Service]\nRestart=always\n");

        let services: Vec<_> = doc.sections_named("Service").collect();
        assert_eq!(services.len(), 2);
        assert!(services[1].directive("Restart").is_some());
        assert!(services[1].directive("Type").is_none());
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let text = "\u{feff}[Unit]\nBadKey=x\n";
        let doc = parse(text);

        assert_eq!(doc.sections[0].name, "Unit");
        assert_eq!(doc.sections[0].directives[0].key_span.slice(text), "BadKey");
    }

    #[test]
    fn test_never_fails_on_garbage() {
        for text in ["", "\n\n", "[", "]", "=", "[[x]]", "\\", "[Unit]\n=\n\\\n", "\u{feff}"] {
            let _ = parse(text);
        }
    }
}
