//! Document parser: markup tokens to an in-memory [`Catalog`].
//!
//! # Invariants
//!
//! 1. **Tolerant where the data is advisory**: missing locations, unknown
//!    elements, and unparsable line attributes never fail a load.
//!
//! 2. **Strict where the model requires it**: a message without a
//!    `<source>`, a context without a `<name>`, and structurally broken
//!    markup are errors carrying the offending line.
//!
//! 3. **Duplicates are last-wins, never fatal**: a repeated
//!    (source, disambiguation) within one context keeps the later entry and
//!    produces one diagnostic.

use lingua_catalog::{Catalog, MessageEntry, TranslationStatus};

use crate::xml::{XmlError, XmlScanner, XmlToken};

/// A non-fatal problem found while building the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Two Finished/Unfinished entries shared (source, disambiguation)
    /// within one context; the later entry was kept.
    DuplicateMessage {
        /// Owning context.
        context: String,
        /// Shared source text.
        source: String,
        /// Line of the surviving `<message>` element.
        line: u32,
    },
}

/// A parsed catalog plus the diagnostics produced while building it.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The built catalog.
    pub catalog: Catalog,
    /// Non-fatal diagnostics, in document order.
    pub warnings: Vec<LoadWarning>,
}

/// Parse a complete `.ts` document.
pub fn parse_document(input: &str) -> Result<ParseOutcome, XmlError> {
    let mut scanner = XmlScanner::new(input);
    let root = next_significant(&mut scanner)?
        .ok_or_else(|| XmlError::new(scanner.token_line(), "empty document"))?;
    let (language, root_closed) = match root {
        XmlToken::Open {
            name,
            attrs,
            self_closing,
        } if name == "TS" => (
            attr(&attrs, "language").unwrap_or_default().to_string(),
            self_closing,
        ),
        _ => {
            return Err(XmlError::new(
                scanner.token_line(),
                "expected <TS> root element",
            ));
        }
    };

    let mut catalog = Catalog::new(language);
    let mut warnings = Vec::new();
    if root_closed {
        return Ok(ParseOutcome { catalog, warnings });
    }

    loop {
        match next_significant(&mut scanner)? {
            Some(XmlToken::Open {
                name,
                self_closing,
                ..
            }) => {
                if name == "context" && !self_closing {
                    parse_context(&mut scanner, &mut catalog, &mut warnings)?;
                } else if !self_closing {
                    skip_element(&mut scanner)?;
                }
            }
            Some(XmlToken::Close(name)) if name == "TS" => break,
            Some(XmlToken::Close(name)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    format!("unexpected </{name}>"),
                ));
            }
            Some(XmlToken::Text(_)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected character data at document level",
                ));
            }
            None => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected end of input, <TS> not closed",
                ));
            }
        }
    }
    Ok(ParseOutcome { catalog, warnings })
}

fn parse_context(
    scanner: &mut XmlScanner<'_>,
    catalog: &mut Catalog,
    warnings: &mut Vec<LoadWarning>,
) -> Result<(), XmlError> {
    let context_line = scanner.token_line();
    let mut name: Option<String> = None;
    let mut pending: Vec<(MessageEntry, u32)> = Vec::new();
    loop {
        match next_significant(scanner)? {
            Some(XmlToken::Open {
                name: element,
                self_closing,
                ..
            }) => match element.as_str() {
                "name" => {
                    name = Some(if self_closing {
                        String::new()
                    } else {
                        read_element_text(scanner, "name")?
                    });
                }
                "message" if !self_closing => pending.push(parse_message(scanner)?),
                _ => {
                    if !self_closing {
                        skip_element(scanner)?;
                    }
                }
            },
            Some(XmlToken::Close(element)) if element == "context" => break,
            Some(XmlToken::Close(element)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    format!("unexpected </{element}> inside <context>"),
                ));
            }
            Some(XmlToken::Text(_)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected character data inside <context>",
                ));
            }
            None => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected end of input inside <context>",
                ));
            }
        }
    }
    let name = name.ok_or_else(|| XmlError::new(context_line, "context missing <name>"))?;

    let strings = catalog.context_mut(&name);
    for (entry, line) in pending {
        let source = entry.source.clone();
        if strings.insert(entry).is_some() {
            tracing::warn!(
                context = %name,
                source = %source,
                line,
                "duplicate message entry; keeping the later one"
            );
            warnings.push(LoadWarning::DuplicateMessage {
                context: name.clone(),
                source,
                line,
            });
        }
    }
    Ok(())
}

fn parse_message(scanner: &mut XmlScanner<'_>) -> Result<(MessageEntry, u32), XmlError> {
    let message_line = scanner.token_line();
    let mut source: Option<String> = None;
    let mut translation = String::new();
    let mut status = TranslationStatus::Finished;
    let mut disambiguation: Option<String> = None;
    let mut extra_comment: Option<String> = None;
    let mut locations: Vec<(String, u32)> = Vec::new();

    loop {
        match next_significant(scanner)? {
            Some(XmlToken::Open {
                name,
                attrs,
                self_closing,
            }) => match name.as_str() {
                "location" => {
                    let filename = attr(&attrs, "filename").unwrap_or_default().to_string();
                    // Locations are advisory; an unparsable line number
                    // degrades to 0 rather than failing the load.
                    let line = attr(&attrs, "line")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(0);
                    locations.push((filename, line));
                    if !self_closing {
                        skip_element(scanner)?;
                    }
                }
                "source" => {
                    source = Some(if self_closing {
                        String::new()
                    } else {
                        read_element_text(scanner, "source")?
                    });
                }
                "translation" => {
                    match attr(&attrs, "type") {
                        Some("unfinished") => status = TranslationStatus::Unfinished,
                        Some("vanished" | "obsolete") => status = TranslationStatus::Vanished,
                        _ => {}
                    }
                    if !self_closing {
                        translation = read_element_text(scanner, "translation")?;
                    }
                }
                "comment" => {
                    disambiguation = Some(if self_closing {
                        String::new()
                    } else {
                        read_element_text(scanner, "comment")?
                    });
                }
                "extracomment" => {
                    extra_comment = Some(if self_closing {
                        String::new()
                    } else {
                        read_element_text(scanner, "extracomment")?
                    });
                }
                _ => {
                    if !self_closing {
                        skip_element(scanner)?;
                    }
                }
            },
            Some(XmlToken::Close(name)) if name == "message" => break,
            Some(XmlToken::Close(name)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    format!("unexpected </{name}> inside <message>"),
                ));
            }
            Some(XmlToken::Text(_)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected character data inside <message>",
                ));
            }
            None => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected end of input inside <message>",
                ));
            }
        }
    }

    let source = source.ok_or_else(|| XmlError::new(message_line, "message missing <source>"))?;
    // An approved entry without a body has nothing to display; treat it as
    // awaiting translation.
    if status == TranslationStatus::Finished && translation.is_empty() {
        status = TranslationStatus::Unfinished;
    }
    let mut entry = MessageEntry::new(source)
        .with_translation(translation)
        .with_status(status);
    entry.disambiguation = disambiguation;
    entry.extra_comment = extra_comment;
    for (filename, line) in locations {
        entry.push_location(filename, line);
    }
    Ok((entry, message_line))
}

/// Collect the character data of an element, dropping nested markup.
fn read_element_text(scanner: &mut XmlScanner<'_>, element: &str) -> Result<String, XmlError> {
    let mut text = String::new();
    loop {
        match scanner.next_token()? {
            Some(XmlToken::Text(t)) => text.push_str(&t),
            Some(XmlToken::Open { self_closing, .. }) => {
                if !self_closing {
                    skip_element(scanner)?;
                }
            }
            Some(XmlToken::Close(name)) if name == element => return Ok(text),
            Some(XmlToken::Close(name)) => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    format!("expected </{element}>, found </{name}>"),
                ));
            }
            None => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    format!("unterminated <{element}>"),
                ));
            }
        }
    }
}

/// Consume tokens until the element opened just before this call closes.
fn skip_element(scanner: &mut XmlScanner<'_>) -> Result<(), XmlError> {
    let mut depth = 1u32;
    loop {
        match scanner.next_token()? {
            Some(XmlToken::Open { self_closing, .. }) => {
                if !self_closing {
                    depth += 1;
                }
            }
            Some(XmlToken::Close(_)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Some(XmlToken::Text(_)) => {}
            None => {
                return Err(XmlError::new(
                    scanner.token_line(),
                    "unexpected end of input inside skipped element",
                ));
            }
        }
    }
}

/// Next token that is not whitespace-only character data.
fn next_significant(scanner: &mut XmlScanner<'_>) -> Result<Option<XmlToken>, XmlError> {
    loop {
        match scanner.next_token()? {
            Some(XmlToken::Text(t)) if t.chars().all(char::is_whitespace) => {}
            other => return Ok(other),
        }
    }
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
