//! Line-oriented parser for OBO flat files.
//!
//! This module walks the source text line by line and assembles an
//! [`Ontology`]. The grammar is small: a header of `tag: value` pairs,
//! followed by `[Stanza]` blocks whose bodies are again `tag: value`
//! pairs. Values may carry backslash escapes, trailing `!` comments,
//! and trailing `{...}` qualifier blocks. Only `[Term]` stanzas
//! contribute to the result; every other stanza kind is skipped.
//!
//! The public entry point is [`parse_document`] via [`crate::parse`].

use std::collections::HashMap;

use log::debug;
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, delimited, preceded, repeat, terminated},
    error::ModalResult,
    token::{any, none_of, rest, take_while},
};

use ontosheet_core::{
    graph::{GraphError, TermGraph, TermGraphBuilder},
    ontology::{Metadata, Ontology},
    term::{Term, TermId},
};

use crate::{error::ParseError, span::Span};

/// Where a construct was found, for later error mapping.
#[derive(Debug, Clone, Copy)]
struct Site {
    line: usize,
    span: Span,
}

/// Which part of the document the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first stanza; clauses are header tags.
    Header,
    /// Inside a `[Term]` stanza.
    Term,
    /// Inside a stanza kind the report does not use.
    Other,
}

/// Clauses of one `[Term]` stanza, collected until the stanza ends.
#[derive(Debug)]
struct TermStanza {
    site: Site,
    id: Option<TermId>,
    id_site: Site,
    name: Option<String>,
    alt_ids: Vec<TermId>,
    synonyms: Vec<String>,
    definition: Option<String>,
    obsolete: bool,
    parents: Vec<TermId>,
}

impl TermStanza {
    fn new(site: Site) -> Self {
        Self {
            site,
            id: None,
            id_site: site,
            name: None,
            alt_ids: Vec::new(),
            synonyms: Vec::new(),
            definition: None,
            obsolete: false,
            parents: Vec::new(),
        }
    }
}

pub(crate) fn parse_document(source: &str) -> Result<Ontology, ParseError> {
    let mut assembler = Assembler::new();
    let mut offset = 0;

    for (i, chunk) in source.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += chunk.len();

        let content = chunk.strip_suffix('\n').unwrap_or(chunk);
        let content = content.strip_suffix('\r').unwrap_or(content);
        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed.starts_with('!') {
            continue;
        }

        let lead = content.len() - content.trim_start().len();
        let start = line_start + lead;
        let site = Site {
            line: i + 1,
            span: Span::new(start..start + trimmed.len()),
        };
        assembler.line(trimmed, site)?;
    }

    assembler.finish()
}

/// Incremental document assembly: consumes meaningful lines and owns the
/// graph builder plus the header metadata.
struct Assembler {
    metadata: Metadata,
    builder: TermGraphBuilder,
    sites: HashMap<TermId, Site>,
    section: Section,
    pending: Option<TermStanza>,
}

impl Assembler {
    fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            builder: TermGraph::builder(),
            sites: HashMap::new(),
            section: Section::Header,
            pending: None,
        }
    }

    /// Consumes one non-blank, non-comment line.
    fn line(&mut self, trimmed: &str, site: Site) -> Result<(), ParseError> {
        if trimmed.starts_with('[') {
            let mut input = trimmed;
            let Ok(name) = stanza_header.parse_next(&mut input) else {
                return Err(ParseError::new(
                    "malformed stanza header",
                    site.span,
                    site.line,
                    "expected `[Name]`",
                    Some("stanza headers are a name in square brackets, such as `[Term]`".to_string()),
                ));
            };
            return self.stanza(name, site);
        }

        let mut input = trimmed;
        let Ok((tag, value)) = clause_line.parse_next(&mut input) else {
            return Err(ParseError::new(
                "expected a `tag: value` clause",
                site.span,
                site.line,
                "not a clause",
                Some(
                    "OBO lines are `tag: value` pairs, `[Stanza]` headers, blank lines, or `!` comments"
                        .to_string(),
                ),
            ));
        };
        self.clause(tag, value, site)
    }

    fn stanza(&mut self, name: &str, site: Site) -> Result<(), ParseError> {
        self.flush_stanza()?;
        if name == "Term" {
            self.section = Section::Term;
            self.pending = Some(TermStanza::new(site));
        } else {
            self.section = Section::Other;
        }
        Ok(())
    }

    fn clause(&mut self, tag: &str, value: &str, site: Site) -> Result<(), ParseError> {
        match self.section {
            Section::Header => {
                self.header_clause(tag, value);
                Ok(())
            }
            Section::Term => self.term_clause(tag, value, site),
            Section::Other => Ok(()),
        }
    }

    fn header_clause(&mut self, tag: &str, value: &str) {
        match tag {
            "format-version" => self.metadata.set_format_version(plain_value(value)),
            "data-version" => self.metadata.set_data_version(plain_value(value)),
            "ontology" => self.metadata.set_ontology_name(plain_value(value)),
            _ => {}
        }
    }

    fn term_clause(&mut self, tag: &str, value: &str, site: Site) -> Result<(), ParseError> {
        let Some(stanza) = self.pending.as_mut() else {
            return Ok(());
        };
        match tag {
            "id" => {
                let id = plain_value(value);
                if id.is_empty() {
                    return Err(ParseError::new(
                        "`id` clause has no identifier",
                        site.span,
                        site.line,
                        "empty id",
                        None,
                    ));
                }
                stanza.id = Some(TermId::new(id));
                stanza.id_site = site;
            }
            "name" => stanza.name = Some(plain_value(value)),
            "alt_id" => {
                let id = plain_value(value);
                if !id.is_empty() {
                    stanza.alt_ids.push(TermId::new(id));
                }
            }
            "def" => stanza.definition = Some(quoted_clause(value, tag, site)?),
            "synonym" => stanza.synonyms.push(quoted_clause(value, tag, site)?),
            "is_a" => {
                let value = plain_value(value);
                let Some(target) = value.split_whitespace().next() else {
                    return Err(ParseError::new(
                        "`is_a` clause has no target",
                        site.span,
                        site.line,
                        "empty supertype reference",
                        None,
                    ));
                };
                stanza.parents.push(TermId::new(target));
            }
            "is_obsolete" => stanza.obsolete = plain_value(value) == "true",
            _ => {}
        }
        Ok(())
    }

    /// Turns the pending stanza, if any, into a term plus its links.
    fn flush_stanza(&mut self) -> Result<(), ParseError> {
        let Some(stanza) = self.pending.take() else {
            return Ok(());
        };

        let Some(id) = stanza.id else {
            return Err(ParseError::new(
                "term stanza is missing an `id` clause",
                stanza.site.span,
                stanza.site.line,
                "stanza starts here",
                Some("every `[Term]` stanza must declare `id: <identifier>`".to_string()),
            ));
        };

        let mut term = Term::new(id.clone(), stanza.name.unwrap_or_default());
        for alt in stanza.alt_ids {
            term.push_alternative_id(alt);
        }
        for synonym in stanza.synonyms {
            term.push_synonym(synonym);
        }
        if let Some(definition) = stanza.definition {
            term.set_definition(definition);
        }
        term.set_obsolete(stanza.obsolete);

        let idx = self.builder.push_term(term).map_err(|err| match err {
            GraphError::DuplicateTerm(dup) => ParseError::new(
                format!("term `{dup}` is defined more than once"),
                stanza.id_site.span,
                stanza.id_site.line,
                "second definition here",
                Some("merge the stanzas or demote one id to an `alt_id`".to_string()),
            ),
            other => ParseError::new(
                other.to_string(),
                stanza.site.span,
                stanza.site.line,
                "in this stanza",
                None,
            ),
        })?;

        for parent in stanza.parents {
            self.builder.push_is_a(idx, parent);
        }
        self.sites.insert(id, stanza.id_site);
        Ok(())
    }

    fn finish(mut self) -> Result<Ontology, ParseError> {
        self.flush_stanza()?;
        let graph = self
            .builder
            .build()
            .map_err(|err| hierarchy_error(err, &self.sites))?;
        debug!(terms = graph.len(); "Parsed ontology");
        Ok(Ontology::new(graph, self.metadata))
    }
}

fn hierarchy_error(err: GraphError, sites: &HashMap<TermId, Site>) -> ParseError {
    let whole_file = Site {
        line: 1,
        span: Span::new(0..0),
    };
    match err {
        GraphError::Cycle(id) => {
            let site = sites.get(&id).copied().unwrap_or(whole_file);
            ParseError::new(
                format!("subclass hierarchy contains a cycle through `{id}`"),
                site.span,
                site.line,
                "this term is part of the cycle",
                Some("remove one of the `is_a` links forming the loop".to_string()),
            )
        }
        GraphError::MissingRoot => ParseError::new(
            "ontology has no non-obsolete term without supertypes to act as root",
            whole_file.span,
            whole_file.line,
            "while validating this file",
            Some("check the `is_obsolete` flags and `is_a` links".to_string()),
        ),
        other => ParseError::new(
            other.to_string(),
            whole_file.span,
            whole_file.line,
            "while validating this file",
            None,
        ),
    }
}

/// Strips the trailing comment and qualifier block, trims, and resolves
/// backslash escapes. For values that are not quoted strings.
fn plain_value(value: &str) -> String {
    unescape(strip_trailer(value).trim())
}

/// Parses the leading quoted string of a `def` or `synonym` value. The
/// xref list and scope keywords after the closing quote are dropped.
fn quoted_clause(value: &str, tag: &str, site: Site) -> Result<String, ParseError> {
    let mut input = strip_trailer(value).trim_start();
    quoted_string.parse_next(&mut input).map_err(|_| {
        ParseError::new(
            format!("expected quoted text in `{tag}` clause"),
            site.span,
            site.line,
            "this clause",
            Some(format!(
                "the text must be wrapped in double quotes: `{tag}: \"...\"`"
            )),
        )
    })
}

/// Cuts the value at the first unescaped `!` (trailing comment) or `{`
/// (trailing qualifier block) that sits outside quoted text.
fn strip_trailer(value: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '!' | '{' if !in_quotes => return &value[..i],
            _ => {}
        }
    }
    value
}

/// Resolves backslash escapes outside quoted strings.
fn unescape(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(escape) => out.push(map_escape(escape)),
            None => out.push('\\'),
        }
    }
    out
}

fn map_escape(escape: char) -> char {
    match escape {
        'n' => '\n',
        't' => '\t',
        'W' => ' ',
        other => other,
    }
}

/// `[Name]`, with anything after the closing bracket left to the caller.
fn stanza_header<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('[', take_while(1.., |c: char| c != ']' && c != '['), ']').parse_next(input)
}

/// `tag: value`, where the value is the untrimmed remainder of the line.
fn clause_line<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let tag = take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    })
    .parse_next(input)?;
    let _ = ':'.parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((tag, value))
}

/// A double-quoted string with backslash escapes. Fails hard on a
/// missing closing quote.
fn quoted_string(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., alt((escaped_char, none_of(['"', '\\'])))).fold(
                String::new,
                |mut acc, ch| {
                    acc.push(ch);
                    acc
                },
            ),
            '"',
        )),
    )
    .parse_next(input)
}

fn escaped_char(input: &mut &str) -> ModalResult<char> {
    preceded('\\', any).map(map_escape).parse_next(input)
}
