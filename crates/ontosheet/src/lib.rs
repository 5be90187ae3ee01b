//! Ontosheet - flatten OBO ontologies into visually banded XLSX class
//! reports.
//!
//! Parsing, flattening, and worksheet export for ontology class reports.
//! The hierarchy under a chosen term is walked depth-first; every level
//! alternates between plain and filled rows, and sibling groups are
//! separated by blank lines, so the sheet stays readable without a tree
//! widget.

pub mod config;

mod error;
mod export;
mod flatten;
mod row;

pub use ontosheet_core::{graph, ontology, term};
pub use ontosheet_parser::ParseError;

pub use error::OntosheetError;
pub use flatten::{Flattener, RowEvent, descendant_listing};
pub use row::{COLUMN_HEADERS, FlattenedRow};

use std::path::Path;

use log::{debug, info, warn};

use ontosheet_core::{graph::TermIdx, ontology::Ontology};

use config::AppConfig;

/// How the hierarchy is projected onto rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// The banded depth-first walk: one row per path to a term, bands
    /// alternating per level, blank lines between sibling groups.
    #[default]
    Banded,
    /// The deduplicated listing: one plain row per reachable term.
    Flat,
}

/// Builder for parsing ontologies and writing their reports.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use ontosheet::{ReportBuilder, ReportMode, config::AppConfig};
///
/// let source = std::fs::read_to_string("hp.obo").expect("Failed to read");
///
/// let builder = ReportBuilder::new(AppConfig::default());
/// let ontology = builder.parse(&source).expect("Failed to parse");
///
/// let root = builder.resolve_start(&ontology, Some("HP:0000118"));
/// builder
///     .write_report(
///         &ontology,
///         root,
///         "hp.obo",
///         ReportMode::Banded,
///         Path::new("hp.obo.xlsx"),
///     )
///     .expect("Failed to write report");
/// ```
#[derive(Default)]
pub struct ReportBuilder {
    config: AppConfig,
}

impl ReportBuilder {
    /// Create a new report builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse OBO source text into an ontology.
    ///
    /// # Errors
    ///
    /// Returns `OntosheetError::Parse` with the offending source attached
    /// when the text is malformed or its hierarchy does not validate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ontosheet::{OntosheetError, ReportBuilder};
    ///
    /// fn main() -> Result<(), OntosheetError> {
    ///     let builder = ReportBuilder::default();
    ///     let ontology = builder.parse("[Term]\nid: EX:1\nname: root\n")?;
    ///     assert_eq!(ontology.graph().len(), 1);
    ///     Ok(())
    /// }
    /// ```
    pub fn parse(&self, source: &str) -> Result<Ontology, OntosheetError> {
        info!("Parsing ontology");

        let ontology = ontosheet_parser::parse(source)
            .map_err(|err| OntosheetError::new_parse_error(err, source))?;

        debug!(
            terms = ontology.graph().len();
            "Ontology parsed successfully"
        );
        Ok(ontology)
    }

    /// Picks the term the report starts from.
    ///
    /// A selector is trimmed and resolved against primary identifiers
    /// first, then against alternative identifiers. When it is absent,
    /// blank, or unknown, the report covers the whole ontology from its
    /// root; an unknown selector additionally logs a warning rather than
    /// failing, so a typo still produces a usable report.
    pub fn resolve_start(&self, ontology: &Ontology, selector: Option<&str>) -> TermIdx {
        let graph = ontology.graph();
        if let Some(raw) = selector {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                if let Some(idx) = graph.resolve(trimmed) {
                    debug!(class = trimmed; "Report starts below the selected class");
                    return idx;
                }
                warn!(
                    class = trimmed;
                    "The selected class could not be found in the ontology; reporting from the root instead"
                );
            }
        }
        graph.root()
    }

    /// Returns the banded walk over `ontology`, starting at `start`.
    ///
    /// This is the row stream [`write_report`](Self::write_report)
    /// consumes; it is exposed so callers can inspect or re-target the
    /// flattening themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use ontosheet::{OntosheetError, ReportBuilder, RowEvent};
    ///
    /// fn main() -> Result<(), OntosheetError> {
    ///     let builder = ReportBuilder::default();
    ///     let ontology = builder.parse(
    ///         "[Term]\nid: EX:1\nname: root\n\n[Term]\nid: EX:2\nname: leaf\nis_a: EX:1\n",
    ///     )?;
    ///
    ///     let events: Vec<RowEvent> = builder
    ///         .flatten(&ontology, ontology.graph().root())
    ///         .collect();
    ///     assert_eq!(events.len(), 3); // root row, banded leaf row, gap
    ///     Ok(())
    /// }
    /// ```
    pub fn flatten<'a>(&self, ontology: &'a Ontology, start: TermIdx) -> Flattener<'a> {
        Flattener::new(ontology.graph(), start)
    }

    /// Flattens the ontology and writes the styled worksheet to `path`.
    ///
    /// `source_name` names the file the ontology came from; together with
    /// the `data-version` header it becomes the sheet title.
    ///
    /// # Errors
    ///
    /// Returns `OntosheetError::Config` when the configured style cannot
    /// be parsed, and `OntosheetError::Export` when the workbook cannot
    /// be assembled or saved.
    pub fn write_report(
        &self,
        ontology: &Ontology,
        start: TermIdx,
        source_name: &str,
        mode: ReportMode,
        path: &Path,
    ) -> Result<(), OntosheetError> {
        let style = self.config.style();
        let band_color = style
            .band_color()
            .map_err(OntosheetError::Config)?
            .unwrap_or(export::DEFAULT_BAND_COLOR);
        let column_width = style.column_width().unwrap_or(export::DEFAULT_COLUMN_WIDTH);

        let title = export::sheet_title(source_name, ontology.metadata().data_version());
        let mut writer = export::ReportWriter::new(&title, band_color, column_width)?;
        writer.write_header(&COLUMN_HEADERS)?;

        let graph = ontology.graph();
        let mut rows = 0usize;
        match mode {
            ReportMode::Banded => {
                for event in self.flatten(ontology, start) {
                    match event {
                        RowEvent::Row { term, banded } => {
                            writer.write_row(&row::emit(graph, term), banded)?;
                            rows += 1;
                        }
                        RowEvent::Gap => writer.skip_row(),
                    }
                }
            }
            ReportMode::Flat => {
                for term in descendant_listing(graph, start) {
                    writer.write_row(&row::emit(graph, term), false)?;
                    rows += 1;
                }
            }
        }

        writer.save(path)?;
        info!(rows, output_file:? = path; "Report written successfully");
        Ok(())
    }
}
