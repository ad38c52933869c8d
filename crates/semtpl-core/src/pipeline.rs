//! The conversion pipeline: route, then assemble.

use semtpl_model::{ConvertOptions, Document, SourceTable};
use tracing::{info, info_span};

use crate::assemble::assemble;
use crate::error::{ConvertError, Result};
use crate::router::{RoutedTables, TableRouter};

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutcome {
    pub document: Document,
    /// Routing decisions, for reporting.
    pub routed: RoutedTables,
}

/// Converts source tables into a document with the default router.
pub fn convert(sources: Vec<SourceTable>, options: &ConvertOptions) -> Result<ConvertOutcome> {
    convert_with(&TableRouter::new(), sources, options)
}

/// Converts source tables into a document.
///
/// Fails with [`ConvertError::NoRecognizableData`] when no table could be
/// routed. A document left empty by `only_cube` filtering is still a
/// success.
pub fn convert_with(
    router: &TableRouter,
    sources: Vec<SourceTable>,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let span = info_span!("convert", tables = sources.len());
    let _guard = span.enter();

    let routed = router.route(sources);
    if routed.is_empty() {
        return Err(ConvertError::NoRecognizableData {
            tables: routed.source_count(),
        });
    }

    let document = assemble(&routed.buckets, options);
    info!(
        cubes = document.cubes.len(),
        joins = document.joins.len(),
        dimensions = document.dimensions.len(),
        measures = document.measures.len(),
        rejected = routed.rejected.len(),
        "Assembled document"
    );
    Ok(ConvertOutcome { document, routed })
}
