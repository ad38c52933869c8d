use std::path::PathBuf;

use semtpl_core::{ConvertOutcome, RoutedTables};
use semtpl_output::OutputFormat;

#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub outcome: ConvertOutcome,
}

#[derive(Debug)]
pub struct InspectResult {
    pub input: PathBuf,
    pub routed: RoutedTables,
}
