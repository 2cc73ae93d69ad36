pub mod analyze;
pub mod history;
pub mod replay;
pub mod status;
pub mod version;

use crate::render;
use watchworthy_core::AnalysisDocument;

/// Print a document to stdout, rendered or as JSON
fn print_document(document: &AnalysisDocument, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(document)?);
    } else {
        println!("{}", render::document(document));
    }
    Ok(())
}
