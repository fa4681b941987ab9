//! Document I/O operations

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    log::info!(
        "Loaded {} ({} pages)",
        path.display(),
        doc.get_pages().len()
    );
    Ok(doc)
}

/// Save the edited document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, OrganizeError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Number of pages in the document's page tree
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}
