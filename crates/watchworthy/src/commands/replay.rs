use crate::session::Session;

/// Show a cached analysis without contacting the service
pub fn run(session: &Session, index: usize, json: bool) -> anyhow::Result<()> {
    let cache = session.cache();
    let entry = cache.replay(index)?;

    eprintln!("Replaying {}", entry.query.url);
    super::print_document(&entry.document, json)
}
