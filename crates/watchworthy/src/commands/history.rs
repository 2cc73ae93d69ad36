use crate::render;
use crate::session::Session;

pub fn run(session: &Session) -> anyhow::Result<()> {
    let cache = session.cache();

    if cache.is_empty() {
        println!("No recent analyses");
        return Ok(());
    }

    println!("Recent analyses (most recent first):");
    for (index, entry) in cache.entries().iter().enumerate() {
        println!("  {}", render::history_line(index, entry));
    }
    println!();
    println!("Show one again with: watchworthy replay <index>");

    Ok(())
}
