use crate::session::Session;
use watchworthy_core::HISTORY_CAPACITY;

pub fn run(session: &Session) -> anyhow::Result<()> {
    let config_file = session.paths.config_file();
    let cache = session.cache();

    println!("watchworthy status");
    println!("  Endpoint:  {}", session.config.endpoint);
    println!(
        "  Config:    {} ({})",
        config_file.display(),
        if config_file.exists() { "loaded" } else { "defaults" }
    );
    match session.config.request_timeout() {
        Some(timeout) => println!("  Timeout:   {}s", timeout.as_secs()),
        None => println!("  Timeout:   none"),
    }
    println!("  History:   {}", session.history_location());
    println!("  Entries:   {}/{}", cache.len(), HISTORY_CAPACITY);

    Ok(())
}
