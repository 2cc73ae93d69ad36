pub fn run() -> anyhow::Result<()> {
    println!("watchworthy {}", env!("CARGO_PKG_VERSION"));
    println!("Worth the Watch? AI video summaries from the terminal");
    Ok(())
}
