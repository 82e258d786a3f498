use anyhow::Result;

fn main() -> Result<()> {
    indexinfo_cli::main_entry()
}
