use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;

pub fn run() -> miette::Result<()> {
    let namespace = tv_coc7::namespace().into_diagnostic()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Command", "Aliases", "Description", "Usage"]);

    for command in namespace.commands() {
        let info = command.info();
        let aliases = if info.aliases.is_empty() {
            "-".to_string()
        } else {
            info.aliases.join(", ")
        };
        table.add_row(vec![
            format!(".{}", info.name),
            aliases,
            info.description.clone(),
            info.usage.clone(),
        ]);
    }

    println!("{}", namespace.description());
    println!("{table}");
    println!();
    println!("  {} commands", namespace.commands().len());

    Ok(())
}
