use colored::Colorize;

use crate::session::{Session, TableOptions, print_turn};

pub async fn run(options: TableOptions, lines: &[String]) -> miette::Result<()> {
    let mut session = Session::open(options)?;
    for line in lines {
        let turn = session.run_line(line).await?;
        if !turn.handled && turn.emissions.is_empty() {
            eprintln!("{}", format!("不是指令：{line}").yellow());
        }
        print_turn(&turn);
    }
    Ok(())
}
