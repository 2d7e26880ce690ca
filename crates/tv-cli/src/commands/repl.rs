use std::io::{self, BufRead, Write};

use colored::Colorize;
use miette::IntoDiagnostic;

use crate::session::{Session, TableOptions, print_turn};

pub async fn run(options: TableOptions) -> miette::Result<()> {
    let mut session = Session::open(options)?;

    println!("  {} {}", "Tavern".bold(), session.dispatcher().namespace().description());
    println!("  输入 .help 查看指令，quit 退出。\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().into_diagnostic()?;

        line.clear();
        if reader.read_line(&mut line).into_diagnostic()? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        match session.run_line(input).await {
            Ok(turn) if !turn.handled && turn.emissions.is_empty() => {
                println!("{}\n", "不是指令，指令以 . 开头".yellow());
            }
            Ok(turn) => {
                print_turn(&turn);
                println!();
            }
            Err(e) => println!("{}\n", format!("{e:?}").red()),
        }
    }

    Ok(())
}
