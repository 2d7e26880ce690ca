//! A local table: one investigator, an in-memory platform and a sheet file.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use miette::{IntoDiagnostic, WrapErr};
use tv_mechanics::RngDice;
use tv_rules::{
    Dispatcher, Emission, EngineConfig, MemoryPlatform, MentionedRole, RoleAbility, RoleId,
};

/// Settings taken from the command line.
pub struct TableOptions {
    pub seed: Option<u64>,
    pub sheet: Option<PathBuf>,
    pub role: i64,
    pub name: String,
    pub max_bias: u32,
}

/// What one line produced.
pub struct Turn {
    /// Whether the line ran a command to completion.
    pub handled: bool,
    /// Messages emitted while running it.
    pub emissions: Vec<Emission>,
}

pub struct Session {
    dispatcher: Dispatcher,
    platform: MemoryPlatform,
    role: MentionedRole,
    dice: RngDice,
    sheet: Option<PathBuf>,
    saved_writes: usize,
}

impl Session {
    /// Build the table, loading the sheet file if it exists.
    pub fn open(options: TableOptions) -> miette::Result<Self> {
        let mut config = EngineConfig::default().with_max_bias(options.max_bias);
        if let Some(seed) = options.seed {
            config = config.with_seed(seed);
        }
        let dice = config.dice();
        let dispatcher = tv_coc7::dispatcher(config)
            .into_diagnostic()
            .wrap_err("failed to build the coc7 ruleset")?;

        let loaded = match &options.sheet {
            Some(path) => load_sheet(path)?,
            None => None,
        };
        let mut platform = MemoryPlatform::new();
        if let Some(ability) = loaded {
            platform = platform.with_role(RoleId(options.role), ability);
        }

        Ok(Self {
            dispatcher,
            platform,
            role: MentionedRole::new(options.role, options.name),
            dice,
            sheet: options.sheet,
            saved_writes: 0,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Dispatch one line and save the sheet if it changed.
    pub async fn run_line(&mut self, line: &str) -> miette::Result<Turn> {
        let handled = self
            .dispatcher
            .dispatch(
                line,
                std::slice::from_ref(&self.role),
                &self.platform,
                &mut self.dice,
            )
            .await
            .into_diagnostic()?;
        self.persist()?;
        Ok(Turn {
            handled,
            emissions: self.platform.take_emissions(),
        })
    }

    fn persist(&mut self) -> miette::Result<()> {
        let writes = self.platform.write_count();
        if writes == self.saved_writes {
            return Ok(());
        }
        self.saved_writes = writes;
        let (Some(path), Some(ability)) = (&self.sheet, self.platform.sheet(self.role.id)) else {
            return Ok(());
        };
        save_sheet(path, &ability)?;
        tracing::debug!(path = %path.display(), role = %self.role.id, "sheet saved");
        Ok(())
    }
}

fn load_sheet(path: &Path) -> miette::Result<Option<RoleAbility>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read sheet {}", path.display()))?;
    let ability = serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid sheet {}", path.display()))?;
    tracing::debug!(path = %path.display(), "sheet loaded");
    Ok(Some(ability))
}

fn save_sheet(path: &Path, ability: &RoleAbility) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(ability).into_diagnostic()?;
    fs::write(path, json)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write sheet {}", path.display()))
}

/// Print a turn's messages. Private toasts are marked.
pub fn print_turn(turn: &Turn) {
    for emission in &turn.emissions {
        match emission {
            Emission::Reply(text) => println!("{text}"),
            Emission::Toast(text) => println!("{} {text}", "[私聊]".dimmed()),
        }
    }
}
