use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use report_core::NavigationTarget;

use crate::cli::core::{CliError, CommandError, LoopControl};
use crate::cli::output::info as output_info;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::cli::ticker::{AutosaveTicker, DEFAULT_TICK_INTERVAL};

/// Set to run commands from stdin without prompts or confirmations.
pub const SCRIPT_ENV_VAR: &str = "EXECUTION_REPORT_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV_VAR).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(context),
        CliMode::Script => run_script(&mut context),
    }
}

/// Reads commands with rustyline while a ticker keeps the autosave deadline
/// honoured between keystrokes.
fn run_interactive(context: ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Type `help` for commands. Select a facility and period, then `continue`.");

    let shared = Arc::new(Mutex::new(context));
    let polled = Arc::clone(&shared);
    let mut ticker = AutosaveTicker::spawn(DEFAULT_TICK_INTERVAL, move || {
        lock(&polled).poll();
    })?;

    let result = read_commands(&mut editor, &shared);
    ticker.stop();
    result
}

fn read_commands(
    editor: &mut Editor<CommandHelper, DefaultHistory>,
    shared: &Mutex<ShellContext>,
) -> Result<(), CliError> {
    loop {
        let prompt = {
            let context = lock(shared);
            if !context.running {
                break;
            }
            context.prompt()
        };
        let line = editor.readline(&prompt);
        let mut context = lock(shared);
        match line {
            Ok(line) => {
                context.poll();
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(&mut context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => match context.request_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err)?,
            },
            Err(ReadlineError::Eof) => {
                context.session.leave(&NavigationTarget::Unload, true);
                context.flush_notices();
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Poisoning is ignored; the context stays usable after a panicking command.
fn lock(shared: &Mutex<ShellContext>) -> MutexGuard<'_, ShellContext> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        context.poll();
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => return Ok(()),
            Err(err) => context.report_error(err)?,
        }
    }
    // End of input leaves the report the same way `exit` does.
    if context.running && !context.session.is_closed() {
        context.request_exit()?;
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.report_error(CommandError::InvalidArguments(err.to_string())).ok();
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        // Only the command word is completed.
        if !prefix[..start].trim().is_empty() {
            return Ok((start, Vec::new()));
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
