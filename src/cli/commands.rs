use std::{fs, path::PathBuf};

use report_core::{CoreError, EditState, RowEdit};
use report_domain::{Quarter, Selection};

use crate::cli::{
    core::{CommandError, CommandResult},
    help, io as cli_io, output,
    registry::{CommandEntry, CommandRegistry},
    shell_context::ShellContext,
    table,
};
use crate::utils::build_info;

pub fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in [
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("show", "Print the visible rows of the report", "show", cmd_show),
        CommandEntry::new(
            "expand",
            "Show the children of a row",
            "expand <row-id|all>",
            cmd_expand,
        ),
        CommandEntry::new(
            "collapse",
            "Hide the children of a row",
            "collapse <row-id|all>",
            cmd_collapse,
        ),
        CommandEntry::new(
            "set",
            "Enter a quarterly amount",
            "set <row-id> <q1|q2|q3|q4> <amount>",
            cmd_set,
        ),
        CommandEntry::new(
            "clear",
            "Remove a quarterly amount",
            "clear <row-id> <q1|q2|q3|q4>",
            cmd_clear,
        ),
        CommandEntry::new(
            "comment",
            "Attach a comment to a row (no text removes it)",
            "comment <row-id> [text]",
            cmd_comment,
        ),
        CommandEntry::new(
            "select",
            "Choose the facility and reporting period",
            "select facility <name> | select period <period> | select hospital <on|off> | select clear",
            cmd_select,
        ),
        CommandEntry::new(
            "continue",
            "Open the report for the current selection",
            "continue",
            cmd_continue,
        ),
        CommandEntry::new("tick", "Run a pending autosave now if it is due", "tick", cmd_tick),
        CommandEntry::new("draft", "Save a draft immediately", "draft", cmd_draft),
        CommandEntry::new("save", "Submit the report permanently", "save", cmd_save),
        CommandEntry::new(
            "export",
            "Write the report payload to a JSON file",
            "export <path>",
            cmd_export,
        ),
        CommandEntry::new("status", "Show session and build details", "status", cmd_status),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ] {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
    registry.alias("ls", "show");
    registry
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    ensure_form_visible(context)?;
    let session = &context.session;
    output::section(session.title());
    for line in table::render(session.fiscal_year(), session.visible_rows()) {
        output::plain(line);
    }
    output::plain(table::render_totals(session.rows()));
    Ok(())
}

fn cmd_expand(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = required(args, 0, "row id or `all`")?;
    if target.eq_ignore_ascii_case("all") {
        context.session.expand_all();
    } else {
        ensure_known_row(context, target)?;
        if !context.session.expanded().contains(target) {
            context.session.toggle_row(target);
        }
    }
    Ok(())
}

fn cmd_collapse(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = required(args, 0, "row id or `all`")?;
    if target.eq_ignore_ascii_case("all") {
        context.session.collapse_all();
    } else if context.session.expanded().contains(target) {
        context.session.toggle_row(target);
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_form_visible(context)?;
    let row_id = required(args, 0, "row id")?;
    let quarter = parse_quarter(required(args, 1, "quarter")?)?;
    let amount = required(args, 2, "amount")?;
    context
        .session
        .apply(RowEdit::value(row_id, quarter, amount))?;
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_form_visible(context)?;
    let row_id = required(args, 0, "row id")?;
    let quarter = parse_quarter(required(args, 1, "quarter")?)?;
    context.session.apply(RowEdit::value(row_id, quarter, ""))?;
    Ok(())
}

fn cmd_comment(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    ensure_form_visible(context)?;
    let row_id = required(args, 0, "row id")?;
    let text = args[1..].join(" ");
    context.session.apply(RowEdit::comment(row_id, text))?;
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let field = required(args, 0, "facility, period, hospital or clear")?;
    let value = args[1..].join(" ");
    let value = value.trim();
    let mut selection: Selection = context.session.selection().clone();
    match field.to_lowercase().as_str() {
        "facility" | "hc" => selection.health_center = non_empty(value),
        "period" => selection.reporting_period = non_empty(value),
        "hospital" => {
            selection.hospital_mode = match value.to_lowercase().as_str() {
                "on" | "yes" | "true" => true,
                "off" | "no" | "false" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "expected `on` or `off`, got `{other}`"
                    )))
                }
            }
        }
        "clear" => {
            selection = Selection {
                hospital_mode: selection.hospital_mode,
                ..Selection::default()
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown selection field `{other}`"
            )))
        }
    }
    let was_visible = context.session.is_form_visible();
    context.session.update_selection(selection);
    if was_visible && !context.session.is_form_visible() {
        cli_io::print_info("Selection incomplete; the report is hidden until you `continue`.");
    }
    Ok(())
}

fn cmd_continue(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.confirm_selection() {
        return Err(CommandError::FormHidden);
    }
    cli_io::print_info(context.session.title());
    Ok(())
}

fn cmd_tick(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.poll_autosave() {
        match context.session.autosave().deadline() {
            Some(deadline) => cli_io::print_info(format!(
                "Autosave pending at {}",
                deadline.format("%H:%M:%S UTC")
            )),
            None => cli_io::print_info("Nothing to autosave."),
        }
    }
    Ok(())
}

fn cmd_draft(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.save_draft()?;
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    ensure_form_visible(context)?;
    match context.session.save_permanently(&mut context.archive) {
        Ok(()) | Err(CoreError::SaveFailed(_)) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = PathBuf::from(required(args, 0, "path")?);
    let json = serde_json::to_string_pretty(&context.session.report_data())?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, json)?;
    cli_io::print_success(format!("Report exported to {}", path.display()));
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = &context.session;
    output::section("Status");
    cli_io::print_info(format!("  Session      : {}", session.id()));
    let state = match session.state() {
        EditState::Clean => "clean",
        EditState::Dirty => "unsaved changes",
    };
    cli_io::print_info(format!("  State        : {state}"));
    cli_io::print_info(format!("  Fiscal year  : {}", session.fiscal_year()));
    cli_io::print_info(format!("  Draft key    : {}", session.draft_key()));
    cli_io::print_info(format!(
        "  Autosave     : {}",
        session
            .autosave()
            .deadline()
            .map(|at| at.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "idle".to_string())
    ));
    cli_io::print_info(format!("  Data home    : {}", context.home.display()));
    cli_io::print_info(format!("  Build        : {}", build_info::current().short()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section("Version");
    for (label, value) in [
        ("CLI version", meta.version),
        ("Git hash", meta.git_hash),
        ("Git status", meta.git_status),
        ("Built at", meta.timestamp),
        ("Target", meta.target),
        ("Profile", meta.profile),
        ("Rustc", meta.rustc),
    ] {
        cli_io::print_info(format!("  {label:<12} : {value}"));
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.request_exit()? {
        Err(CommandError::ExitRequested)
    } else {
        cli_io::print_info("Staying on the report.");
        Ok(())
    }
}

fn required<'a>(args: &[&'a str], index: usize, what: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing {what}")))
}

fn parse_quarter(raw: &str) -> Result<Quarter, CommandError> {
    raw.parse()
        .map_err(|err: report_domain::UnknownQuarter| CommandError::InvalidArguments(err.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn ensure_form_visible(context: &ShellContext) -> CommandResult {
    if context.session.is_form_visible() {
        Ok(())
    } else {
        Err(CommandError::FormHidden)
    }
}

fn ensure_known_row(context: &ShellContext, row_id: &str) -> CommandResult {
    if report_domain::find_row(context.session.rows(), row_id).is_some() {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "row `{row_id}` does not exist"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lists_every_command_once() {
        let registry = registry();
        let names: Vec<_> = registry.list().iter().map(|entry| entry.name).collect();
        for expected in [
            "help", "show", "expand", "collapse", "set", "clear", "comment", "select", "continue",
            "tick", "draft", "save", "status", "exit",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
        assert!(registry.get("quit").is_some());
    }

    #[test]
    fn quarters_parse_case_insensitively() {
        assert_eq!(parse_quarter("Q3").ok(), Some(Quarter::Q3));
        assert!(matches!(
            parse_quarter("q5"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert!(matches!(
            required(&["a1"], 1, "quarter"),
            Err(CommandError::InvalidArguments(message)) if message == "missing quarter"
        ));
    }
}
