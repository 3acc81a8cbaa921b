use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::storage::{FlatFileStorage, StorageBackend};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "save",
            "Write every expense to the ledger file, replacing its contents",
            "save [path]",
            cmd_save,
        ),
        CommandDefinition::new(
            "load",
            "Replace the session with the contents of the ledger file",
            "load [path]",
            cmd_load,
        ),
    ]
}

fn storage_for(context: &ShellContext, args: &[&str]) -> FlatFileStorage {
    match args.first() {
        Some(path) => context.config.storage_at(*path),
        None => context.config.storage(),
    }
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let storage = storage_for(context, args);
    storage.save(&context.ledger)?;
    context.dirty = false;
    context.mark_readable(storage.path());
    output::success(format!(
        "Saved {} expense(s) to {}.",
        context.ledger.len(),
        storage.path().display()
    ));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.dirty && !context.confirm("Discard unsaved changes and load from disk?")? {
        output::info("Load cancelled.");
        return Ok(());
    }
    let storage = storage_for(context, args);
    // The session is only replaced once the whole file has parsed.
    let report = storage.load()?;
    let skipped = report.skipped.len();
    context.accept_report(report);
    context.mark_readable(storage.path());
    output::success(format!(
        "Loaded {} expense(s) from {}.",
        context.ledger.len(),
        storage.path().display()
    ));
    if skipped > 0 {
        output::warning(format!("{} corrupt line(s) were skipped.", skipped));
    }
    Ok(())
}
