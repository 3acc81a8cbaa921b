use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Variant;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("config", "Show the active settings", "config", cmd_config),
        CommandDefinition::new(
            "variant",
            "Switch date format, ledger file and matching rules to a preset",
            "variant <basic|advanced|enhanced>",
            cmd_variant,
        ),
    ]
}

fn cmd_config(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = context.config();
    output::section("Configuration");
    output::info(format!("  Variant        : {}", config.variant));
    output::info(format!("  Date format    : {}", config.date_format.label()));
    output::info(format!("  Ledger file    : {}", config.ledger_file.display()));
    output::info(format!("  Category match : {:?}", config.category_match));
    output::info(format!("  Load policy    : {:?}", config.load_policy));
    output::info(format!(
        "  Monthly budget : {}",
        config
            .monthly_budget
            .map(|limit| limit.to_string())
            .unwrap_or_else(|| "none".into())
    ));
    output::info(format!("  Save on exit   : {}", config.save_on_exit));
    output::info(format!(
        "  Stored at      : {}",
        context.config_manager().path().display()
    ));
    Ok(())
}

fn cmd_variant(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: variant <basic|advanced|enhanced>".into(),
        ));
    };
    let variant: Variant = raw.parse().map_err(CommandError::InvalidArguments)?;
    context.config = context.config.switched_to(variant);
    context.ledger.set_date_format(context.config.date_format);
    context.persist_config()?;
    output::success(format!(
        "Switched to the {} variant ({} dates, file {}).",
        variant,
        context.config.date_format.label(),
        context.config.ledger_file.display()
    ));
    output::hint("Use `load` to read that file into this session.");
    Ok(())
}
