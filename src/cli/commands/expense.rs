use rust_decimal::Decimal;

use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::expense_table;
use crate::ledger::{parse_amount, BudgetStatus, Expense, ExpenseFilter};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record an expense",
            "add <date> <category> <amount> [description...]",
            cmd_add,
        ),
        CommandDefinition::new("list", "Show every expense", "list", cmd_list),
        CommandDefinition::new(
            "filter",
            "Show expenses by category and/or month",
            "filter [category <name>] [month <name>]",
            cmd_filter,
        ),
        CommandDefinition::new(
            "search",
            "Find expenses whose category or date contains text",
            "search <text>",
            cmd_search,
        ),
        CommandDefinition::new(
            "total",
            "Show the total and the budget status",
            "total",
            cmd_total,
        ),
        CommandDefinition::new(
            "summary",
            "Show totals per category",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "budget",
            "Show or set the monthly budget (0 removes it)",
            "budget [amount]",
            cmd_budget,
        ),
        CommandDefinition::new("clear", "Remove every expense", "clear", cmd_clear),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [date, category, amount, description @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <date> <category> <amount> [description...]".into(),
        ));
    };
    let description = description.join(" ");
    let added = context
        .ledger
        .add(date, category, amount, &description)?
        .clone();
    context.dirty = true;
    output::success(format!(
        "Added {} {} on {}.",
        added.category(),
        added.amount(),
        context.ledger.date_format().format(added.date())
    ));
    print_budget_status(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let filter = ExpenseFilter::new();
    show_matches(context, &filter, "Total");
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(CommandError::InvalidArguments(
            "usage: filter [category <name>] [month <name>]".into(),
        ));
    }
    let mut filter = ExpenseFilter::new().with_category_match(context.config.category_match);
    for pair in args.chunks(2) {
        match pair[0].to_ascii_lowercase().as_str() {
            "category" => filter = filter.by_category(pair[1]),
            "month" => filter = filter.in_month(pair[1]),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown filter `{}`; use `category` or `month`",
                    other
                )))
            }
        }
    }
    show_matches(context, &filter, "Subtotal");
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: search <text>".into()));
    }
    let filter = ExpenseFilter::new().containing(args.join(" "));
    show_matches(context, &filter, "Subtotal");
    Ok(())
}

fn cmd_total(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!("Total: {}", context.ledger.total()));
    match context.config.budget() {
        Some(budget) => {
            output::info(format!("Monthly budget: {}", budget.limit));
            print_budget_status(context);
        }
        None => output::hint("No monthly budget set. Use `budget <amount>` to set one."),
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.ledger.category_totals();
    if totals.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    output::section("Totals by category");
    let width = totals
        .iter()
        .map(|(category, _)| category.chars().count())
        .max()
        .unwrap_or(0);
    for (category, sum) in &totals {
        output::info(format!("  {:<width$}  {}", category, sum, width = width));
    }
    output::info(format!("Total: {}", context.ledger.total()));
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        match context.config.budget() {
            Some(budget) => output::info(format!("Monthly budget: {}", budget.limit)),
            None => output::info("No monthly budget set."),
        }
        return Ok(());
    };
    let limit = parse_amount(raw)?;
    context.config.monthly_budget = (limit > Decimal::ZERO).then_some(limit);
    context.persist_config()?;
    match context.config.monthly_budget {
        Some(limit) => output::success(format!("Monthly budget set to {}.", limit)),
        None => output::success("Monthly budget removed."),
    }
    print_budget_status(context);
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.ledger.is_empty() {
        output::info("Ledger is already empty.");
        return Ok(());
    }
    if !context.confirm("Remove every expense from this session?")? {
        output::info("Nothing removed.");
        return Ok(());
    }
    let removed = context.ledger.clear();
    context.dirty = true;
    output::success(format!("Cleared {} expense(s).", removed));
    Ok(())
}

fn show_matches(context: &ShellContext, filter: &ExpenseFilter, label: &str) {
    let matches: Vec<&Expense> = context.ledger.query(filter).collect();
    if matches.is_empty() {
        output::info("No matching expenses.");
        return;
    }
    let table = expense_table(matches.iter().copied(), context.ledger.date_format());
    println!("{}", table.render());
    output::info(format!(
        "{}: {} ({} expense(s))",
        label,
        crate::ledger::total(matches.iter().copied()),
        matches.len()
    ));
}

fn print_budget_status(context: &ShellContext) {
    let Some(budget) = context.config.budget() else {
        return;
    };
    let total = context.ledger.total();
    match budget.status(total) {
        BudgetStatus::Exceeded => output::warning(format!(
            "Budget exceeded: spent {} of {}.",
            total, budget.limit
        )),
        BudgetStatus::Ok => output::info(format!(
            "Within budget: spent {} of {}.",
            total, budget.limit
        )),
    }
}
