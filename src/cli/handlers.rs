use crate::cli::commands::{ByDateArgs, ByTypeArgs, CheckArgs, Cli, Commands};
use crate::cli::output;
use crate::group::by_date::{DateOptions, group_by_date};
use crate::group::by_type::{TypeOptions, group_by_type};
use crate::io::config_io;
use crate::io::input;
use crate::model::config::Config;
use crate::ops::check;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::ByType(args) => cmd_by_type(args, &config, json),
        Commands::ByDate(args) => cmd_by_date(args, &config, json),
        Commands::Check(args) => cmd_check(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_by_type(
    args: ByTypeArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = input::load_items(&args.file)?;
    let registry = config.registry();
    let options = TypeOptions {
        lookup_set: None,
        category_order: Some(&config.grouping.category_order),
        include_orphans: config.grouping.include_orphans && !args.no_orphans,
    };
    let result = group_by_type(&items, &registry, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in output::format_type_groups(&result) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_by_date(
    args: ByDateArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = input::load_items(&args.file)?;
    let registry = config.registry();
    let options = DateOptions {
        category_order: Some(&config.grouping.category_order),
    };
    let result = group_by_date(&items, &registry, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in output::format_day_groups(&result) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_check(
    args: CheckArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = input::load_items(&args.file)?;
    let registry = config.registry();
    let result = check::check_items(&items, &registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in output::format_check_result(&result) {
            println!("{}", line);
        }
    }

    if !result.valid {
        std::process::exit(1);
    }
    Ok(())
}
