use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::{anyhow, Context, Error};
use clap::{values_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use env_logger::{fmt, Builder, Target};
use log::{error, info};
use log::{Level, LevelFilter, Record};
use rand::rngs::StdRng;
use rand::SeedableRng;

use prefagent::{load_problem, ProblemConfig, ProblemConfigUpdate, ProblemInput, VarisatOracle};

mod menu;
mod report;
mod table;

use report::Logic;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{:#}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "{}", record.args())
        } else {
            writeln!(buf, "{}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(format)
        .filter(None, LevelFilter::Info);

    if let Ok(ref env_var) = env::var("PREFAGENT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn banner() {
    info!("This is prefagent {}", env!("PREFAGENT_VERSION"));
    info!(
        "  {} build - {}",
        env!("PREFAGENT_PROFILE"),
        env!("PREFAGENT_RUSTC_VERSION")
    );
}

fn logic_arg() -> Arg<'static, 'static> {
    Arg::from_usage("[logic] --logic=[LOGIC] 'The preference logic to use'")
        .possible_values(&["penalty", "qualitative"])
        .default_value("penalty")
        .case_insensitive(true)
}

fn logic(matches: &ArgMatches) -> Result<Logic, Error> {
    matches.value_of("logic").unwrap_or("penalty").parse()
}

fn open_input(matches: &ArgMatches, name: &str) -> Result<fs::File, Error> {
    let path = matches
        .value_of(name)
        .ok_or_else(|| anyhow!("Missing required argument --{}", name))?;
    info!("Reading {} from '{}'", name, path);
    fs::File::open(path).with_context(|| format!("Failed to open '{}'", path))
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("prefagent")
        .version(env!("PREFAGENT_VERSION"))
        .about("Reasoning with penalty logic and qualitative choice logic")
        .setting(AppSettings::DisableHelpSubcommand)
        .setting(AppSettings::VersionlessSubcommands)
        .arg_from_usage("[attributes] --attributes=[FILE] 'Attribute declarations'")
        .arg_from_usage("[constraints] --constraints=[FILE] 'Hard constraints'")
        .arg_from_usage("[penalty] --penalty=[FILE] 'Penalty logic rules'")
        .arg_from_usage("[qualitative] --qualitative=[FILE] 'Qualitative choice logic rules'")
        .arg_from_usage("[config-file] --config=[FILE] 'Read parameters from configuration file'")
        .arg(
            Arg::from_usage("[config-option] -C --config-option")
                .value_name("OPTION>=<VALUE")
                .help(
                    "Specify a single config option, see 'prefagent -C help' for a list of options.",
                )
                .multiple(true)
                .number_of_values(1),
        )
        .subcommand(SubCommand::with_name("encoding").about("List all objects"))
        .subcommand(SubCommand::with_name("feasibility").about("Count the feasible objects"))
        .subcommand(
            SubCommand::with_name("table")
                .about("Show the scores of all feasible objects")
                .arg(logic_arg()),
        )
        .subcommand(
            SubCommand::with_name("exemplify")
                .about("Compare two randomly selected feasible objects")
                .arg(logic_arg()),
        )
        .subcommand(
            SubCommand::with_name("optimize")
                .about("List all optimal feasible objects")
                .arg(logic_arg()),
        )
        .get_matches();

    if values_t!(matches, "config-option", String)
        .unwrap_or(vec![])
        .iter()
        .any(|option| option == "help")
    {
        print!("{}", ProblemConfig::help());
        return Ok(0);
    }

    init_logging();
    banner();

    let mut config_update = ProblemConfigUpdate::new();

    if let Some(config_path) = matches.value_of("config-file") {
        let mut config_contents = String::new();
        fs::File::open(config_path)?.read_to_string(&mut config_contents)?;

        config_update.merge(toml::from_str(&config_contents)?);
    }

    for config_option in values_t!(matches, "config-option", String).unwrap_or(vec![]) {
        config_update.merge(toml::from_str(&config_option)?);
    }

    let mut config = ProblemConfig::default();
    config.apply(&config_update);

    let input = ProblemInput {
        attributes: open_input(&matches, "attributes")?,
        constraints: open_input(&matches, "constraints")?,
        penalty_rules: open_input(&matches, "penalty")?,
        qualitative_rules: open_input(&matches, "qualitative")?,
    };

    let mut oracle = VarisatOracle::new();
    let problem = load_problem(&config, input, &mut oracle)?;
    info!("Evaluated problem with {} oracle queries", oracle.queries());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        ("encoding", _) => report::encoding(&problem, &mut out)?,
        ("feasibility", _) => report::feasibility(&problem, &mut out)?,
        ("table", Some(matches)) => report::table(&problem, logic(matches)?, &mut out)?,
        ("exemplify", Some(matches)) => {
            report::exemplify(&problem, logic(matches)?, &mut rng, &mut out)?
        }
        ("optimize", Some(matches)) => report::optimize(&problem, logic(matches)?, &mut out)?,
        _ => {
            let stdin = io::stdin();
            menu::run_menu(&problem, &mut rng, &mut stdin.lock(), &mut out)?;
        }
    }

    Ok(0)
}
