//! Gridcalc - spreadsheet cells and formulas from the command line

mod config;
mod error;

use anyhow::Context;
use gridcalc_core::{Document, ERROR_SENTINEL, Window, render_markdown};
use std::env;
use std::path::PathBuf;

use error::CliError;

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options are applied in the order given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <REF>=<VALUE>   Write VALUE into cell REF (can be repeated)");
    eprintln!("  -g, --get <REF>           Print the display value of REF (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate FORMULA against the cells set so far");
    eprintln!("  -p, --print [RANGE]       Print RANGE (default: used cells) as a Markdown table");
    eprintln!("  --config <FILE>           Load settings from FILE instead of the config dir");
    eprintln!("  -h, --help                Print help");
}

/// One step requested on the command line.
#[derive(Debug, PartialEq)]
enum Step {
    Set { cell: String, value: String },
    Get(String),
    Command(String),
    Print(Option<String>),
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    steps: Vec<Step>,
    config_file: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut options = Options::default();
    let mut i = 1;

    let value_for = |i: usize, flag: &str| -> Result<String, CliError> {
        args.get(i)
            .cloned()
            .ok_or_else(|| CliError::MissingValue(flag.to_string()))
    };

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => {
                options.help = true;
                return Ok(options);
            }
            "-s" | "--set" => {
                i += 1;
                let assignment = value_for(i, arg)?;
                let (cell, value) = assignment
                    .split_once('=')
                    .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
                options.steps.push(Step::Set {
                    cell: cell.trim().to_string(),
                    value: value.to_string(),
                });
            }
            "-g" | "--get" => {
                i += 1;
                options.steps.push(Step::Get(value_for(i, arg)?));
            }
            "-c" | "--command" => {
                i += 1;
                options.steps.push(Step::Command(value_for(i, arg)?));
            }
            "-p" | "--print" => {
                let range = args.get(i + 1).filter(|next| !next.starts_with('-')).cloned();
                if range.is_some() {
                    i += 1;
                }
                options.steps.push(Step::Print(range));
            }
            "--config" => {
                i += 1;
                options.config_file = Some(PathBuf::from(value_for(i, arg)?));
            }
            _ if arg.starts_with('-') => return Err(CliError::UnknownOption(arg.to_string())),
            _ => return Err(CliError::UnexpectedArgument(arg.to_string())),
        }
        i += 1;
    }

    Ok(options)
}

/// Apply every step. Returns true if a command evaluated to `#ERROR`.
fn run(doc: &mut Document, steps: &[Step]) -> anyhow::Result<bool> {
    let mut failed = false;
    for step in steps {
        match step {
            Step::Set { cell, value } => {
                doc.write_cell_at(cell, value)?;
            }
            Step::Get(cell) => println!("{}", doc.read_display_value_at(cell)?),
            Step::Command(formula) => {
                let result = doc.evaluate(formula);
                failed |= result == ERROR_SENTINEL;
                println!("{}", result);
            }
            Step::Print(range) => {
                let window = range
                    .as_deref()
                    .map(|r| Window::parse(r, doc.settings.column_decoding))
                    .transpose()?;
                let table = render_markdown(doc, window.as_ref())
                    .with_context(|| format!("cannot print {}", range.as_deref().unwrap_or("sheet")))?;
                print!("{}", table);
            }
        }
    }
    Ok(failed)
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return;
    }
    if options.steps.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    let (settings, warnings) = config::load_settings(options.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut doc = Document::with_settings(settings);
    match run(&mut doc, &options.steps) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("gridcalc")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_steps_in_order() {
        let options = parse_args(&args(&["-s", "A1=5", "--set", "B1==A1*2", "-g", "B1"])).unwrap();
        assert_eq!(
            options.steps,
            vec![
                Step::Set {
                    cell: "A1".to_string(),
                    value: "5".to_string()
                },
                Step::Set {
                    cell: "B1".to_string(),
                    value: "=A1*2".to_string()
                },
                Step::Get("B1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_print_with_and_without_range() {
        let options = parse_args(&args(&["-p", "A1:B2", "-p", "-g", "A1", "--print"])).unwrap();
        assert_eq!(
            options.steps,
            vec![
                Step::Print(Some("A1:B2".to_string())),
                Step::Print(None),
                Step::Get("A1".to_string()),
                Step::Print(None),
            ]
        );
    }

    #[test]
    fn test_parse_help_and_config() {
        assert!(parse_args(&args(&["-h"])).unwrap().help);
        let options = parse_args(&args(&["--config", "/tmp/g.toml"])).unwrap();
        assert_eq!(options.config_file, Some(PathBuf::from("/tmp/g.toml")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_args(&args(&["-c"])),
            Err(CliError::MissingValue(flag)) if flag == "-c"
        ));
        assert!(matches!(
            parse_args(&args(&["--bogus"])),
            Err(CliError::UnknownOption(_))
        ));
        assert!(matches!(
            parse_args(&args(&["stray"])),
            Err(CliError::UnexpectedArgument(_))
        ));
        assert!(matches!(
            parse_args(&args(&["-s", "A1"])),
            Err(CliError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn test_run_reports_formula_failure() {
        let mut doc = Document::new();
        let steps = vec![Step::Command("1+1".to_string())];
        assert!(!run(&mut doc, &steps).unwrap());
        let steps = vec![Step::Command("1/0".to_string())];
        assert!(run(&mut doc, &steps).unwrap());
    }

    #[test]
    fn test_run_rejects_bad_reference() {
        let mut doc = Document::new();
        let steps = vec![Step::Get("nope".to_string())];
        assert!(run(&mut doc, &steps).is_err());
    }
}
