// Command-line interface for expanding and inspecting templates

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;

use crate::config::{parse_assignment, VariablesFile};
use crate::domain::template::Template;
use crate::domain::value::Variables;
use crate::validation::Validator;

fn template_arg() -> Arg {
    Arg::new("template")
        .value_name("TEMPLATE")
        .help("URI template, e.g. 'https://api.github.com/users{/user}'")
        .required(true)
}

fn variable_args() -> [Arg; 2] {
    [
        Arg::new("var")
            .short('v')
            .long("var")
            .value_name("NAME=VALUE")
            .help("Bind a variable to a string value (repeatable)")
            .action(ArgAction::Append),
        Arg::new("vars")
            .short('f')
            .long("vars")
            .value_name("FILE")
            .help("Path to a YAML or JSON file of variables"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("uritemplate")
        .about("Expand RFC 6570 URI templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Log parsing and expansion details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("expand")
                .about("Expand a template")
                .arg(template_arg())
                .args(variable_args())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Reject templates with unbalanced braces")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("partial")
                .about("Expand only the expressions whose variables are all given")
                .arg(template_arg())
                .args(variable_args()),
        )
        .subcommand(
            Command::new("variables")
                .about("List the variable names a template references")
                .arg(template_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a template for unbalanced braces")
                .arg(template_arg())
                .arg(
                    Arg::new("allow_unbalanced")
                        .long("allow-unbalanced")
                        .help("Accept unbalanced braces")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Run the selected subcommand and return what should be printed
pub fn run(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("expand", sub)) => {
            let template = parse_template(sub)?;
            if sub.get_flag("strict") {
                Validator::new().validate(&template)?;
            }
            let variables = collect_variables(sub)?;
            Ok(template.expand(&variables))
        }
        Some(("partial", sub)) => {
            let template = parse_template(sub)?;
            let variables = collect_variables(sub)?;
            Ok(template.partial(&variables).to_string())
        }
        Some(("variables", sub)) => {
            let template = parse_template(sub)?;
            let mut names: Vec<&str> = template.variable_names().into_iter().collect();
            names.sort_unstable();
            Ok(names.join("\n"))
        }
        Some(("validate", sub)) => {
            let template = parse_template(sub)?;
            let validator = if sub.get_flag("allow_unbalanced") {
                Validator::new().allow_unbalanced_braces()
            } else {
                Validator::new()
            };
            validator.validate(&template)?;
            Ok(format!("{} is valid", template))
        }
        Some((name, _)) => anyhow::bail!("Unknown subcommand: {}", name),
        None => anyhow::bail!("No subcommand given"),
    }
}

fn parse_template(matches: &ArgMatches) -> Result<Template> {
    let raw = matches
        .get_one::<String>("template")
        .context("Missing template argument")?;
    Ok(Template::new(raw)?)
}

/// Variables from `--vars FILE`, then `--var` assignments on top
fn collect_variables(matches: &ArgMatches) -> Result<Variables> {
    let mut variables = match matches.get_one("vars").map(|p: &String| Path::new(p)) {
        Some(path) => VariablesFile::load(path)?.into_variables()?,
        None => Variables::new(),
    };

    for assignment in matches.get_many::<String>("var").into_iter().flatten() {
        let (name, value) = parse_assignment(assignment)?;
        variables.insert(name, value);
    }

    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let matches = build_cli().try_get_matches_from(args)?;
        run(&matches)
    }

    #[test]
    fn test_cli_definition() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_expand_with_vars() {
        let output = run_args(&[
            "uritemplate",
            "expand",
            "https://api.github.com/users{/user}{?page}",
            "--var",
            "user=sigmavirus24",
            "-v",
            "page=2",
        ])
        .unwrap();
        assert_eq!(output, "https://api.github.com/users/sigmavirus24?page=2");
    }

    #[test]
    fn test_variables_sorted() {
        let output = run_args(&["uritemplate", "variables", "{/z}{?y,x}"]).unwrap();
        assert_eq!(output, "x\ny\nz");
    }

    #[test]
    fn test_strict_expand_rejects_unbalanced() {
        let result = run_args(&["uritemplate", "expand", "{foo}}", "--strict"]);
        assert!(result.unwrap_err().to_string().contains("more right braces"));
    }

    #[test]
    fn test_bad_assignment() {
        let result = run_args(&["uritemplate", "expand", "{foo}", "--var", "foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(build_cli().try_get_matches_from(["uritemplate"]).is_err());
    }
}
