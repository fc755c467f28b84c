//! Demo wiring: an `env` scope that forwards into a nested dispatcher, and a
//! `build` command available both at the top level and inside an environment.

use anyhow::bail;

use crate::{
    commands::{Command, Dispatcher, Suggestion, simple_suggestions},
    config::CommanderConfig,
    error::CommanderResult,
};

/// Environments accepted by `env`.
pub const ENVIRONMENTS: &[&str] = &["prod", "dev"];

/// Architectures each operating system can be built for.
fn architectures(os: &str) -> Option<&'static [&'static str]> {
    match os {
        "linux" => Some(&["x86", "x64", "arm"]),
        "windows" => Some(&["x86", "x64"]),
        _ => None,
    }
}

fn build_completions(args: &[String]) -> Vec<Suggestion> {
    match args.first() {
        None => simple_suggestions(["windows", "linux"]),
        Some(os) => architectures(os)
            .map(|arches| simple_suggestions(arches.iter().copied()))
            .unwrap_or_default(),
    }
}

fn valid_build_target(args: &[String]) -> bool {
    match args {
        [os, arch, ..] => architectures(os).is_some_and(|arches| arches.contains(&arch.as_str())),
        _ => false,
    }
}

/// Register `build` on `dispatcher`.
///
/// The environment is the dispatcher's first prefix argument, or `default`
/// at the top level. Building in `prod` always fails.
pub fn add_build(dispatcher: &Dispatcher) -> CommanderResult<()> {
    dispatcher.add_command(
        Command::new("build")
            .with_description("Build a target: build <os> <arch>")
            .with_argument_completer(build_completions)
            .with_validator(valid_build_target)
            .with_handler(|dispatcher, _, args| {
                let env = dispatcher
                    .prefix_args()
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| "default".to_string());
                let target = args.join("-");
                dispatcher.write_line(&format!("Building for {target} in {env}"));
                if env == "prod" {
                    bail!("Compile error: out of memory");
                }
                Ok(())
            }),
    )?;
    Ok(())
}

/// Build the demo dispatcher tree.
///
/// The root prompt comes from `config.prompt`; inside an environment the
/// prompt shows its name.
pub fn build_demo(config: &CommanderConfig) -> CommanderResult<Dispatcher> {
    let env_scope = Dispatcher::builder("{}> ").config(config).build();
    add_build(&env_scope)?;

    let root = Dispatcher::builder(&config.prompt).config(config).build();
    root.add_command(
        Command::new("env")
            .with_description("Enter an environment: env <prod|dev>")
            .with_argument_completer(|_| simple_suggestions(ENVIRONMENTS.iter().copied()))
            .with_options(ENVIRONMENTS.iter().copied())
            .with_sub_dispatcher(env_scope),
    )?;
    add_build(&root)?;

    Ok(root)
}
