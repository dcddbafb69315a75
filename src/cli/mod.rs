// FILE: src/cli/mod.rs

mod config;
mod handlers;

use crate::error::Result;
use crate::registry::StyleContext;
use crate::CompilerOptions;
use clap::{Arg, ArgAction, Command, ValueEnum};
use std::time::Instant;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Css,
    Json,
    Debug,
}

pub struct EnhancedCli {
    config: config::ConfigFile,
    start_time: Instant,
}

impl Default for EnhancedCli {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancedCli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = self.build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"))?;

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }

        let result = match matches.subcommand() {
            Some(("compile", sub_matches)) => handlers::handle_compile_command(self, sub_matches),
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("expand", sub_matches)) => handlers::handle_expand_command(self, sub_matches),
            Some(("name", sub_matches)) => handlers::handle_name_command(self, sub_matches),
            Some(("resolve", sub_matches)) => handlers::handle_resolve_command(self, sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        };

        log::debug!("Finished in {}ms", self.start_time.elapsed().as_millis());
        result
    }

    fn build_cli(&self) -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .author("Kryon Development Team")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.json or .toml)")
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .action(ArgAction::Count),
            )
            .subcommand(
                Command::new("compile")
                    .about("Compile a JSON style document to CSS")
                    .arg(Arg::new("input").help("Input style document").required(true).index(1))
                    .arg(Arg::new("output").short('o').long("output").value_name("FILE").help("Output CSS file"))
                    .arg(Arg::new("class").long("class").value_name("NAME").help("Compile under .NAME instead of a generated class").conflicts_with("selector"))
                    .arg(Arg::new("selector").short('s').long("selector").value_name("SELECTOR").help("Compile under an explicit selector"))
                    .arg(Arg::new("component").long("component").value_name("NAME").help("Component name used in the generated class"))
                    .arg(Arg::new("format").short('f').long("format").value_parser(clap::value_parser!(OutputFormat)).default_value("css").help("Output format"))
                    .arg(Arg::new("strict").long("strict").help("Fail on unresolved token references").action(ArgAction::SetTrue))
                    .arg(Arg::new("debug").short('d').long("debug").help("Log each compilation phase").action(ArgAction::SetTrue))
                    .arg(Arg::new("stats").long("stats").help("Show detailed compilation statistics").action(ArgAction::SetTrue))
                    .arg(Arg::new("watch").short('w').long("watch").help("Watch for file changes and recompile").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("check")
                    .about("Check style documents for malformed values and unresolved tokens")
                    .arg(Arg::new("input").help("Input style document or directory").required(true).index(1))
                    .arg(Arg::new("recursive").short('r').long("recursive").help("Check all .json files in directory recursively").action(ArgAction::SetTrue)),
            )
            .subcommand(
                Command::new("expand")
                    .about("Print a style document with shorthand properties expanded")
                    .arg(Arg::new("input").help("Input style document").required(true).index(1)),
            )
            .subcommand(
                Command::new("name")
                    .about("Print the class name generated for a style document")
                    .arg(Arg::new("input").help("Input style document").required(true).index(1))
                    .arg(Arg::new("component").long("component").value_name("NAME").help("Component name used in the generated class")),
            )
            .subcommand(
                Command::new("resolve")
                    .about("Resolve a $token reference for a CSS property")
                    .arg(Arg::new("property").help("Hyphenated CSS property name").required(true).index(1))
                    .arg(Arg::new("reference").help("Token reference, e.g. $green.500").required(true).index(2)),
            )
    }

    fn setup_logging(&self, verbose_count: u8) -> Result<()> {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
        Ok(())
    }

    /// Registries with the loaded configuration merged over the built-in defaults
    pub fn build_context(&self) -> StyleContext {
        let mut context = StyleContext::default();
        self.config.apply(&mut context);
        context
    }

    pub fn build_compiler_options(&self, matches: &clap::ArgMatches) -> CompilerOptions {
        let mut options = CompilerOptions::default();
        if let Some(prefix) = &self.config.class_prefix {
            options.class_prefix = prefix.clone();
        }
        options.strict_tokens = self.config.strict_tokens.unwrap_or(false);

        if let Ok(Some(component)) = matches.try_get_one::<String>("component") {
            options.component_name = Some(component.clone());
        }
        if let Ok(Some(selector)) = matches.try_get_one::<String>("selector") {
            options.selector = Some(selector.clone());
        }
        if let Ok(Some(class)) = matches.try_get_one::<String>("class") {
            options.selector = Some(format!(".{}", class));
        }
        if let Ok(Some(true)) = matches.try_get_one::<bool>("strict") {
            options.strict_tokens = true;
        }
        if let Ok(Some(true)) = matches.try_get_one::<bool>("debug") {
            options.debug_mode = true;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        EnhancedCli::new().build_cli().debug_assert();
    }

    #[test]
    fn test_build_compiler_options() {
        let cli = EnhancedCli::new();
        let matches = cli
            .build_cli()
            .try_get_matches_from(["stylec", "compile", "button.json", "--class", "btn", "--strict"])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();

        let options = cli.build_compiler_options(sub_matches);
        assert_eq!(options.selector.as_deref(), Some(".btn"));
        assert!(options.strict_tokens);
        assert_eq!(options.class_prefix, "cky");
    }

    #[test]
    fn test_name_options_use_component() {
        let cli = EnhancedCli::new();
        let matches = cli
            .build_cli()
            .try_get_matches_from(["stylec", "name", "button.json", "--component", "button"])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();

        let options = cli.build_compiler_options(sub_matches);
        assert_eq!(options.component_name.as_deref(), Some("button"));
        assert_eq!(options.selector, None);
        assert!(!options.debug_mode);
    }
}
