// FILE: src/cli/handlers.rs
use crate::{
    cli::OutputFormat, compile_file_with_options, compile_source_with_options, generate_class_name,
    load_style_file, CompilationStats, CompilerOptions, Result, StyleContext, StyleError,
};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Instant;

// --- COMPILE ---
pub fn handle_compile_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required_arg(matches, "input")?;
    let output_path = matches
        .get_one::<String>("output")
        .map(|s| s.to_string())
        .unwrap_or_else(|| {
            Path::new(input_path)
                .with_extension("css")
                .to_string_lossy()
                .into_owned()
        });

    let context = cli.build_context();
    let options = cli.build_compiler_options(matches);

    if matches.get_flag("watch") {
        watch_and_compile(input_path, &output_path, &context, &options)
    } else {
        compile_single_file(input_path, &output_path, &context, &options, matches)
    }
}

fn compile_single_file(
    input_path: &str,
    output_path: &str,
    context: &StyleContext,
    options: &CompilerOptions,
    matches: &clap::ArgMatches,
) -> Result<()> {
    println!("🔨 Compiling {} -> {}", input_path, output_path);

    let compile_start = Instant::now();
    let stats = compile_file_with_options(input_path, output_path, context, options)?;
    let compile_time = compile_start.elapsed();

    println!("✅ Compilation successful!");
    if let Some(class_name) = &stats.class_name {
        println!("   Class: {}", class_name);
    }
    println!("   Output: {} bytes", stats.output_size);
    println!("   Time: {:.2}ms", compile_time.as_millis());

    if stats.unresolved_tokens > 0 {
        println!("   ⚠️  Unresolved tokens: {}", stats.unresolved_tokens);
    }

    if matches.get_flag("stats") {
        print_detailed_stats(&stats);
    }

    let format = matches
        .get_one::<OutputFormat>("format")
        .unwrap_or(&OutputFormat::Css);
    match format {
        OutputFormat::Css => {}
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| StyleError::json(output_path, e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Debug => {
            println!("{}", fs::read_to_string(output_path)?);
        }
    }

    Ok(())
}

fn watch_and_compile(
    input_path: &str,
    output_path: &str,
    context: &StyleContext,
    options: &CompilerOptions,
) -> Result<()> {
    println!("👀 Watching {} for changes...", input_path);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if let Err(e) = tx.send(event) {
                    eprintln!("Watch error: {}", e);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| {
        StyleError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to create file watcher: {}", e),
        ))
    })?;

    watcher
        .watch(Path::new(input_path), RecursiveMode::NonRecursive)
        .map_err(|e| {
            StyleError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to watch file: {}", e),
            ))
        })?;

    if let Err(e) = compile_file_with_options(input_path, output_path, context, options) {
        eprintln!("❌ Initial compilation failed: {}", e);
    } else {
        println!("✅ Initial compilation successful");
    }

    loop {
        match rx.recv() {
            Ok(_event) => {
                println!("🔄 File changed, recompiling...");
                match compile_file_with_options(input_path, output_path, context, options) {
                    Ok(stats) => {
                        println!(
                            "✅ Recompiled successfully ({} bytes, {}ms)",
                            stats.output_size, stats.compile_time_ms
                        );
                    }
                    Err(e) => eprintln!("❌ Compilation failed: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Watch error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn print_detailed_stats(stats: &CompilationStats) {
    println!("\n📊 Compilation Statistics:");
    println!("   Source size: {} bytes", stats.source_size);
    println!("   Output size: {} bytes", stats.output_size);
    println!("   Selector: {}", stats.selector);
    println!("   Rules: {}", stats.rule_count);
    println!("   Declarations: {}", stats.declaration_count);
    println!("   Unresolved tokens: {}", stats.unresolved_tokens);
    println!("   Compile time: {}ms", stats.compile_time_ms);
}

// --- CHECK ---
pub fn handle_check_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required_arg(matches, "input")?;
    let recursive = matches.get_flag("recursive");
    let context = cli.build_context();

    if recursive && Path::new(input_path).is_dir() {
        check_directory_recursive(input_path, &context)
    } else {
        check_single_file(input_path, &context)
    }
}

/// Compile in strict mode without writing output
pub fn check_file(input_path: &str, context: &StyleContext) -> Result<CompilationStats> {
    let source = fs::read_to_string(input_path).map_err(|e| StyleError::FileNotFound {
        path: format!("{}: {}", input_path, e),
    })?;
    let options = CompilerOptions {
        strict_tokens: true,
        ..Default::default()
    };
    let (_css, stats) = compile_source_with_options(&source, input_path, context, &options)?;
    Ok(stats)
}

fn check_single_file(input_path: &str, context: &StyleContext) -> Result<()> {
    println!("🔍 Checking {}", input_path);
    match check_file(input_path, context) {
        Ok(_) => {
            println!("✅ {} - No issues found", input_path);
            Ok(())
        }
        Err(e) => {
            println!("❌ {} - {}", input_path, e);
            Err(e)
        }
    }
}

fn check_directory_recursive(dir_path: &str, context: &StyleContext) -> Result<()> {
    let mut total_files = 0;
    let mut error_files = 0;

    for entry in walkdir::WalkDir::new(dir_path) {
        let entry = entry.map_err(|e| {
            StyleError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Directory traversal error: {}", e),
            ))
        })?;
        if entry.file_type().is_file() && entry.path().extension().map_or(false, |ext| ext == "json") {
            total_files += 1;
            if check_single_file(&entry.path().to_string_lossy(), context).is_err() {
                error_files += 1;
            }
        }
    }

    println!("\n📊 Check Summary:");
    println!("   Total files: {}", total_files);
    println!("   Files with errors: {}", error_files);
    if total_files > 0 {
        println!(
            "   Success rate: {:.1}%",
            (total_files - error_files) as f64 / total_files as f64 * 100.0
        );
    }

    if error_files > 0 {
        Err(StyleError::invalid_format(format!(
            "{} files have errors",
            error_files
        )))
    } else {
        Ok(())
    }
}

// --- EXPAND ---
pub fn handle_expand_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required_arg(matches, "input")?;
    println!("{}", expand_file(input_path, &cli.build_context())?);
    Ok(())
}

/// Expanded form of a style document as pretty-printed JSON
pub fn expand_file(input_path: &str, context: &StyleContext) -> Result<String> {
    let styles = load_style_file(input_path)?;
    let expanded = context.expand(&styles);
    serde_json::to_string_pretty(&expanded).map_err(|e| StyleError::json(input_path, e.to_string()))
}

// --- NAME ---
pub fn handle_name_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let input_path = required_arg(matches, "input")?;
    let options = cli.build_compiler_options(matches);
    println!("{}", name_file(input_path, &cli.build_context(), &options)?);
    Ok(())
}

/// Class name of a style document, hashed over its expanded form
pub fn name_file(input_path: &str, context: &StyleContext, options: &CompilerOptions) -> Result<String> {
    let styles = load_style_file(input_path)?;
    let expanded = context.expand(&styles);
    Ok(generate_class_name(
        &expanded,
        &options.class_prefix,
        options.component_name.as_deref(),
    ))
}

// --- RESOLVE ---
pub fn handle_resolve_command(cli: &super::EnhancedCli, matches: &clap::ArgMatches) -> Result<()> {
    let property = required_arg(matches, "property")?;
    let reference = required_arg(matches, "reference")?;
    println!("{}", resolve_reference(&cli.build_context(), property, reference)?);
    Ok(())
}

/// Resolved token value, or an error naming the reference on a miss
pub fn resolve_reference(context: &StyleContext, property: &str, reference: &str) -> Result<String> {
    context
        .resolve_token(property, reference)
        .map(str::to_string)
        .ok_or_else(|| StyleError::unresolved_token(property, reference))
}

fn required_arg<'a>(matches: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| StyleError::invalid_format(format!("Missing required argument <{}>", id)))
}
