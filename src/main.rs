//! sitebaker's main application entry point and orchestration logic.
//! Handles command-line argument parsing, answer collection, confirmation
//! and the generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use sitebaker::{
    answers::{get_answers, get_answers_from},
    cli::{get_args, Args},
    conflict::ConflictResolver,
    context::Context,
    defaults::Defaults,
    error::{default_error_handler, Error, Result},
    ignore::parse_ignore_file,
    logger::init_logger,
    manifest::{CommandInstaller, Installer, SkipInstaller},
    pipeline::Pipeline,
    prompt::{DialoguerPrompter, Prompter},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the template directory exists.
fn get_template_dir<P: AsRef<Path>>(template_dir: P) -> Result<PathBuf> {
    let template_dir = template_dir.as_ref();
    if !template_dir.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_dir.display().to_string(),
        });
    }
    Ok(template_dir.to_path_buf())
}

fn print_summary(context: &Context) {
    println!();
    for (key, value) in context.iter() {
        if key == "token" {
            continue;
        }
        match value {
            serde_json::Value::String(s) => println!("  {key}: {s}"),
            other => println!("  {key}: {other}"),
        }
    }
    println!();
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads environment defaults for the output directory
/// 2. Collects answers (preloaded from stdin and/or interactively)
/// 3. Derives the template context and asks for confirmation
/// 4. Runs the generation pipeline
fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();
    let prompt = DialoguerPrompter::new();

    let template_root = get_template_dir(&args.template)?;
    let output_root = args.output_dir;

    let defaults = Defaults::load(&output_root);
    let preloaded_answers = get_answers_from(args.stdin)?;
    let answers = get_answers(&prompt, &defaults, &preloaded_answers)?;
    let context = Context::derive(&answers);

    print_summary(&context);
    if !args.yes && !prompt.confirm("Generate the site with these settings?", true)? {
        println!("Nothing was written.");
        return Ok(());
    }

    fs::create_dir_all(&output_root)?;
    let ignored = parse_ignore_file(&template_root)?;
    let resolver = ConflictResolver::new(&prompt, args.force);
    let installer: Box<dyn Installer> = if args.skip_install {
        Box::new(SkipInstaller)
    } else {
        Box::new(CommandInstaller::new(args.npm_client))
    };

    let pipeline = Pipeline::new(
        &engine,
        &resolver,
        &*installer,
        &template_root,
        &output_root,
        &context,
        &ignored,
    );
    pipeline.run()?;

    println!("Site generation completed successfully in {}.", output_root.display());
    Ok(())
}
