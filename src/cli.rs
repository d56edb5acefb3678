//! Argument parsing and the generation run behind the binary.

use amphtml_codegen::{
    generate_cached, generate_from_json, numbered_listing, GeneratorConfig, Result,
    DEFAULT_CACHE_DIR,
};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "amphtml-codegen", version, about = "Generate React components from AMP validator rules")]
pub struct Args {
    /// Validator rule table as JSON (`tags`, `attrs`, `internedStrings`)
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Write the module here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Generator configuration JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reuse output from this cache directory when inputs are unchanged
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: Option<PathBuf>,

    /// Skip parsing the emitted module
    #[arg(long)]
    pub no_verify: bool,

    /// Print the module with line numbers to stderr
    #[arg(long)]
    pub numbered: bool,
}

/// Generates the module and writes it to `--out`, or to `stdout` without one.
pub fn run<W: Write>(args: &Args, stdout: &mut W) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    if args.no_verify {
        config.verify = false;
    }

    let rules_json = fs::read_to_string(&args.rules)?;

    let code = match &args.cache_dir {
        Some(dir) => {
            let output_name = args
                .out
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "stdout".to_string());
            generate_cached(&rules_json, &config, dir, &output_name)?
        }
        None => generate_from_json(&rules_json, &config)?.code,
    };

    if args.numbered {
        eprintln!("{}", numbered_listing(&code));
    }

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &code)?;
            log::info!("Wrote {}", path.display());
        }
        None => stdout.write_all(code.as_bytes())?,
    }

    Ok(())
}
