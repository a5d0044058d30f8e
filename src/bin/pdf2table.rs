//! Convert pages of positioned text fragments into one delimited table.
//!
//! Fragments are read from a JSON file holding an array of pages, each an
//! array of `{"x0", "y0", "x1", "y1", "text"}` objects.
//!
//! Usage:
//!   cargo run --release --bin pdf2table -- --input fragments.json
//!   cargo run --release --bin pdf2table -- -i fragments.json --template-page 0 --start 1 --end 9
//!   cargo run --release --bin pdf2table -- -i fragments.json --page 3 --output page3.csv

use pdf2table::{
    ColumnLayout, PageErrorPolicy, PageRange, PagedFragments, ReconstructionConfig, RunOutput,
    TableReconstructor,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    page: Option<usize>,
    template_page: Option<usize>,
    start: Option<usize>,
    end: Option<usize>,
    delimiter: u8,
    load_template: Option<PathBuf>,
    save_template: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_bad_pages: bool,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            input: None,
            output: None,
            page: None,
            template_page: None,
            start: None,
            end: None,
            delimiter: b',',
            load_template: None,
            save_template: None,
            config_file: None,
            skip_bad_pages: false,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--input" | "-i" => config.input = Some(PathBuf::from(value(&args, &mut i, flag)?)),
                "--output" | "-o" => config.output = Some(PathBuf::from(value(&args, &mut i, flag)?)),
                "--page" | "-p" => config.page = Some(number(&args, &mut i, flag)?),
                "--template-page" => config.template_page = Some(number(&args, &mut i, flag)?),
                "--start" => config.start = Some(number(&args, &mut i, flag)?),
                "--end" => config.end = Some(number(&args, &mut i, flag)?),
                "--delimiter" | "-d" => {
                    let delimiter = value(&args, &mut i, flag)?;
                    config.delimiter = match delimiter.as_bytes() {
                        [b] => *b,
                        _ if delimiter == "\\t" => b'\t',
                        _ => return Err(format!("--delimiter must be one byte, got '{}'", delimiter)),
                    };
                },
                "--load-template" => {
                    config.load_template = Some(PathBuf::from(value(&args, &mut i, flag)?))
                },
                "--save-template" => {
                    config.save_template = Some(PathBuf::from(value(&args, &mut i, flag)?))
                },
                "--config" => config.config_file = Some(PathBuf::from(value(&args, &mut i, flag)?)),
                "--skip-bad-pages" => config.skip_bad_pages = true,
                "--verbose" | "-v" => config.verbose = true,
                "--help" | "-h" => return Err(usage()),
                other => return Err(format!("Unknown argument '{}'\n\n{}", other, usage())),
            }
            i += 1;
        }

        if config.input.is_none() {
            return Err(usage());
        }
        if config.page.is_some() && (config.start.is_some() || config.end.is_some()) {
            return Err("--page cannot be combined with --start/--end".to_string());
        }
        if config.template_page.is_some() && config.load_template.is_some() {
            return Err("--template-page cannot be combined with --load-template".to_string());
        }
        Ok(config)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} expects a value", flag))
}

/// Page numbers on the command line are 1-based, like a PDF viewer's.
fn number(args: &[String], i: &mut usize, flag: &str) -> Result<usize, String> {
    let raw = value(args, i, flag)?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("{} expects a page number starting at 1, got '{}'", flag, raw)),
    }
}

fn usage() -> String {
    "Usage: pdf2table --input <fragments.json> [options]

Options:
  -i, --input <file>          JSON pages of positioned text fragments
  -o, --output <file>         Write rows here instead of stdout
  -p, --page <n>              Convert a single page
      --template-page <n>     Derive columns from page n and reuse them for every page
      --start <n>             First page to convert (default: 1)
      --end <n>               Last page to convert, inclusive (default: last page)
  -d, --delimiter <c>         Field delimiter (default: ',')
      --load-template <file>  Reuse a column layout saved earlier
      --save-template <file>  Save the run's column layout as JSON
      --config <file>         Reconstruction thresholds as JSON
      --skip-bad-pages        Skip pages that fail instead of aborting
  -v, --verbose               Print per-page progress"
        .to_string()
}

fn load_config(cli: &CliConfig) -> Result<ReconstructionConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config_file {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => ReconstructionConfig::default(),
    };
    if cli.skip_bad_pages {
        config = config.with_page_error_policy(PageErrorPolicy::Skip);
    }
    Ok(config)
}

fn page_range(cli: &CliConfig, page_count: usize) -> Result<PageRange, Box<dyn std::error::Error>> {
    if let Some(page) = cli.page {
        return Ok(PageRange::single(page));
    }
    let start = cli.start.unwrap_or(0);
    // --end is inclusive on the command line
    let end = cli.end.map(|last| last + 1).unwrap_or(page_count);
    Ok(PageRange::new(start, end)?)
}

fn write_rows(
    output: &RunOutput,
    cli: &CliConfig,
) -> Result<usize, Box<dyn std::error::Error>> {
    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(cli.delimiter)
        .flexible(false)
        .from_writer(sink);

    let table = output.combined()?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(table.len())
}

fn run(cli: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli)?;
    let reconstructor = TableReconstructor::new(config)?;

    let input = cli.input.as_ref().ok_or("missing --input")?;
    let mut source = PagedFragments::from_json_file(input)?;
    let range = page_range(cli, source.pages().len())?;

    let start_time = Instant::now();
    let output = match &cli.load_template {
        Some(path) => {
            let layout: ColumnLayout = serde_json::from_reader(File::open(path)?)?;
            reconstructor.run_with_layout(&mut source, layout, range)?
        },
        None => reconstructor.run(&mut source, cli.template_page, range)?,
    };

    if let Some(path) = &cli.save_template {
        let layout = output
            .layout
            .clone()
            .or_else(|| output.pages.first().map(|(_, page)| page.layout.clone()))
            .ok_or("no page produced a column layout to save")?;
        serde_json::to_writer_pretty(File::create(path)?, &layout)?;
    }

    if cli.verbose {
        for (page, table) in &output.pages {
            eprintln!(
                "page {:>4} ({}): {} rows, {} columns",
                page + 1,
                table.location,
                table.table.len(),
                table.layout.column_count()
            );
            for warning in &table.warnings {
                eprintln!("           warning: {}", warning);
            }
        }
    }
    for skipped in &output.skipped {
        eprintln!("page {:>4} skipped: {}", skipped.page + 1, skipped.reason);
    }

    let rows = write_rows(&output, cli)?;
    if cli.verbose {
        eprintln!(
            "{} rows from {} pages in {:.2}s",
            rows,
            output.pages.len(),
            start_time.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        },
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
