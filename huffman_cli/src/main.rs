mod cli_parse;

use cli_parse::{CliError, Commands, parse_args};
use shared_files::stats::{CompressionStatsBuilder, SectionStats, StatsTimer};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(CliError::ClapError(e)) => e.exit(),
        Err(e) => {
            report_cli_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Commands::Encode {
            input_file,
            output_file,
        } => run_encode(&input_file, &output_file, args.stats),
        Commands::Decode {
            input_file,
            output_file,
        } => run_decode(&input_file, &output_file, args.stats),
    }
}

fn report_cli_error(err: &CliError) {
    match err {
        CliError::InputFileNotFound(path) => {
            eprintln!("Error: input file does not exist: {}", path.display())
        }
        CliError::InputNotFile(path) => {
            eprintln!("Error: input path is not a file: {}", path.display())
        }
        CliError::OutputParentDirNotFound(path) => eprintln!(
            "Error: output directory does not exist: {}",
            path.display()
        ),
        CliError::OutputParentNotDir(path) => eprintln!(
            "Error: output parent path is not a directory: {}",
            path.display()
        ),
        CliError::ClapError(e) => eprintln!("{}", e),
    }
}

fn run_encode(input_file: &Path, output_file: &Path, show_stats: bool) -> ExitCode {
    let input = match fs::read(input_file) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if input.is_empty() {
        eprintln!("Error: cannot encode an empty file.");
        return ExitCode::FAILURE;
    }

    let mut timer = StatsTimer::new();
    let section = timer.start_section("huffman encode");

    let mut out = vec![0u8; input.len()];
    let mut produced = huffman_core::encode(&mut out, &input) as usize;
    if produced > out.len() {
        out = vec![0u8; produced];
        produced = huffman_core::encode(&mut out, &input) as usize;
    }
    out.truncate(produced);

    timer.add_section(section.end());
    let (duration, sections) = timer.end();

    if let Err(e) = fs::write(output_file, &out) {
        eprintln!("Error writing {}: {}", output_file.display(), e);
        return ExitCode::FAILURE;
    }

    if show_stats {
        print_stats("Huffman", input.len(), out.len(), duration, true, sections);
    }
    ExitCode::SUCCESS
}

fn run_decode(input_file: &Path, output_file: &Path, show_stats: bool) -> ExitCode {
    let input = match fs::read(input_file) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut timer = StatsTimer::new();
    let section = timer.start_section("huffman decode");

    let mut out = vec![0u8; input.len() * 2];
    let mut produced = huffman_core::decode(&mut out, &input) as usize;
    if produced > out.len() {
        out = vec![0u8; produced];
        produced = huffman_core::decode(&mut out, &input) as usize;
    }

    timer.add_section(section.end());
    let (duration, sections) = timer.end();

    if produced == 0 {
        eprintln!(
            "Error: {} is not a valid encoded stream.",
            input_file.display()
        );
        return ExitCode::FAILURE;
    }
    out.truncate(produced);

    if let Err(e) = fs::write(output_file, &out) {
        eprintln!("Error writing {}: {}", output_file.display(), e);
        return ExitCode::FAILURE;
    }

    if show_stats {
        print_stats(
            "Huffman",
            input.len(),
            out.len(),
            duration,
            false,
            sections,
        );
    }
    ExitCode::SUCCESS
}

fn print_stats(
    algorithm_name: &'static str,
    original_len: usize,
    processed_len: usize,
    duration: Duration,
    is_compression: bool,
    sections: Vec<SectionStats>,
) {
    match CompressionStatsBuilder::new()
        .algorithm_name(algorithm_name)
        .algorithm_id(1)
        .version_used(1)
        .original_len(original_len)
        .processed_len(processed_len)
        .duration(duration)
        .is_compression(is_compression)
        .sections(sections)
        .build()
    {
        Ok(stats) => println!("{}", stats),
        Err(e) => eprintln!("Could not build statistics: {}", e),
    }
}
