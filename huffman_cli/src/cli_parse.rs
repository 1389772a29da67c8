use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The two operations the utility supports.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compresses the specified input file to the given output path.
    #[clap(alias = "e")]
    Encode {
        /// The file path to read data from for encoding. This must exist.
        input_file: PathBuf,
        /// The file path to write the encoded stream to.
        output_file: PathBuf,
    },

    /// Decompresses the specified input file to the given output path.
    #[clap(alias = "d")]
    Decode {
        /// The file path to read the encoded stream from.
        input_file: PathBuf,
        /// The file path to write the decoded data to.
        output_file: PathBuf,
    },
}

/// The command line argument structure for the Huffman codec utility.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Canonical Huffman compression utility.",
    long_about = "Compresses and decompresses files with a self-describing canonical Huffman stream."
)]
pub struct CliArgs {
    /// The operation (encode or decode) and its file paths.
    #[command(subcommand)]
    pub command: Commands,
    /// Enables statistics output, such as compression ratio and throughput.
    #[arg(short, long)]
    pub stats: bool,
}

impl CliArgs {
    /// Validates the command line arguments after parsing:
    /// 1. The input file exists and is a file.
    /// 2. The parent directory for the output file exists and is a directory.
    pub fn validate(&self) -> Result<(), CliError> {
        let (in_path, out_path) = match &self.command {
            Commands::Encode {
                input_file,
                output_file,
            } => (input_file, output_file),
            Commands::Decode {
                input_file,
                output_file,
            } => (input_file, output_file),
        };

        if !in_path.exists() {
            return Err(CliError::InputFileNotFound(in_path.clone()));
        }
        if !in_path.is_file() {
            return Err(CliError::InputNotFile(in_path.clone()));
        }

        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                if !parent.exists() {
                    return Err(CliError::OutputParentDirNotFound(parent.to_path_buf()));
                }
                if !parent.is_dir() {
                    return Err(CliError::OutputParentNotDir(parent.to_path_buf()));
                }
            }
        }

        Ok(())
    }
}

/// Errors encountered during argument processing or file validation.
#[derive(Debug)]
pub enum CliError {
    /// The specified input file could not be found.
    InputFileNotFound(PathBuf),
    /// The specified input path exists, but is not a file.
    InputNotFile(PathBuf),
    /// The parent directory for the output file does not exist.
    OutputParentDirNotFound(PathBuf),
    /// The parent path for the output file exists, but is not a directory.
    OutputParentNotDir(PathBuf),
    /// An error originating directly from the argument parsing library (clap).
    ClapError(clap::Error),
}

impl From<clap::Error> for CliError {
    fn from(error: clap::Error) -> Self {
        CliError::ClapError(error)
    }
}

/// Parses and validates CLI arguments.
pub fn parse_args() -> Result<CliArgs, CliError> {
    let args = CliArgs::try_parse()?;
    args.validate()?;
    Ok(args)
}
