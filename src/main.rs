//! multisource - read many files as one seekable stream

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use multisource::{
    ByteSource, ByteSourceCursor, FileSource, ReadOutcome, SegmentedSource, SharedSource, Whence,
    concat,
};

#[derive(Parser)]
#[command(name = "multisource")]
#[command(version, about = "Read many files as one seekable stream", long_about = None)]
#[command(after_help = "EXAMPLES:
    multisource info a.bin b.bin c.bin            Show part layout
    multisource cat -o -10 -w end a.bin b.bin     Print the last 10 bytes
    multisource digest part1 part2 part3          SHA-1 of the joined parts
    multisource zip-list big.z01 big.z02 big.zip  List a split zip archive")]
struct Cli {
    /// Index parts with a flat offset table instead of a composition tree
    #[arg(long, global = true)]
    flat: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show part sizes, start offsets and the total size
    Info {
        /// Input files, in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy a byte range of the joined stream to stdout
    Cat {
        /// Input files, in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Seek offset, relative to --whence
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,

        /// Seek reference point: start, current, end (or 0, 1, 2)
        #[arg(short, long, default_value = "start")]
        whence: Whence,

        /// Number of bytes to copy (default: to the end)
        #[arg(short, long)]
        length: Option<u64>,
    },

    /// Print the SHA-1 digest of the joined stream
    Digest {
        /// Input files, in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// List the entries of a zip archive split across several files
    ZipList {
        /// Archive parts, in order
        #[arg(value_name = "PART", required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct PartInfo {
    path: String,
    offset: u64,
    size: u64,
}

#[derive(Serialize)]
struct StreamInfo {
    parts: Vec<PartInfo>,
    total: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Info { files, json } => show_info(files, cli.flat, *json),
        Command::Cat {
            files,
            offset,
            whence,
            length,
        } => cat(files, cli.flat, *offset, *whence, *length),
        Command::Digest { files } => digest(files, cli.flat),
        Command::ZipList { files } => zip_list(files, cli.flat),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_parts(files: &[PathBuf]) -> Result<Vec<SharedSource>, String> {
    files
        .iter()
        .map(|path| {
            FileSource::open(path)
                .map(|source| Arc::new(source) as SharedSource)
                .map_err(|e| format!("{}: {e}", path.display()))
        })
        .collect()
}

fn join(parts: Vec<SharedSource>, flat: bool) -> Option<SharedSource> {
    if flat {
        SegmentedSource::new(parts).map(|s| Arc::new(s) as SharedSource)
    } else {
        concat(parts).map(|c| Arc::new(c) as SharedSource)
    }
}

fn open_stream(files: &[PathBuf], flat: bool) -> Result<ByteSourceCursor<SharedSource>, String> {
    let parts = open_parts(files)?;
    join(parts, flat)
        .map(ByteSourceCursor::new)
        .ok_or_else(|| "no input files".to_string())
}

fn show_info(files: &[PathBuf], flat: bool, json: bool) -> Result<(), String> {
    let parts = open_parts(files)?;

    let mut offset = 0;
    let mut infos = Vec::with_capacity(parts.len());
    for (path, part) in files.iter().zip(&parts) {
        infos.push(PartInfo {
            path: path.display().to_string(),
            offset,
            size: part.len(),
        });
        offset += part.len();
    }

    let total = join(parts, flat).map_or(0, |source| source.len());
    let info = StreamInfo {
        parts: infos,
        total,
    };

    if json {
        let out = serde_json::to_string_pretty(&info).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    for part in &info.parts {
        println!("{:>12}  {:>12}  {}", part.offset, part.size, part.path);
    }
    println!("Total: {} bytes in {} parts", info.total, info.parts.len());
    Ok(())
}

fn cat(
    files: &[PathBuf],
    flat: bool,
    offset: i64,
    whence: Whence,
    length: Option<u64>,
) -> Result<(), String> {
    let mut reader = open_stream(files, flat)?;
    reader.seek_to(offset, whence).map_err(|e| e.to_string())?;

    let remaining = reader.len() - reader.position();
    let mut limited = reader.take(length.unwrap_or(remaining));
    let stdout = io::stdout();
    io::copy(&mut limited, &mut stdout.lock()).map_err(|e| e.to_string())?;
    Ok(())
}

fn digest(files: &[PathBuf], flat: bool) -> Result<(), String> {
    let mut reader = open_stream(files, flat)?;
    let mut hasher = sha1_smol::Sha1::new();
    let mut buf = vec![0u8; 64 * 1024];

    loop {
        let outcome = reader.read_chunk(&mut buf).map_err(|e| e.to_string())?;
        hasher.update(&buf[..outcome.len()]);
        if let ReadOutcome::EndOfData(_) = outcome {
            break;
        }
    }

    println!("{}  ({} bytes)", hasher.hexdigest(), reader.position());
    Ok(())
}

fn zip_list(files: &[PathBuf], flat: bool) -> Result<(), String> {
    let reader = open_stream(files, flat)?;
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| e.to_string())?;

    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| e.to_string())?;
        println!("{:>12}  {}", entry.size(), entry.name());
    }
    println!("{} entries across {} parts", archive.len(), files.len());
    Ok(())
}
