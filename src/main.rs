use std::io;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use magpi_downloader_rs::Downloader;
use magpi_downloader_rs::IssueSelection;
use magpi_downloader_rs::MAGPI_BASE_URL;

/// Downloads issues of The MagPi as PDF files
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One issue number, or the first and last issue of a range
    #[arg(allow_negative_numbers = true)]
    issues: Vec<String>,

    /// Destination directory [default: ~/Documents/Magazines/MagPi]
    #[arg(short, long)]
    dest: Option<PathBuf>,

    /// Site to download from
    #[arg(long, hide = true, default_value = MAGPI_BASE_URL)]
    base_url: String,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let code = run(args, &mut io::stdout());
    std::process::exit(code);
}

/// Runs the downloader and returns the process exit status.
fn run<W: Write>(args: Args, out: &mut W) -> i32 {
    match download(args, out) {
        Ok(()) => 0,
        Err(err) => {
            // Nothing left to report to if stdout itself is gone.
            let _ = writeln!(out, "Error: {err:#}");
            1
        }
    }
}

fn download<W: Write>(args: Args, out: &mut W) -> anyhow::Result<()> {
    let Some(selection) = IssueSelection::from_args(&args.issues)? else {
        print_usage(out)?;
        return Ok(());
    };

    let mut builder = Downloader::builder().base_url(args.base_url);
    if let Some(dest) = args.dest {
        builder = builder.dest(dest);
    }
    let downloader = builder.build()?;
    downloader.download_issues(&selection.issues())?;

    writeln!(out, "Finished.")?;
    Ok(())
}

fn print_usage<W: Write>(out: &mut W) -> io::Result<()> {
    let name = env!("CARGO_PKG_NAME");
    writeln!(out, "Specify one MagPi issue or a range of MagPi issues to download")?;
    writeln!(out, "for example: '{name} 123' or '{name} 123 132'")
}
