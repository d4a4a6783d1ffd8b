use clap::Parser;
use dirgarden::cultivate;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dirgarden")]
#[command(about = "Grow a browsable HTML garden from a directory tree")]
#[command(long_about = "\
Grow a browsable HTML garden from a directory tree

Walks the directory recursively and plants an index.html on every level:
directories become linked tiles, images and videos are shown at their real
size, markdown is rendered inline, and plain text files appear as raw
patches. Folders arranged by hand in Finder keep their arrangement, and the
window background color carries over to the page.

A tree like

  plants/
  ├── ferns/
  │   ├── frond.jpg
  │   └── notes.md
  └── readme.md

grows into

  plants/index.html          tiles for ferns/ and readme.md
  plants/ferns/index.html    tiles for frond.jpg and notes.md

Recursion depth comes from garden.toml (max_depth, default 3) or the --depth
flag. Entries matching .gitignore or .gardenignore patterns in the garden
root are left out of the pages.")]
#[command(version)]
struct Cli {
    /// Directory to cultivate
    dir: PathBuf,

    /// Recursion depth, overriding the configured max_depth
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..=128))]
    depth: Option<i64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cultivate::cultivate(&cli.dir, cli.depth) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
