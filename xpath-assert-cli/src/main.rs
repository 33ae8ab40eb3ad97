mod error;
mod xpath;

use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    xpath: xpath::HasXPath,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.xpath.run() {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => {
            eprintln!("Error: {e:?}");
            xpath::Verdict::ERROR_EXIT_CODE.into()
        }
    }
}
