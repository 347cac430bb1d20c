use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use clap::Parser;

use mailprobe_lib::check_batch;

mod args;
mod output;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut addresses = cli.addresses.clone();
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let address = line.trim();
            if !address.is_empty() {
                addresses.push(address.to_string());
            }
        }
    }

    if addresses.is_empty() {
        bail!("no addresses given; pass them as arguments or use --stdin");
    }

    let verdicts = check_batch(&addresses, &cli.probe_options());

    match cli.format.as_str() {
        "human" => output::print_human(&verdicts),
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                let rendered = output::render_json(&verdicts)?;
                match cli.out.as_deref() {
                    Some(path) => output::write_all_atomically(path, rendered.as_bytes())?,
                    None => println!("{rendered}"),
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=json requires the 'with-serde' feature");
                std::process::exit(1);
            }
        }
        "ndjson" => {
            #[cfg(feature = "with-serde")]
            {
                let rendered = output::render_ndjson(&verdicts)?;
                match cli.out.as_deref() {
                    Some(path) => output::write_all_atomically(path, rendered.as_bytes())?,
                    None => print!("{rendered}"),
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=ndjson requires the 'with-serde' feature");
                std::process::exit(1);
            }
        }
        other => {
            eprintln!("unknown --format '{other}', use: human|json|ndjson");
            std::process::exit(1);
        }
    }

    // exit codes: 0 all deliverable, 2 invalids, 1 fatal
    let any_invalid = verdicts.iter().any(|verdict| !verdict.valid);
    if any_invalid {
        std::process::exit(2);
    }
    Ok(())
}
