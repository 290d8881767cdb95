// src/cli.rs
use std::{env, error::Error, path::PathBuf, sync::atomic::AtomicBool, time::Duration};

use crate::params::Params;
use crate::runner::{self, Progress};
use crate::snapshot::Source;

type CliError = Box<dyn Error + Send + Sync>;

static STOP: AtomicBool = AtomicBool::new(false);

pub fn run() -> Result<(), CliError> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    let mut progress = ConsoleProgress;
    runner::run(&params, &mut progress, &STOP)?;
    Ok(())
}

/// Progress sink that prints to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn update_status(&mut self, msg: &str) {
        println!("{msg}");
    }
}

fn parse_cli(params: &mut Params) -> Result<(), CliError> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-d" | "--data-dir" => {
                let v = args.next().ok_or("Missing value for --data-dir")?;
                params.data_dir = PathBuf::from(v);
            }
            "-i" | "--interval" => {
                let v: u64 = args.next().ok_or("Missing value for --interval")?.parse()?;
                if v == 0 { return Err("Interval must be at least 1 minute".into()); }
                params.interval = Duration::from_secs(v * 60);
            }
            "--once" => params.once = true,
            "--source" => {
                let v = args.next().ok_or("Missing value for --source")?;
                let source = Source::parse(&v)
                    .ok_or_else(|| format!("Unknown source: {v}"))?;
                params.sources = vec![source];
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {a}").into()),
        }
    }

    Ok(())
}
