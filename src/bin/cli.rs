use std::process;

use clap::{App, Arg};
use handoff::{HandoffConfig, Orchestrator, Outcome};

fn main() {
    env_logger::init();

    let matches = App::new("handoff")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checksummed shared-buffer handoff between a producer and a consumer thread")
        .arg(
            Arg::with_name("memsize")
                .help("Shared region size in bytes (positive multiple of 32, at most 64000)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("ntimes")
                .help("Number of full-buffer produce/consume cycles")
                .required(true)
                .index(2),
        )
        .get_matches();

    let region_size = parse_arg(&matches, "memsize");
    let repeat_count = parse_arg(&matches, "ntimes");

    let config = HandoffConfig::new(region_size, repeat_count);
    let mut orchestrator = Orchestrator::new(config);
    match orchestrator.run() {
        // Success is silent
        Ok(Outcome::Success { .. }) => {}
        Ok(Outcome::ChecksumMismatch(mismatch)) => {
            eprintln!("{}", mismatch);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}

fn parse_arg(matches: &clap::ArgMatches, name: &str) -> usize {
    match matches.value_of(name).unwrap().parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("argument '{}' must be a non-negative integer", name);
            process::exit(2);
        }
    }
}
