#[macro_use]
extern crate log;

use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use parallel_quicksort::pipeline;
use parallel_quicksort::settings::Settings;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("parallel-quicksort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates random integers, saves them, reads them back, sorts them in parallel and saves the sorted integers")
        .arg(
            Arg::with_name("count")
                .index(1)
                .help("Number of random integers to generate [default: 100]"),
        )
        .arg(
            Arg::with_name("workers")
                .short("w")
                .long("workers")
                .takes_value(true)
                .help("Number of worker threads; 0 sorts on the main thread [default: logical CPUs]"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("File for the generated integers [default: input_numbers.csv]"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File for the sorted integers [default: sorted_numbers.csv]"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .takes_value(true)
                .help("Seed of the random number generator"),
        )
        .arg(
            Arg::with_name("stack-size")
                .long("stack-size")
                .takes_value(true)
                .help("Stack size of worker threads in bytes"),
        )
        .get_matches();

    let settings = settings(&matches);
    println!("Generating {} random integers", settings.count);

    let report = match pipeline::run(&settings) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    println!("Execution time: {} seconds", report.elapsed.as_secs_f64());
}

fn settings(matches: &ArgMatches) -> Settings {
    let mut settings = Settings::default();

    if let Some(count) = parse(matches, "count", "The number of integers to generate must be an integer.") {
        settings.count = count;
    }

    if let Some(workers) = parse(matches, "workers", "The number of workers must be an integer.") {
        settings.sched.workers = workers;
    }

    if let Some(stack_size) = parse(matches, "stack-size", "The stack size must be an integer.") {
        settings.sched.stack_size = Some(stack_size);
    }

    settings.seed = parse(matches, "seed", "The seed must be an integer.");

    if let Some(input) = matches.value_of("input") {
        settings.input = input.into();
    }

    if let Some(output) = matches.value_of("output") {
        settings.output = output.into();
    }

    settings
}

/// Parses the value of argument `name`, exiting with status 1 if it is malformed.
fn parse<T: FromStr>(matches: &ArgMatches, name: &str, msg: &str) -> Option<T> {
    let value = matches.value_of(name)?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }
    }
}
