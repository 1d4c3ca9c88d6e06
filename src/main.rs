extern crate genex;

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::process;

use getopts::Options;
use tracing_subscriber::EnvFilter;

use genex::bio::call_writer::{write_diff_call_header, write_diff_call_row,
                              write_expression_call_header, write_expression_call_row};
use genex::calls::diff::{never_expressed_from_calls, resolve_diff_calls};
use genex::calls::presence::CallAggregator;
use genex::config::Config;
use genex::snapshot::Snapshot;

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} -s SNAPSHOT_FILE [options]", program);
    print!("{}", opts.usage(&brief));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();

    opts.optflag("h", "help", "print this help message");
    opts.optflag("", "version", "print the version of this program");
    opts.optopt("s", "snapshot", "the release snapshot JSON file", "FILE");
    opts.optopt("c", "config", "engine configuration JSON file", "FILE");
    opts.optopt("", "expression-calls",
                "write the expression call table to this file", "FILE");
    opts.optopt("", "diff-calls",
                "write the differential expression call table to this file", "FILE");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(failure) => {
            eprintln!("option parsing error: {}", failure);
            process::exit(1);
        },
    };

    if matches.opt_present("help") {
        print_usage(&program, &opts);
        process::exit(0);
    }

    if matches.opt_present("version") {
        println!("{} v{}", PKG_NAME, VERSION);
        process::exit(0);
    }

    let Some(snapshot_file_name) = matches.opt_str("snapshot")
    else {
        print_usage(&program, &opts);
        process::exit(1);
    };

    let config =
        match matches.opt_str("config") {
            Some(config_file_name) => Config::read(&config_file_name),
            None => Config::default(),
        };

    let snapshot = Snapshot::from_file(&snapshot_file_name)?;

    let expression_calls = CallAggregator::new(&snapshot).aggregate();

    if let Some(out_file_name) = matches.opt_str("expression-calls") {
        let out_file = File::create(&out_file_name)?;
        let mut writer = BufWriter::new(out_file);

        write_expression_call_header(&mut writer)?;
        for call in expression_calls.values() {
            write_expression_call_row(&mut writer, &snapshot, call)?;
        }
    }

    if let Some(out_file_name) = matches.opt_str("diff-calls") {
        let never_expressed = never_expressed_from_calls(&expression_calls);
        let diff_calls = resolve_diff_calls(&snapshot.diff_analysis_results,
                                            &never_expressed, &config);

        let out_file = File::create(&out_file_name)?;
        let mut writer = BufWriter::new(out_file);

        write_diff_call_header(&mut writer)?;
        for call in diff_calls.values() {
            write_diff_call_row(&mut writer, &snapshot, call)?;
        }
    }

    Ok(())
}
