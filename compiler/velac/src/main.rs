//! Vela frontend CLI

use std::ffi::OsString;

use velac::{
    init_tracing, install_crash_reporter, run, version_line, Action, DebugFault, DryRunExecutor,
    FrontendOptions, USAGE,
};

fn main() {
    init_tracing();

    let args: Vec<OsString> = std::env::args_os().collect();

    let options = match FrontendOptions::parse(args.iter().skip(1).cloned()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(1);
        }
    };

    match options.action {
        Action::Help => {
            print!("{USAGE}");
            return;
        }
        Action::Version => {
            println!("{}", version_line());
            return;
        }
        Action::Interpret | Action::PrintInputs => {}
    }

    // Without a reporter, faults still kill the process; they just do it
    // without a report.
    if let Err(e) = install_crash_reporter(&args, &options) {
        eprintln!("warning: crash reporting disabled: {e}");
    }

    let executor = DryRunExecutor::new(options.debug_fault == Some(DebugFault::CrashInUserCode));
    let stdout = std::io::stdout();
    if let Err(e) = run(&options, &executor, &mut stdout.lock()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
