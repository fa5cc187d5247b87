/*!
 * Command-line interface for projcat
 */

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use projcat::config::{Args, Config};
use projcat::error::ProjcatError;
use projcat::notify::notifier;
use projcat::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        generate(shell, &mut cmd, "projcat", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Only used when the configuration itself cannot be built
    let (wait, notify) = (!args.no_wait, !args.no_notify);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => return fail(&e, wait, notify),
    };

    match projcat::run(&config) {
        Ok(report) => {
            Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
            if config.wait_for_key {
                wait_for_enter("\nDone. Press ENTER to exit...");
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e, config.wait_for_key, config.notify_on_error),
    }
}

/// Report a fatal error on stderr and through the notifier
fn fail(err: &ProjcatError, wait: bool, notify: bool) -> ExitCode {
    let message = format!("An unexpected error occurred: {}", err);
    eprintln!("{}", message);
    notifier(notify).notify(&message);
    if wait {
        wait_for_enter("\nAn unexpected error occurred. Press ENTER to exit...");
    }
    ExitCode::FAILURE
}

/// Print `prompt` and block until a line (or EOF) arrives on stdin
fn wait_for_enter(prompt: &str) {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
