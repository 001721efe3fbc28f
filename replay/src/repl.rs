//! The interactive dispatcher loop.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::command::{self, Request};
use crate::report::{self, Tag};
use crate::session::ReplaySession;

const BANNER: &str = "=== Commit Replay Tool ===\n\
    Enter a command ('help' for usage, 'exit' to quit).";

const HELP: &str = "\
=== Commit Replay Tool commands ===
reproduce <commit>          : check out, build and run one commit, saving its log
compare <commit1> <commit2> : build and run two commits, then diff their logs
cleanup <commit|all>        : remove one checkout, or all of them
help                        : show this help
exit                        : quit";

/// Drive the dispatcher until `exit`, end of input, or an interrupt.
///
/// Per-operation errors are reported and the loop keeps going. The
/// interrupt flag is consulted between iterations and again after each
/// read, so a Ctrl-C during a child command takes effect once that
/// command finishes, and one sent at the prompt discards the line that
/// follows it.
pub fn run_loop(
    session: &ReplaySession,
    input: &mut impl BufRead,
    interrupted: &AtomicBool,
) -> Result<()> {
    println!("{BANNER}");
    loop {
        if interrupted.load(Ordering::SeqCst) {
            debug!("interrupt flag set, leaving loop");
            report::line(Tag::Exit, "exiting.");
            return Ok(());
        }

        print!("> ");
        std::io::stdout().flush().context("flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("read input line")?;
        if read == 0 {
            // End of input leaves the prompt on an open line.
            println!();
            report::line(Tag::Exit, "exiting.");
            return Ok(());
        }
        if interrupted.load(Ordering::SeqCst) {
            // An interrupt that arrived during the read discards the
            // line it interrupted.
            debug!("interrupt flag set, dropping pending line");
            report::line(Tag::Exit, "exiting.");
            return Ok(());
        }

        match command::parse_line(&line) {
            Ok(Request::Empty) => {}
            Ok(Request::Help) => println!("{HELP}"),
            Ok(Request::Exit) => {
                report::line(Tag::Exit, "exiting.");
                return Ok(());
            }
            Ok(request) => {
                if let Err(err) = dispatch(session, &request) {
                    report::line(Tag::Error, format_args!("operation failed: {err:#}"));
                }
            }
            Err(err) => report::line(Tag::Error, err),
        }
    }
}

fn dispatch(session: &ReplaySession, request: &Request) -> Result<()> {
    match request {
        Request::Reproduce { commit } => session.reproduce(commit),
        Request::Compare { left, right } => session.compare(left, right),
        Request::Cleanup { target } => session.cleanup(target),
        Request::Empty | Request::Help | Request::Exit => Ok(()),
    }
}
