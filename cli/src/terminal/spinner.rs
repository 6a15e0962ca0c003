use std::io;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

/// Shows a steady spinner while the gate is polling.
///
/// Drawn on stdout so progress shares one stream with the retry notices.
/// The caller must `finish_and_clear` it before the handoff so the
/// successor gets a clean terminal.
pub fn start_wait_spinner(endpoint: &str) -> ProgressBar {
    let pb = SPINNER.get_or_init(init_spinner);
    pb.set_message(format!("probing {endpoint}..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.clone()
}

fn init_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stdout());

    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb
}

/// Log writer that stays out of the spinner's way.
///
/// While the spinner is live, lines are printed above it instead of
/// tearing through a tick; once it is finished (or was never started,
/// as in quiet mode) they go straight to stdout.
pub struct SpinnerWriter;

impl io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();
        match SPINNER.get() {
            Some(pb) if !pb.is_finished() => pb.println(msg),
            _ => println!("{msg}"),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
