mod commands;
mod terminal;

use std::time::Duration;

use colored::*;

use commands::CommandLine;
use gatr_common::config::Config;
use gatr_core::{gate::Gate, handoff, probe::HttpProbe, retry::Backoff};
use terminal::{logging, print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);

    let cfg = Config {
        quiet: commands.quiet,
    };

    print::header("waiting for dependency", &cfg);

    let backoff = Backoff::new(commands.backoff, Duration::from_secs_f64(commands.interval))
        .with_cap(Duration::from_secs_f64(commands.max_delay))
        .with_multiplier(commands.multiplier)
        .with_jitter(commands.jitter);
    let probe = HttpProbe::new(
        &commands.target,
        Duration::from_secs_f64(commands.probe_timeout),
    )?;

    let wait_spinner = (!cfg.quiet).then(|| spinner::start_wait_spinner(&commands.target.url()));

    let mut gate = Gate::new(probe, backoff)
        .with_max_wait(commands.max_wait.map(Duration::from_secs_f64));
    if let Some(pb) = &wait_spinner {
        let pb = pb.clone();
        gate = gate.on_retry(Box::new(move |attempt, delay| {
            pb.set_message(format!(
                "not ready yet, retry {} in {}",
                format!("#{attempt}").yellow().bold(),
                format!("{:.1}s", delay.as_secs_f64()).yellow()
            ));
        }));
    }

    let outcome = gate.wait().await;

    if let Some(pb) = wait_spinner {
        pb.finish_and_clear();
    }

    match outcome {
        Ok(report) => {
            print::ready(&report, &cfg);
            match handoff::run(&commands.command) {
                Ok(code) => std::process::exit(code),
                Err(err) => {
                    tracing::error!("{err}");
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
}
