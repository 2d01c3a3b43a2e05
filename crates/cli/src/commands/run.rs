// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tl run` - Cycle the light with observers waiting for green

use super::TimingArgs;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tl_core::{Phase, PhaseCycler, RecvError, Transition};

/// How long an observer blocks before waiting again
const OBSERVER_WAIT: Duration = Duration::from_secs(60);

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub timing: TimingArgs,

    /// Number of observers waiting for green
    #[arg(long, default_value_t = 1)]
    pub observers: usize,

    /// Stop after this long (e.g. "30s"); runs until Ctrl-C otherwise
    #[arg(long, value_parser = humantime::parse_duration)]
    pub duration: Option<Duration>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RunEvent {
    Started { phase: Phase, observers: usize },
    Changed(Transition),
    Crossed { observer: usize, phase: Phase },
    Stopped { transitions: u64, phase: Phase },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunEvent::Started { phase, observers } => {
                write!(f, "Light started: {} ({} observers)", phase, observers)
            }
            RunEvent::Changed(transition) => write!(f, "{}", transition),
            RunEvent::Crossed { observer, phase } => {
                write!(f, "Observer {}: crossing on {}", observer, phase)
            }
            RunEvent::Stopped { transitions, phase } => {
                writeln!(f, "Transitions: {}", transitions)?;
                write!(f, "Final phase: {}", phase)
            }
        }
    }
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let config = args.timing.resolve()?;
    let format = args.format;

    let cycler = Arc::new(PhaseCycler::new(config));
    let feed = cycler.transition_feed();
    cycler.simulate()?;
    output::print_line(
        &RunEvent::Started {
            phase: cycler.current_phase(),
            observers: args.observers,
        },
        format,
    );

    // The feed ends when the cycler stops
    let printer = tokio::task::spawn_blocking(move || {
        for transition in feed {
            output::print_line(&RunEvent::Changed(transition), format);
        }
    });

    let observers: Vec<_> = (0..args.observers)
        .map(|id| {
            let cycler = Arc::clone(&cycler);
            tokio::task::spawn_blocking(move || observe(&cycler, id, format))
        })
        .collect();

    wait_for_shutdown(args.duration).await?;
    tracing::info!("stopping light");

    let stopping = Arc::clone(&cycler);
    tokio::task::spawn_blocking(move || stopping.stop()).await??;

    printer.await?;
    for observer in observers {
        observer.await?;
    }

    output::print_line(
        &RunEvent::Stopped {
            transitions: cycler.transitions(),
            phase: cycler.current_phase(),
        },
        format,
    );
    Ok(())
}

/// Cross on every green received until the cycler stops
fn observe(cycler: &PhaseCycler, id: usize, format: OutputFormat) {
    loop {
        match cycler.wait_for_phase_timeout(Phase::Green, OBSERVER_WAIT) {
            Ok(()) => output::print_line(
                &RunEvent::Crossed {
                    observer: id,
                    phase: Phase::Green,
                },
                format,
            ),
            Err(RecvError::Timeout) => continue,
            Err(RecvError::Closed) => break,
        }
    }
    tracing::debug!(observer = id, "observer finished");
}

async fn wait_for_shutdown(duration: Option<Duration>) -> Result<()> {
    match duration {
        Some(duration) => tokio::select! {
            _ = tokio::time::sleep(duration) => Ok(()),
            result = tokio::signal::ctrl_c() => result.context("listening for Ctrl-C"),
        },
        None => tokio::signal::ctrl_c()
            .await
            .context("listening for Ctrl-C"),
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
