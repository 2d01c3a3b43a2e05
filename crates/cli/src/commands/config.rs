// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tl config` - Show the effective timing configuration

use super::TimingArgs;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;
use tl_core::CyclerConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub timing: TimingArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Config rendered as TOML in text mode
#[derive(Serialize)]
#[serde(transparent)]
struct ConfigView(CyclerConfig);

impl fmt::Display for ConfigView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = toml::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(text.trim_end())
    }
}

pub fn handle(args: ConfigArgs) -> Result<()> {
    let config = args.timing.resolve()?;
    output::print(&ConfigView(config), args.format);
    Ok(())
}
