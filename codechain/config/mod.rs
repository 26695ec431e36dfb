// Copyright 2018 Kodebox, Inc.
// This file is part of CodeChain.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs;

use clap;
use cvm::{Config as VmConfig, DEFAULT_MAX_MEMORY, DEFAULT_MAX_STACK_DEPTH, DEFAULT_MAX_STEPS, DEFAULT_MAX_VALUE_SIZE};
use toml;

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub vm: Vm,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Vm {
    pub max_memory: usize,
    pub max_steps: usize,
    pub max_stack_depth: usize,
    pub max_value_size: usize,
}

impl Default for Vm {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            max_steps: DEFAULT_MAX_STEPS,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
        }
    }
}

impl<'a> Into<VmConfig> for &'a Vm {
    fn into(self) -> VmConfig {
        VmConfig {
            max_memory: self.max_memory,
            max_steps: self.max_steps,
            max_stack_depth: self.max_stack_depth,
            max_value_size: self.max_value_size,
        }
    }
}

impl Vm {
    pub fn overwrite_with(&mut self, matches: &clap::ArgMatches) -> Result<(), String> {
        if let Some(max_memory) = matches.value_of("max-memory") {
            self.max_memory = max_memory.parse().map_err(|_| "Invalid max-memory")?;
        }
        if let Some(max_steps) = matches.value_of("max-steps") {
            self.max_steps = max_steps.parse().map_err(|_| "Invalid max-steps")?;
        }
        if let Some(max_stack_depth) = matches.value_of("max-stack-depth") {
            self.max_stack_depth = max_stack_depth.parse().map_err(|_| "Invalid max-stack-depth")?;
        }
        if let Some(max_value_size) = matches.value_of("max-value-size") {
            self.max_value_size = max_value_size.parse().map_err(|_| "Invalid max-value-size")?;
        }
        Ok(())
    }

    /// Limits set to 0. Almost every script is rejected under them.
    pub fn zero_limits(&self) -> Vec<&'static str> {
        let mut limits = Vec::new();
        if self.max_memory == 0 {
            limits.push("max_memory");
        }
        if self.max_steps == 0 {
            limits.push("max_steps");
        }
        if self.max_stack_depth == 0 {
            limits.push("max_stack_depth");
        }
        if self.max_value_size == 0 {
            limits.push("max_value_size");
        }
        limits
    }
}

pub fn load(config_path: &str) -> Result<Config, String> {
    let toml_string = fs::read_to_string(config_path).map_err(|e| format!("Fail to read file: {:?}", e))?;
    parse(&toml_string)
}

fn parse(toml_string: &str) -> Result<Config, String> {
    toml::from_str(toml_string).map_err(|e| format!("Error while parse TOML: {:?}", e))
}

/// Limits for a run: the built-in defaults, then the `--config` file, then the `--max-*` flags.
pub fn vm_config(matches: &clap::ArgMatches) -> Result<VmConfig, String> {
    let mut config = match matches.value_of("config") {
        Some(path) => load(path)?,
        None => Config::default(),
    };
    config.vm.overwrite_with(matches)?;
    cdebug!(TOOL, "VM limits: {:?}", config.vm);
    for limit in config.vm.zero_limits() {
        cwarn!(TOOL, "VM limit {} is 0", limit);
    }
    Ok((&config.vm).into())
}
