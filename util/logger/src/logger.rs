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

use std::env;
use std::thread;

use colored::Colorize;
use env_logger::filter::{Builder as FilterBuilder, Filter};
use log::{LevelFilter, Log, Metadata, Record};

pub struct Config {
    /// Level used for every target that `RUST_LOG` does not mention.
    pub default_level: LevelFilter,
}

impl Config {
    pub fn new(default_level: LevelFilter) -> Self {
        Self {
            default_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

pub struct Logger {
    filter: Filter,
    stderr_is_tty: bool,
}

impl Logger {
    pub fn new(config: &Config) -> Self {
        let mut builder = FilterBuilder::new();
        builder.filter(None, config.default_level);

        if let Ok(rust_log) = env::var("RUST_LOG") {
            builder.parse(&rust_log);
        }

        let stderr_is_tty = atty::is(atty::Stream::Stderr);

        Self {
            filter: builder.build(),
            stderr_is_tty,
        }
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter.filter()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.filter.matches(record) {
            let thread_name = thread::current().name().unwrap_or_default().to_string();
            let timestamp = time::strftime("%Y-%m-%d %H:%M:%S.%f %Z", &time::now()).unwrap_or_default();

            let timestamp = if self.stderr_is_tty {
                timestamp.bold()
            } else {
                timestamp.normal()
            };
            let colored_thread_name = if self.stderr_is_tty {
                thread_name.blue().bold()
            } else {
                thread_name.normal()
            };
            eprintln!("{} {} {} {}  {}", timestamp, colored_thread_name, record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}
