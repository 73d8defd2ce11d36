// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ramify CLI entrypoint.
//!
//! Opens a Markdown outline file in the interactive card-map TUI. A missing
//! file starts empty and is created on first save.

use std::error::Error;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file.md>] [--durable-writes]\n  {program} --demo\n\nOpens the Markdown outline in the card-map editor. If <file.md> is omitted,\n`outline.md` in the current directory is used.\n--demo opens a built-in demo outline and cannot be combined with a file.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    file: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    if options.demo && options.file.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "ramify".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.demo {
            return ramify::tui::run_demo();
        }

        let path = options.file.unwrap_or_else(|| "outline.md".to_owned());
        let store = if options.durable_writes {
            ramify::store::DocumentStore::new(path)
                .with_durability(ramify::store::WriteDurability::Durable)
        } else {
            ramify::store::DocumentStore::new(path)
        };

        ramify::tui::run(store)
    })();

    if let Err(err) = result {
        eprintln!("ramify: {err}");
        std::process::exit(1);
    }
}
