// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use power_tables::config::ReportPlan;
use power_tables::{cli, config, console_format, export, runner, ui};

/// Layout or argument problem: nothing was built
const EXIT_CONFIG: i32 = 1;
/// A table failed validation
const EXIT_TABLE: i32 = 2;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(EXIT_CONFIG);
    }

    // Set console width override if specified
    if let Some(width) = args.console_width {
        console_format::set_console_width(width);
    }

    // Build report plan
    let plan = match config::build_report_plan(&args) {
        Ok(p) => p,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(EXIT_CONFIG);
        }
    };

    print_plan(&plan);

    // Build tables, exporting and previewing each as soon as it validates
    let mut export_error: Option<String> = None;
    let result = runner::run_tables(&plan, |job, table| {
        if export_error.is_some() {
            return;
        }
        match export::export_table_json(&plan.output_dir, job.number(), job.caption(), table) {
            Ok(path) => {
                if plan.preview {
                    console_format::print_table_preview(job.number(), job.caption(), table);
                }
                ui::table_done(job.number(), table.kind(), &path);
            }
            Err(e) => export_error = Some(format!("Failed to write table {}: {}", job.number(), e)),
        }
    });

    if let Some(e) = export_error {
        ui::print_error(&e);
        std::process::exit(EXIT_CONFIG);
    }

    match result {
        Ok(count) => ui::status(&format!("{} tables written to {}", count, plan.output_dir.display())),
        Err(failure) => {
            ui::print_error(&format!("Table {} failed: {}", failure.number, failure.error));
            std::process::exit(EXIT_TABLE);
        }
    }
}

/// Print which tables will be built and from where
fn print_plan(plan: &ReportPlan) {
    let tables: Vec<String> = plan.tables.iter().map(|t| format!("{} ({})", t.number(), t.kind())).collect();
    ui::status(&format!("building tables {} from {}", tables.join(", "), plan.input_dir.display()));
}
