// Copyright 2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! Example of validating the structure of one or more WOFF1 files.

use clap::Parser;
use woff_font_handler::validation::validate;

/// Examines the structure of one or more WOFF files and reports on the
/// validity of the file structure. The wrapped font data itself is not
/// validated.
#[derive(Debug, Parser)]
struct Args {
    /// Input font files
    #[clap(required = true)]
    inputs: Vec<String>,

    /// Emit the full report as JSON instead of a summary.
    #[clap(long)]
    json: bool,
}

/// Main function for the validate example.
fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    for input in &args.inputs {
        let data = std::fs::read(input)?;
        let report = validate(&data);
        if args.json {
            println!("{}", report.to_json()?);
            continue;
        }
        println!("{input}:");
        for group in report.groups() {
            for finding in &group.findings {
                println!(
                    "  [{}] {}: {}",
                    group.identifier,
                    kind_label(finding.kind),
                    finding.message
                );
            }
        }
        if report.have_read_error() {
            println!("  The file contains major structural errors!");
        }
    }
    Ok(())
}

fn kind_label(kind: woff_font_handler::validation::FindingKind) -> &'static str {
    use woff_font_handler::validation::FindingKind;
    match kind {
        FindingKind::Pass => "PASS",
        FindingKind::Note => "NOTE",
        FindingKind::Warning => "WARNING",
        FindingKind::Error => "ERROR",
        FindingKind::Traceback => "TRACEBACK",
    }
}
