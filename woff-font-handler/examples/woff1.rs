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

//! Example of reading a WOFF1 font file.

use clap::Parser;
use woff_font_handler::woff1::font::{SaveOptions, Woff1Font};

/// An example of reading a WOFF file and writing information about it to
/// the console.
#[derive(Debug, Parser)]
struct Args {
    /// Input font file
    #[clap(short, long)]
    input: String,

    /// Optional output file to repack the font into.
    #[clap(short, long)]
    output: Option<String>,

    /// Recompress all tables instead of reusing the stored forms.
    #[clap(long)]
    recompress: bool,
}

/// Main function for the woff1 example.
fn main() -> Result<(), anyhow::Error> {
    // Initialize the logger, can be controlled with RUST_LOG=debug,info,
    // trace, etc.
    tracing_subscriber::fmt::init();
    // Parse the command line arguments
    let args = Args::parse();

    // Open the input file
    let mut input_file = std::fs::File::open(&args.input)?;
    // Read the font file
    let font = Woff1Font::from_reader(&mut input_file)?;
    println!(
        "flavor: {:#010x}, version {}.{}",
        font.flavor(),
        font.major_version(),
        font.minor_version()
    );
    for tag in font.tags() {
        if let Some(data) = font.table_bytes(&tag) {
            println!("'{tag}': {} bytes", data.len());
        }
    }
    if let Some(metadata) = font.metadata() {
        println!("metadata root: <{}>", metadata.tag());
    }
    if let Some(private_data) = font.private_data() {
        println!("private data: {} bytes", private_data.len());
    }
    if let Some(output) = args.output {
        let output_file = std::fs::File::create(output)?;
        let options = SaveOptions {
            recompress_tables: args.recompress,
            ..SaveOptions::default()
        };
        font.save(output_file, &options)?;
    }
    Ok(())
}
