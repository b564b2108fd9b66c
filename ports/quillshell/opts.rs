/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Command-line options for a single run of the shell.

use getopts::Options;

/// Parsed command-line flags.
#[derive(Clone, Debug)]
pub struct Opts {
    /// The URL to navigate to.
    pub url: String,

    /// Where to write the rendered canvas as a PPM, if anywhere.
    pub output_file: Option<String>,

    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Extra stylesheet text cascaded before the document's own sheets.
    pub user_stylesheet: Option<String>,

    /// Dump the parsed document to stdout.
    pub dump_dom: bool,

    /// Dump the layout tree to stdout.
    pub dump_layout: bool,

    /// Write a render stage trace to this path.
    pub trace_file: Option<String>,

    /// Path to a JSON prefs file.
    pub prefs_path: Option<String>,
}

/// The usage string for `--help`.
pub fn usage(program: &str, options: &Options) -> String {
    options.usage(&format!("Usage: {} [options] <url>", program))
}

pub fn build_options() -> Options {
    let mut options = Options::new();
    options.optopt("o", "output", "write the rendered canvas to a PPM file", "FILE");
    options.optopt("", "width", "viewport width in CSS pixels (default 800)", "PX");
    options.optopt("", "height", "viewport height in CSS pixels (default 600)", "PX");
    options.optopt("", "user-stylesheet", "stylesheet applied before document sheets", "FILE");
    options.optflag("", "dump-dom", "print the parsed document and exit code normally");
    options.optflag("", "dump-layout", "print the layout tree dump");
    options.optopt("", "trace-file", "write the render stage trace to a file", "FILE");
    options.optopt("", "prefs", "load preferences from a JSON file", "FILE");
    options.optflag("h", "help", "print this help text");
    options
}

/// Parse argv. Returns `Err` with a message (help text included) when the
/// run should stop before navigating.
pub fn from_cmdline_args(program: &str, args: &[String]) -> Result<Opts, String> {
    let options = build_options();
    let matches = options
        .parse(args)
        .map_err(|failure| failure.to_string())?;
    if matches.opt_present("help") {
        return Err(usage(program, &options));
    }
    let url = match matches.free.first() {
        Some(url) => url.clone(),
        None => return Err(usage(program, &options)),
    };

    let parse_dimension = |name: &str, default: u32| -> Result<u32, String> {
        match matches.opt_str(name) {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("--{} expects an integer, got {:?}", name, raw)),
            None => Ok(default),
        }
    };

    Ok(Opts {
        url,
        output_file: matches.opt_str("output"),
        viewport_width: parse_dimension("width", 800)?,
        viewport_height: parse_dimension("height", 600)?,
        user_stylesheet: matches.opt_str("user-stylesheet"),
        dump_dom: matches.opt_present("dump-dom"),
        dump_layout: matches.opt_present("dump-layout"),
        trace_file: matches.opt_str("trace-file"),
        prefs_path: matches.opt_str("prefs"),
    })
}
