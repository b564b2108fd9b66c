/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The quill command-line shell.
//!
//! Navigates one URL, optionally writes the rendered canvas as a PPM and
//! the render trace as a line file, prints diagnostics to stderr, and
//! exits non-zero iff the navigation ends in the failed state.

mod fetcher;
mod opts;
mod ppm;
mod prefs;

use std::path::Path;
use std::process;

use canvas::{write_render_trace, RenderTrace};
use diagnostics::{format_diagnostic, Severity};
use engine::{BrowserEngine, LifecycleState, NavigateOptions};
use net::CachePolicy;

use crate::fetcher::FileFetcher;
use crate::opts::Opts;
use crate::prefs::Prefs;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "quillshell".to_owned());
    let opts = match opts::from_cmdline_args(&program, &args[1..]) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        },
    };

    match run(&opts) {
        Ok(()) => {},
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        },
    }
}

fn run(opts: &Opts) -> Result<(), String> {
    let prefs = match opts.prefs_path {
        Some(ref path) => prefs::read_prefs(path)?,
        None => Prefs::default(),
    };

    let mut options = navigate_options(opts, &prefs)?;
    if let Some(ref path) = opts.user_stylesheet {
        let css = std::fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {}", path, error))?;
        options.inline_css = Some(css);
    }

    let mut browser = BrowserEngine::new(Box::new(FileFetcher));
    if prefs.cache_policy == "no-cache" {
        browser.cache_mut().set_policy(CachePolicy::NoCache);
    }

    let result = browser.navigate(&opts.url, &options);
    for event in result.session.diagnostics.events() {
        eprintln!("{}", format_diagnostic(event));
    }

    if result.session.state == LifecycleState::Failed {
        return Err(result.message);
    }

    let Some(pipeline) = result.session.pipeline.as_ref() else {
        return Err("navigation completed without a pipeline".to_owned());
    };

    if opts.dump_dom {
        println!("{}", dom::serialize(pipeline.dom()));
    }
    if opts.dump_layout {
        println!("{}", pipeline.layout_dump());
    }
    if let Some(ref path) = opts.output_file {
        ppm::write_ppm(pipeline.canvas(), Path::new(path))
            .map_err(|error| format!("failed to write {}: {}", path, error))?;
    }
    if let Some(ref path) = opts.trace_file {
        // A traced re-render of the final document records the stages.
        let mut trace = RenderTrace::new();
        let mut session = result.session;
        if let Some(pipeline) = session.pipeline.as_mut() {
            pipeline.rerender_traced(&mut trace);
        }
        write_render_trace(&trace, Path::new(path))
            .map_err(|error| format!("failed to write {}: {}", path, error))?;
    }
    Ok(())
}

fn navigate_options(opts: &Opts, prefs: &Prefs) -> Result<NavigateOptions, String> {
    let mut options = NavigateOptions::default();
    options.viewport_width = prefs.viewport_width.unwrap_or(opts.viewport_width);
    options.viewport_height = prefs.viewport_height.unwrap_or(opts.viewport_height);
    options.min_severity = match prefs.min_severity.as_str() {
        "info" => Severity::Info,
        "warning" => Severity::Warning,
        "error" => Severity::Error,
        other => return Err(format!("unknown severity {:?} in prefs", other)),
    };
    if let Some(ref schemes) = prefs.allowed_schemes {
        options.policy.allowed_schemes = schemes.clone();
    }
    Ok(options)
}
