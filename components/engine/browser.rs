/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The navigation facade.
//!
//! `navigate` drives the lifecycle state machine strictly forward: idle,
//! fetching, parsing, styling, layout, rendering, complete. Each transition
//! emits an Info diagnostic whose stage is the destination state. Any
//! failure moves to the terminal `Failed` state, captures a failure trace
//! and produces a recovery plan; the user-visible message is the formatted
//! diagnostic plus the plan.

use css::{load_linked_css, CssLoader};
use diagnostics::{
    format_diagnostic, modules, stages, DiagnosticEmitter, FailureTraceCollector,
    RecoveryPlanner, Severity,
};
use html::parse_html;
use net::{fetch_with_policy, CachePolicy, Fetcher, RequestPolicy, ResponseCache};
use quill_url::resolve_reference;
use strum::{AsRefStr, Display};

use crate::RenderPipeline;

/// Navigation lifecycle states. Public names are lowercase. Transitions
/// are strictly forward; `Failed` is terminal.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum LifecycleState {
    Idle,
    Fetching,
    Parsing,
    Styling,
    Layout,
    Rendering,
    Complete,
    Failed,
}

/// Per-navigation options.
#[derive(Clone, Debug)]
pub struct NavigateOptions {
    /// Use this HTML instead of fetching the URL's body.
    pub html_override: Option<String>,
    /// Extra stylesheet text cascaded before the document's own sheets.
    pub inline_css: Option<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub policy: RequestPolicy,
    pub min_severity: Severity,
    pub correlation_id: u64,
}

impl Default for NavigateOptions {
    fn default() -> NavigateOptions {
        NavigateOptions {
            html_override: None,
            inline_css: None,
            viewport_width: 800,
            viewport_height: 600,
            policy: RequestPolicy::default(),
            min_severity: Severity::Info,
            correlation_id: 0,
        }
    }
}

/// Everything a navigation leaves behind.
pub struct Session {
    pub diagnostics: DiagnosticEmitter,
    pub traces: FailureTraceCollector,
    pub planner: RecoveryPlanner,
    pub pipeline: Option<RenderPipeline>,
    pub state: LifecycleState,
    /// Parser and stylesheet recovery warnings, in order.
    pub warnings: Vec<String>,
}

impl Session {
    fn new(options: &NavigateOptions) -> Session {
        let mut diagnostics = DiagnosticEmitter::with_min_severity(options.min_severity);
        diagnostics.set_correlation_id(options.correlation_id);
        Session {
            diagnostics,
            traces: FailureTraceCollector::new(),
            planner: RecoveryPlanner::new(),
            pipeline: None,
            state: LifecycleState::Idle,
            warnings: Vec::new(),
        }
    }

    fn advance(&mut self, state: LifecycleState) {
        self.state = state;
        self.diagnostics.emit(
            Severity::Info,
            modules::ENGINE,
            state.as_ref(),
            &format!("Stage transition: {}", state),
        );
    }

    /// Terminal failure: diagnostic, trace, plan. Returns the user-visible
    /// message.
    fn fail(&mut self, module: &str, stage: &str, url: &str, error: &str) -> String {
        self.diagnostics
            .emit(Severity::Error, module, stage, error);
        let trace = self.traces.capture(&self.diagnostics, module, stage, error);
        trace.add_snapshot("url", url);
        let plan = {
            let trace = &self.traces.traces()[self.traces.size() - 1];
            self.planner.plan_from_trace(trace)
        };
        self.state = LifecycleState::Failed;

        let last_event = self.diagnostics.events().iter().rev().find(|e| {
            e.severity == Severity::Error
        });
        let mut message = match last_event {
            Some(event) => format_diagnostic(event),
            None => error.to_owned(),
        };
        message.push('\n');
        message.push_str(&plan.format());
        message
    }
}

/// The outcome of a navigation.
pub struct NavigationResult {
    pub ok: bool,
    pub message: String,
    pub session: Session,
}

/// The facade owning the collaborators that outlive a navigation: the
/// byte-fetcher and the response cache.
pub struct BrowserEngine {
    fetcher: Box<dyn Fetcher>,
    cache: ResponseCache,
}

impl BrowserEngine {
    pub fn new(fetcher: Box<dyn Fetcher>) -> BrowserEngine {
        BrowserEngine {
            fetcher,
            cache: ResponseCache::new(CachePolicy::CacheAll),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }

    /// Drive one navigation through the lifecycle.
    pub fn navigate(&mut self, url: &str, options: &NavigateOptions) -> NavigationResult {
        let mut session = Session::new(options);
        session.advance(LifecycleState::Idle);

        // Fetch.
        session.advance(LifecycleState::Fetching);
        let html_source = match options.html_override {
            Some(ref html) => html.clone(),
            None => {
                match fetch_with_policy(
                    self.fetcher.as_mut(),
                    &mut self.cache,
                    &options.policy,
                    url,
                    &mut session.diagnostics,
                ) {
                    Ok(response) if response.is_error() => {
                        let error = response
                            .error
                            .clone()
                            .unwrap_or_else(|| "transport failure".to_owned());
                        let message =
                            session.fail(modules::NETWORK, stages::FETCH, url, &error);
                        return NavigationResult {
                            ok: false,
                            message,
                            session,
                        };
                    },
                    Ok(response) => response.body_text(),
                    Err(decision) => {
                        let message =
                            session.fail(modules::POLICY, stages::FETCH, url, &decision.message);
                        return NavigationResult {
                            ok: false,
                            message,
                            session,
                        };
                    },
                }
            },
        };

        // Parse.
        session.advance(LifecycleState::Parsing);
        let parsed = parse_html(&html_source);
        for warning in &parsed.warnings {
            session
                .diagnostics
                .emit(Severity::Warning, modules::HTML, stages::PARSE, warning);
        }
        session.warnings.extend(parsed.warnings.iter().cloned());

        // Style: merge the caller's CSS, `<style>` blocks and `<link>`s.
        session.advance(LifecycleState::Styling);
        let stylesheet = {
            let mut loader = PolicedCssLoader {
                fetcher: self.fetcher.as_mut(),
                cache: &mut self.cache,
                policy: &options.policy,
                emitter: &mut session.diagnostics,
                base_url: url,
            };
            let linked = load_linked_css(
                &parsed.document,
                options.inline_css.as_deref().unwrap_or(""),
                &mut loader,
            );
            for warning in &linked.warnings {
                session
                    .diagnostics
                    .emit(Severity::Warning, modules::CSS, stages::PARSE, warning);
            }
            session.warnings.extend(linked.warnings.iter().cloned());
            linked.merged
        };

        // Layout and paint run inside the pipeline's first pass.
        session.advance(LifecycleState::Layout);
        let pipeline = RenderPipeline::new(
            parsed.document,
            stylesheet,
            options.viewport_width,
            options.viewport_height,
        );
        session.advance(LifecycleState::Rendering);
        session.pipeline = Some(pipeline);

        session.advance(LifecycleState::Complete);
        NavigationResult {
            ok: true,
            message: format!("navigated to {}", url),
            session,
        }
    }
}

/// Resolves `<link rel="stylesheet">` hrefs through the policed fetch path.
struct PolicedCssLoader<'a> {
    fetcher: &'a mut dyn Fetcher,
    cache: &'a mut ResponseCache,
    policy: &'a RequestPolicy,
    emitter: &'a mut DiagnosticEmitter,
    base_url: &'a str,
}

impl<'a> CssLoader for PolicedCssLoader<'a> {
    fn load(&mut self, href: &str) -> Result<String, String> {
        let absolute = resolve_reference(self.base_url, href)
            .ok_or_else(|| format!("unresolvable stylesheet reference {:?}", href))?;
        match fetch_with_policy(
            self.fetcher,
            self.cache,
            self.policy,
            &absolute,
            self.emitter,
        ) {
            Ok(response) if response.is_error() => Err(response
                .error
                .unwrap_or_else(|| "transport failure".to_owned())),
            Ok(response) => Ok(response.body_text()),
            Err(decision) => Err(decision.message),
        }
    }
}
