/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The engine: pipeline, events, and the navigation facade.
//!
//! A [`RenderPipeline`] owns one document and its stylesheet and re-drives
//! the style → layout → paint tail on demand. The [`BrowserEngine`] facade
//! walks a navigation through its lifecycle states, emitting a diagnostic
//! per transition and degrading to a `Failed` terminal state with a
//! captured trace and a recovery plan when something gives out.

mod browser;
mod events;
mod pipeline;

pub use browser::{
    BrowserEngine, LifecycleState, NavigateOptions, NavigationResult, Session,
};
pub use events::{DispatchResult, Event, EventRegistry, EventType};
pub use pipeline::{ElementSummary, RenderDamage, RenderPipeline};
