// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings: the DOM as a [`RenderTarget`], `requestAnimationFrame`
//! as a [`FrameScheduler`], and `performance.now()` as a [`Clock`].

use easel_observe::Clock;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::{Closure, JsValue};
use web_sys::{Document, Element, Performance, Window};

use crate::error::TargetError;
use crate::schedule::{FrameRequest, FrameScheduler};
use crate::target::RenderTarget;

fn platform(err: JsValue) -> TargetError {
    TargetError::Platform(format!("{err:?}"))
}

/// Draws into the live DOM of a [`Document`].
#[derive(Clone, Debug)]
pub struct DomTarget {
    document: Document,
}

impl DomTarget {
    /// Draws into `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Draws into the document of the global window, if there is one.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }
}

impl RenderTarget for DomTarget {
    type Element = Element;

    fn create_element(&mut self, tag: &str) -> Result<Element, TargetError> {
        self.document.create_element(tag).map_err(platform)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), TargetError> {
        element.set_attribute(name, value).map_err(platform)
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) -> Result<(), TargetError> {
        element.remove_attribute(name).map_err(platform)
    }

    fn set_text(&mut self, element: &Element, text: Option<&str>) -> Result<(), TargetError> {
        element.set_text_content(text);
        Ok(())
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), TargetError> {
        parent.append_child(child).map(|_| ()).map_err(platform)
    }

    fn clear_children(&mut self, element: &Element) -> Result<(), TargetError> {
        // Not `innerHTML`: that would drop the text content too.
        while let Some(child) = element.first_element_child() {
            child.remove();
        }
        Ok(())
    }

    fn remove_element(&mut self, element: &Element) -> Result<(), TargetError> {
        element.remove();
        Ok(())
    }
}

/// Schedules flushes with `requestAnimationFrame`.
///
/// The callback is supplied by the host, which owns the renderer. It
/// typically borrows the renderer and runs its pending frame:
///
/// ```ignore
/// let callback = Closure::<dyn FnMut(f64)>::new(move |_| {
///     let mut renderer = shared.borrow_mut();
///     if let Some(frame) = renderer.pending_frame() {
///         renderer.run_frame(frame);
///     }
/// });
/// ```
#[derive(Debug)]
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    /// Schedules `callback` on `window`.
    #[must_use]
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Result<FrameRequest, TargetError> {
        let handle = self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref::<js_sys::Function>())
            .map_err(platform)?;
        Ok(FrameRequest::from_raw(u64::from(handle.unsigned_abs())))
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Ok(handle) = i32::try_from(request.raw()) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}

/// `performance.now()`.
#[derive(Clone, Debug)]
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    /// Reads `performance`.
    #[must_use]
    pub fn new(performance: Performance) -> Self {
        Self { performance }
    }

    /// Reads the performance object of the global window, if there is one.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.performance().map(Self::new)
    }
}

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}
