// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer: full builds, dirty flushes, selection, and teardown.

use std::fmt;
use std::rc::Rc;

use easel_dirty::trace::OneParentRecorder;
use easel_dirty::{AncestorPolicy, DirtyTracker, InternId};
use easel_document::{
    Document, Node, NodeId, NodePatch, Visit, find_by_id, resolve_path, resolve_path_mut,
    traverse_document,
};
use easel_observe::{Clock, Observability, ObserveConfig, names};
use kurbo::Point;

use crate::element::{ElementKind, ElementSpec, ElementState, apply_ops};
use crate::error::{RenderError, TargetError};
use crate::hit;
use crate::overlay::SelectionOverlay;
use crate::registry::{Registry, RegistryEntry};
use crate::schedule::{FlushSlot, FrameRequest, FrameScheduler};
use crate::target::RenderTarget;

/// Lifecycle of a [`CanvasRenderer`].
///
/// `Uninitialized` becomes `Rendered` on the first [`render`]; `Rendered`
/// loops on itself; [`destroy`] moves to the terminal `Destroyed`.
///
/// [`render`]: CanvasRenderer::render
/// [`destroy`]: CanvasRenderer::destroy
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Constructed, nothing drawn yet.
    Uninitialized,
    /// A document is drawn into a container.
    Rendered,
    /// Torn down. Every further call is a logged no-op.
    Destroyed,
}

impl Lifecycle {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Rendered => "rendered",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for a [`CanvasRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    /// Prefix of the type-derived class, as in `canvas-frame`.
    pub class_prefix: String,
    /// Retention and forwarding of spans and log records.
    pub observe: ObserveConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            class_prefix: String::from("canvas"),
            observe: ObserveConfig::default(),
        }
    }
}

/// Incremental renderer of one document into one container.
///
/// Each instance owns its document, element registry, dirty set, selection,
/// and instruments; nothing is shared between instances.
///
/// - [`render`](Self::render) performs a full build, reusing elements of the
///   previous build by node id.
/// - [`update_nodes`](Self::update_nodes) patches the document and marks the
///   patched nodes and their ancestors dirty (artboards excluded). The first
///   mark schedules one flush; later marks in the same frame join it.
/// - [`run_frame`](Self::run_frame) performs that flush, rewriting only the
///   attributes that changed on dirty nodes.
/// - [`set_selection`](Self::set_selection) flips `aria-selected` on the
///   symmetric difference and never dirties anything.
///
/// No operation returns an error. Faults are logged through
/// [`observability`](Self::observability) and the affected node is skipped.
///
/// ```rust
/// use easel_document::{Artboard, Document, Node, NodePatch, Rect, CommonPatch, NodeTag};
/// use easel_render::{CanvasRenderer, ManualScheduler, MemoryTarget};
///
/// let doc = Document::new("doc", "Demo").with_artboard(
///     Artboard::new("board", Rect::new(0.0, 0.0, 800.0, 600.0))
///         .with_child(Node::frame("card", Rect::new(10.0, 10.0, 100.0, 100.0))),
/// );
///
/// let mut target = MemoryTarget::new();
/// let container = target.create_container();
/// let mut renderer = CanvasRenderer::new(target, ManualScheduler::new());
/// renderer.render(doc, container);
/// assert_eq!(renderer.target().descendants(container).len(), 2);
///
/// let hide = NodePatch::common_only(
///     NodeTag::Frame,
///     CommonPatch { visible: Some(false), ..CommonPatch::default() },
/// );
/// renderer.update_nodes(&["card".into()], vec![hide]);
/// assert_eq!(renderer.dirty_node_count(), 1);
///
/// // The host fires the frame it was asked for.
/// let frame = renderer.pending_frame().unwrap();
/// renderer.run_frame(frame);
/// assert_eq!(renderer.dirty_node_count(), 0);
/// ```
#[derive(Debug)]
pub struct CanvasRenderer<T: RenderTarget, S: FrameScheduler> {
    target: T,
    scheduler: S,
    config: RendererConfig,
    lifecycle: Lifecycle,
    document: Option<Document>,
    container: Option<T::Element>,
    registry: Registry<T::Element>,
    dirty: DirtyTracker<InternId>,
    causes: OneParentRecorder<InternId>,
    overlay: SelectionOverlay,
    slot: FlushSlot,
    obs: Observability,
    last_flush_ms: Option<f64>,
}

impl<T: RenderTarget, S: FrameScheduler> CanvasRenderer<T, S> {
    /// Creates a renderer with the default configuration.
    #[must_use]
    pub fn new(target: T, scheduler: S) -> Self {
        Self::with_config(target, scheduler, RendererConfig::default())
    }

    /// Creates a renderer with `config`, timed by the platform clock.
    #[must_use]
    pub fn with_config(target: T, scheduler: S, config: RendererConfig) -> Self {
        Self::with_clock(target, scheduler, config, default_clock())
    }

    /// Creates a renderer timed by `clock`.
    #[must_use]
    pub fn with_clock(target: T, scheduler: S, config: RendererConfig, clock: Rc<dyn Clock>) -> Self {
        let obs = Observability::new(clock, &config.observe);
        Self {
            target,
            scheduler,
            config,
            lifecycle: Lifecycle::Uninitialized,
            document: None,
            container: None,
            registry: Registry::new(),
            dirty: DirtyTracker::new(),
            causes: OneParentRecorder::new(),
            overlay: SelectionOverlay::default(),
            slot: FlushSlot::default(),
            obs,
            last_flush_ms: None,
        }
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Draws `document` into `container`, replacing whatever it held.
    ///
    /// Elements of the previous build are reused for nodes with the same id
    /// and kind, with only their changed attributes rewritten. Elements for
    /// nodes that are gone are removed. The dirty set, any pending flush, and
    /// the selection are discarded.
    pub fn render(&mut self, document: Document, container: T::Element) {
        if self.lifecycle == Lifecycle::Destroyed {
            self.reject("render");
            return;
        }
        let span = self.obs.tracer.start("render");
        let started = self.obs.now_ms();

        self.cancel_flush();
        self.dirty.reset();
        self.causes.clear();
        self.overlay.reset();
        let mut previous = core::mem::take(&mut self.registry);

        if let Err(source) = self.target.clear_children(&container) {
            report(
                &mut self.obs,
                RenderError::Surface {
                    operation: "clear_children",
                    source,
                },
            );
        }

        // Element and interned id per depth of the current ancestor chain.
        // `None` marks a node that could not be drawn; its subtree is skipped.
        let mut chain: Vec<Option<(T::Element, InternId)>> = Vec::new();
        let mut drawn: u64 = 0;
        let mut writes: u64 = 0;
        for visit in traverse_document(&document) {
            let Visit {
                node, path, depth, ..
            } = visit;
            chain.truncate(depth);
            let parent = if depth == 0 {
                Some((&container, None))
            } else {
                chain
                    .last()
                    .and_then(Option::as_ref)
                    .map(|(element, key)| (element, Some(*key)))
            };
            let Some((parent_element, parent_key)) = parent else {
                chain.push(None);
                continue;
            };

            let id = node.id();
            let kind = ElementKind::of(node);
            let (element, old_spec) = match previous.remove(id.as_str()) {
                // Surviving children are appended again in document order and
                // stale ones are removed below, so the element is not cleared.
                // Clearing would also drop its text on some targets.
                Some(entry) if entry.kind == kind => (entry.element, entry.spec),
                stale => {
                    if let Some(entry) = stale
                        && let Err(source) = self.target.remove_element(&entry.element)
                    {
                        report(&mut self.obs, target_fault(id, "remove_element", source));
                    }
                    match self.target.create_element(kind.tag_name()) {
                        Ok(element) => (element, ElementSpec::default()),
                        Err(source) => {
                            report(&mut self.obs, target_fault(id, "create_element", source));
                            chain.push(None);
                            continue;
                        }
                    }
                }
            };

            let spec = ElementSpec::build(node, false, &self.config.class_prefix);
            let written = {
                let ops = old_spec.diff(&spec);
                apply_ops(&mut self.target, &element, &ops)
            };
            let spec = match written {
                Ok(count) => {
                    writes += count as u64;
                    spec
                }
                Err(source) => {
                    report(&mut self.obs, target_fault(id, "write", source));
                    ElementSpec::default()
                }
            };
            if let Err(source) = self.target.append_child(parent_element, &element) {
                report(&mut self.obs, target_fault(id, "append_child", source));
                if let Err(source) = self.target.remove_element(&element) {
                    report(&mut self.obs, target_fault(id, "remove_element", source));
                }
                chain.push(None);
                continue;
            }

            let state = if node.visible() {
                ElementState::empty()
            } else {
                ElementState::HIDDEN
            };
            let key = self.registry.insert(
                id.clone(),
                RegistryEntry {
                    element: element.clone(),
                    path,
                    kind,
                    spec,
                    state,
                },
            );
            if let Some(parent_key) = parent_key {
                self.dirty.set_parent(key, parent_key);
            }
            drawn += 1;
            chain.push(Some((element, key)));
        }

        for (id, entry) in previous.drain() {
            if let Err(source) = self.target.remove_element(&entry.element) {
                report(&mut self.obs, target_fault(&id, "remove_element", source));
            }
        }

        self.document = Some(document);
        self.container = Some(container);
        self.set_lifecycle(Lifecycle::Rendered);

        let elapsed = self.obs.now_ms() - started;
        let metrics = &mut self.obs.metrics;
        metrics.increment(names::RENDERS_TOTAL, 1);
        metrics.increment(names::NODES_DRAWN_TOTAL, drawn);
        metrics.increment(names::ATTRIBUTE_WRITES_TOTAL, writes);
        metrics.observe(names::RENDER_DURATION_MS, elapsed);
        metrics.set_gauge(names::REGISTRY_SIZE, self.registry.len() as f64);
        metrics.set_gauge(names::DIRTY_NODES, 0.0);
        metrics.set_gauge(
            names::ESTIMATED_MEMORY_BYTES,
            self.registry.estimated_bytes() as f64,
        );
        self.obs.tracer.record(span, "nodes", drawn);
        self.obs.tracer.record(span, "writes", writes);
        self.obs.tracer.end(span);
    }

    /// Applies `patches[i]` to the node `ids[i]` and marks it and its
    /// ancestors dirty, stopping below the artboard.
    ///
    /// Descendants are not marked: child frames are parent-relative. A patch
    /// that changes nothing marks nothing. Unknown ids and mismatched patches
    /// are logged and skipped. The first mark schedules a flush; further
    /// calls before it runs join the same flush.
    pub fn update_nodes(&mut self, ids: &[NodeId], patches: Vec<NodePatch>) {
        if self.lifecycle != Lifecycle::Rendered {
            self.reject("update_nodes");
            return;
        }
        if ids.len() != patches.len() {
            report(
                &mut self.obs,
                RenderError::Arity {
                    ids: ids.len(),
                    patches: patches.len(),
                },
            );
        }
        let Some(document) = self.document.as_mut() else {
            return;
        };

        let mut applied: u64 = 0;
        let mut failed: u64 = 0;
        for (id, patch) in ids.iter().zip(patches) {
            let key = self.registry.lookup(id.as_str());
            let path = match key.and_then(|key| self.registry.get(key)) {
                Some(entry) => Some(entry.path.clone()),
                None => find_by_id(document, id.as_str()).map(|visit| visit.path),
            };
            let node = match path {
                Some(path) => resolve_path_mut(document, &path),
                None => None,
            };
            let Some(node) = node else {
                report(&mut self.obs, RenderError::Lookup { id: id.clone() });
                failed += 1;
                continue;
            };
            match node.apply_patch(patch) {
                Ok(changes) => {
                    applied += 1;
                    if let Some(key) = key
                        && !changes.is_empty()
                    {
                        self.dirty
                            .mark_with_trace(key, &AncestorPolicy, &mut self.causes);
                    }
                }
                Err(source) => {
                    report(
                        &mut self.obs,
                        RenderError::Patch {
                            id: id.clone(),
                            source,
                        },
                    );
                    failed += 1;
                }
            }
        }

        self.obs.metrics.increment(names::UPDATES_TOTAL, applied);
        self.obs.metrics.increment(names::UPDATE_FAILURES_TOTAL, failed);
        self.obs
            .metrics
            .set_gauge(names::DIRTY_NODES, self.dirty.len() as f64);
        if !self.dirty.is_clean() && !self.slot.is_armed() {
            self.schedule_flush();
        }
    }

    /// Runs the flush scheduled as `request`.
    ///
    /// Requests that are not the pending one (cancelled, already run, or
    /// foreign) are ignored.
    pub fn run_frame(&mut self, request: FrameRequest) {
        if self.lifecycle != Lifecycle::Rendered {
            self.reject("run_frame");
            return;
        }
        if self.slot.take_if(request) {
            self.flush();
        } else {
            self.obs.logger.debug(
                "stale frame ignored",
                vec![("request", request.raw().into())],
            );
        }
    }

    /// Flushes dirty nodes now, withdrawing any scheduled frame.
    pub fn flush_now(&mut self) {
        if self.lifecycle != Lifecycle::Rendered {
            self.reject("flush_now");
            return;
        }
        self.cancel_flush();
        if !self.dirty.is_clean() {
            self.flush();
        }
    }

    /// Replaces the selection with `ids`.
    ///
    /// Only elements entering or leaving the selection are written. The dirty
    /// set is never touched and no flush is scheduled.
    pub fn set_selection(&mut self, ids: &[NodeId]) {
        if self.lifecycle != Lifecycle::Rendered {
            self.reject("set_selection");
            return;
        }
        let outcome = self
            .overlay
            .apply(ids, &mut self.registry, &mut self.target);
        for (id, source) in outcome.failures {
            report(&mut self.obs, target_fault(&id, "set_selection", source));
        }
        let flipped = outcome.flipped as u64;
        self.obs
            .metrics
            .increment(names::SELECTION_CHANGES_TOTAL, flipped);
        self.obs
            .metrics
            .increment(names::ATTRIBUTE_WRITES_TOTAL, flipped);
    }

    /// Topmost visible node of the current document under `point`.
    ///
    /// See [`hit_test`](crate::hit_test) for the rules.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&Node> {
        hit::hit_test(self.document.as_ref()?, point)
    }

    /// Number of nodes waiting for the next flush.
    #[must_use]
    pub fn dirty_node_count(&self) -> usize {
        self.dirty.len()
    }

    /// Whether `id` waits for the next flush.
    #[must_use]
    pub fn is_dirty(&self, id: &str) -> bool {
        self.registry
            .lookup(id)
            .is_some_and(|key| self.dirty.is_dirty(key))
    }

    /// Why `id` waits for the next flush.
    ///
    /// Returns the chain of node ids from the node that was patched up to
    /// `id`, both included. `None` when `id` is clean or unknown.
    ///
    /// ```rust
    /// use easel_document::{
    ///     Artboard, CommonPatch, Document, Node, NodeId, NodePatch, NodeTag, Rect,
    /// };
    /// use easel_render::{CanvasRenderer, ManualScheduler, MemoryTarget};
    ///
    /// let doc = Document::new("doc", "Demo").with_artboard(
    ///     Artboard::new("board", Rect::new(0.0, 0.0, 800.0, 600.0)).with_child(
    ///         Node::frame("card", Rect::new(0.0, 0.0, 100.0, 100.0))
    ///             .with_child(Node::frame("inner", Rect::new(0.0, 0.0, 10.0, 10.0))),
    ///     ),
    /// );
    /// let mut target = MemoryTarget::new();
    /// let container = target.create_container();
    /// let mut renderer = CanvasRenderer::new(target, ManualScheduler::new());
    /// renderer.render(doc, container);
    ///
    /// let moved = CommonPatch {
    ///     frame: Some(Rect::new(5.0, 5.0, 10.0, 10.0)),
    ///     ..CommonPatch::default()
    /// };
    /// renderer.update_nodes(&["inner".into()], vec![NodePatch::common_only(NodeTag::Frame, moved)]);
    /// let chain = renderer.dirty_cause("card").unwrap();
    /// assert_eq!(chain, [NodeId::from("inner"), NodeId::from("card")]);
    /// ```
    #[must_use]
    pub fn dirty_cause(&self, id: &str) -> Option<Vec<NodeId>> {
        let key = self.registry.lookup(id)?;
        if !self.dirty.is_dirty(key) {
            return None;
        }
        self.causes
            .explain_path(key)?
            .into_iter()
            .map(|key| self.registry.node_id(key).cloned())
            .collect()
    }

    /// Tears the renderer down.
    ///
    /// Cancels the pending flush, empties the container, removes every
    /// element, and forgets the document. Every later call is a logged no-op.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            self.reject("destroy");
            return;
        }
        self.cancel_flush();
        if let Some(container) = self.container.take()
            && let Err(source) = self.target.clear_children(&container)
        {
            report(
                &mut self.obs,
                RenderError::Surface {
                    operation: "clear_children",
                    source,
                },
            );
        }
        for (id, entry) in self.registry.drain() {
            if let Err(source) = self.target.remove_element(&entry.element) {
                report(&mut self.obs, target_fault(&id, "remove_element", source));
            }
        }
        self.dirty.reset();
        self.causes.clear();
        self.overlay.reset();
        self.document = None;
        self.obs
            .metrics
            .set_gauge(names::REGISTRY_SIZE, 0.0);
        self.obs.metrics.set_gauge(names::DIRTY_NODES, 0.0);
        self.obs
            .metrics
            .set_gauge(names::ESTIMATED_MEMORY_BYTES, 0.0);
        self.set_lifecycle(Lifecycle::Destroyed);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// The metrics, tracer, and logger of this instance.
    #[must_use]
    pub fn observability(&self) -> &Observability {
        &self.obs
    }

    /// Mutable instruments, for hosts that reset or drain them.
    pub fn observability_mut(&mut self) -> &mut Observability {
        &mut self.obs
    }

    /// The configuration this renderer was built with.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The presentation surface.
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The presentation surface, mutably.
    ///
    /// Writing to elements the renderer owns desynchronizes its diff state;
    /// the next full render repairs it.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// The frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The frame scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The scheduled flush, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.slot.armed()
    }

    /// The rendered document.
    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The container of the current build.
    #[must_use]
    pub fn container(&self) -> Option<&T::Element> {
        self.container.as_ref()
    }

    /// The element drawn for `id`.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&T::Element> {
        self.registry.get_by_id(id).map(|entry| &entry.element)
    }

    /// Presentation state of the element drawn for `id`.
    #[must_use]
    pub fn element_state(&self, id: &str) -> Option<ElementState> {
        self.registry.get_by_id(id).map(|entry| entry.state)
    }

    /// The node-id to element registry.
    #[must_use]
    pub fn registry(&self) -> &Registry<T::Element> {
        &self.registry
    }

    /// Selected ids, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        self.overlay.selection().items()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn flush(&mut self) {
        let span = self.obs.tracer.start("flush");
        let started = self.obs.now_ms();
        let mut keys: Vec<InternId> = self.dirty.drain().collect();
        keys.sort_unstable();
        self.causes.clear();

        let mut drawn: u64 = 0;
        let mut writes: u64 = 0;
        if let Some(document) = self.document.as_ref() {
            for &key in &keys {
                let Some(entry) = self.registry.get_mut(key) else {
                    continue;
                };
                let Some(node) = resolve_path(document, &entry.path) else {
                    if let Some(id) = self.registry.node_id(key) {
                        report(&mut self.obs, RenderError::Lookup { id: id.clone() });
                    }
                    continue;
                };
                let selected = entry.state.contains(ElementState::SELECTED);
                let spec = ElementSpec::build(node, selected, &self.config.class_prefix);
                let written = {
                    let ops = entry.spec.diff(&spec);
                    apply_ops(&mut self.target, &entry.element, &ops)
                };
                match written {
                    Ok(count) => {
                        writes += count as u64;
                        entry.spec = spec;
                        entry.state.set(ElementState::HIDDEN, !node.visible());
                        drawn += 1;
                    }
                    Err(source) => {
                        // Unknown element contents: rewrite everything next time.
                        entry.spec = ElementSpec::default();
                        if let Some(id) = self.registry.node_id(key) {
                            report(&mut self.obs, target_fault(id, "write", source));
                        }
                    }
                }
            }
        }

        let now = self.obs.now_ms();
        let metrics = &mut self.obs.metrics;
        metrics.increment(names::FLUSHES_TOTAL, 1);
        metrics.increment(names::NODES_DRAWN_TOTAL, drawn);
        metrics.increment(names::ATTRIBUTE_WRITES_TOTAL, writes);
        metrics.observe(names::FRAME_DURATION_MS, now - started);
        metrics.set_gauge(names::DIRTY_NODES, 0.0);
        if let Some(last) = self.last_flush_ms.replace(now) {
            let interval = now - last;
            if interval > 0.0 {
                metrics.set_gauge(names::FPS, 1000.0 / interval);
            }
        }
        self.obs.tracer.record(span, "dirty", keys.len());
        self.obs.tracer.record(span, "writes", writes);
        self.obs.tracer.end(span);
    }

    fn schedule_flush(&mut self) {
        match self.scheduler.request_frame() {
            Ok(request) => self.slot.arm(request),
            Err(source) => {
                report(
                    &mut self.obs,
                    RenderError::Surface {
                        operation: "request_frame",
                        source,
                    },
                );
                // Without a frame callback, flush synchronously.
                self.flush();
            }
        }
    }

    fn cancel_flush(&mut self) {
        if let Some(request) = self.slot.cancel() {
            self.scheduler.cancel_frame(request);
        }
    }

    fn reject(&mut self, operation: &'static str) {
        let state = self.lifecycle;
        report(&mut self.obs, RenderError::State { operation, state });
    }

    fn set_lifecycle(&mut self, next: Lifecycle) {
        if self.lifecycle != next && self.config.observe.emit_tracing {
            tracing::debug!(
                target: "easel::render",
                from = self.lifecycle.as_str(),
                to = next.as_str(),
                "lifecycle transition"
            );
        }
        self.lifecycle = next;
    }
}

fn report(obs: &mut Observability, error: RenderError) {
    obs.logger.log(error.level(), error.to_string(), error.fields());
}

fn target_fault(id: &NodeId, operation: &'static str, source: TargetError) -> RenderError {
    RenderError::Target {
        id: id.clone(),
        operation,
        source,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_clock() -> Rc<dyn Clock> {
    Rc::new(easel_observe::MonotonicClock::new())
}

#[cfg(target_arch = "wasm32")]
fn default_clock() -> Rc<dyn Clock> {
    match crate::web::PerformanceClock::from_window() {
        Some(clock) => Rc::new(clock),
        None => Rc::new(easel_observe::ManualClock::default()),
    }
}
