//! Render orchestration: sequences compositing, mapping, rendering,
//! normalization and frame overlay for one immutable style snapshot, and
//! owns the cancellation/re-render lifecycle.
//!
//! Ordering guarantee: last-trigger-wins. Every trigger bumps a
//! monotonically increasing generation; an in-flight pass compares its id
//! against the generation at each resume point and silently discards its
//! result once superseded. Cancellation is cooperative: the work is not
//! aborted, only its commit is suppressed.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::VeneerResult,
    frame_overlay,
    logo_composite,
    normalize::normalize,
    renderer::MatrixRenderer,
    style::StyleConfig,
    style_map::{self, RendererOptions},
    surface::OutputContainer,
};

/// Identifier of one render pass; equal to the generation at trigger time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PassId(pub u64);

/// Lifecycle of one pass. `Cancelled` is reachable from `Compositing` and
/// `Rendering` only, the two stages that resume after a suspension point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassState {
    Idle,
    Compositing,
    Mapping,
    Rendering,
    Normalizing,
    Overlaying,
    Done,
    Cancelled,
}

impl PassState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

/// One (payload, style) snapshot to render. The payload is opaque; the
/// engine never inspects or validates it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub payload: String,
    pub size_px: u32,
    pub style: StyleConfig,
}

/// An in-flight pass. Steppable so supersession between suspension points
/// is observable and testable.
#[derive(Debug)]
pub struct RenderPass {
    id: PassId,
    state: PassState,
    request: RenderRequest,
    image: Option<String>,
    options: Option<RendererOptions>,
    container: Option<OutputContainer>,
}

impl RenderPass {
    pub fn id(&self) -> PassId {
        self.id
    }

    pub fn state(&self) -> PassState {
        self.state
    }
}

/// Drives render passes against an external renderer and owns the one
/// committed output container.
pub struct RenderOrchestrator<R: MatrixRenderer> {
    renderer: R,
    generation: AtomicU64,
    committed: Option<(PassId, OutputContainer)>,
}

impl<R: MatrixRenderer> RenderOrchestrator<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            generation: AtomicU64::new(0),
            committed: None,
        }
    }

    /// The most recently committed output, if any pass has finished.
    pub fn committed(&self) -> Option<&OutputContainer> {
        self.committed.as_ref().map(|(_, c)| c)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Starts a new pass for a changed style or payload, superseding any
    /// pass still in flight.
    pub fn trigger(&self, request: RenderRequest) -> VeneerResult<RenderPass> {
        request.style.validate()?;
        let id = PassId(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        tracing::debug!(pass = id.0, "render pass triggered");
        Ok(RenderPass {
            id,
            state: PassState::Idle,
            request,
            image: None,
            options: None,
            container: None,
        })
    }

    /// Runs one pass to a terminal state and reports how it ended.
    #[tracing::instrument(skip(self, request), fields(size_px = request.size_px))]
    pub fn render(&mut self, request: RenderRequest) -> VeneerResult<PassState> {
        let mut pass = self.trigger(request)?;
        loop {
            let state = self.step(&mut pass)?;
            if state.is_terminal() {
                return Ok(state);
            }
        }
    }

    /// Advances the pass by one stage. Renderer failures abort the pass
    /// and propagate; the previously committed output stays untouched.
    pub fn step(&mut self, pass: &mut RenderPass) -> VeneerResult<PassState> {
        match pass.state {
            PassState::Idle => {
                pass.image = self.composite_stage(&pass.request);
                pass.state = PassState::Compositing;
            }
            PassState::Compositing => {
                // Resume point after the image-decode suspension.
                if self.superseded(pass.id) {
                    pass.state = PassState::Cancelled;
                } else {
                    pass.options = Some(style_map::renderer_options(
                        &pass.request.payload,
                        pass.request.size_px,
                        &pass.request.style,
                        pass.image.take(),
                    ));
                    pass.state = PassState::Mapping;
                }
            }
            PassState::Mapping => {
                let options = pass.options.as_ref().ok_or_else(|| {
                    crate::error::VeneerError::Other(anyhow::anyhow!(
                        "render pass stepped out of order: options missing"
                    ))
                })?;
                let surface = self.renderer.render(options)?;
                pass.container = Some(OutputContainer {
                    surface,
                    frame: None,
                });
                pass.state = PassState::Rendering;
            }
            PassState::Rendering => {
                // Resume point after the external render step. From here to
                // commit there are no further suspension points, so one
                // supersession check guards every container mutation.
                if self.superseded(pass.id) {
                    pass.state = PassState::Cancelled;
                } else {
                    let mut container = pass.container.take().ok_or_else(|| {
                        crate::error::VeneerError::Other(anyhow::anyhow!(
                            "render pass stepped out of order: surface missing"
                        ))
                    })?;
                    let background = style_map::resolved_background(&pass.request.style);
                    normalize(&mut container.surface, background.as_deref());
                    pass.state = PassState::Normalizing;

                    frame_overlay::overlay(&mut container, &pass.request.style.frame);
                    pass.state = PassState::Overlaying;

                    tracing::debug!(pass = pass.id.0, "committing render pass");
                    self.committed = Some((pass.id, container));
                    pass.state = PassState::Done;
                }
            }
            PassState::Normalizing | PassState::Overlaying => {
                // Transient states inside the commit tail; stepping from
                // them is only reachable if a caller replays a pass.
                pass.state = PassState::Done;
            }
            PassState::Done | PassState::Cancelled => {}
        }

        if pass.state == PassState::Cancelled {
            tracing::debug!(pass = pass.id.0, "render pass superseded; result discarded");
        }
        Ok(pass.state)
    }

    fn superseded(&self, id: PassId) -> bool {
        self.generation.load(Ordering::SeqCst) != id.0
    }

    /// Compositing stage: flatten logo + background shape when configured.
    /// Decode or compositing failures fall back to the uncomposited logo
    /// source rather than aborting the pass.
    fn composite_stage(&self, request: &RenderRequest) -> Option<String> {
        let logo = request.style.logo.as_ref()?;
        let Some(bg) = &logo.background else {
            return Some(logo.source.clone());
        };

        let composited = logo_composite::decode_logo(&logo.source).and_then(|img| {
            logo_composite::composite(&img, bg, request.size_px, logo.size_percent)
        });
        match composited {
            Ok(composite) => Some(composite.data_url),
            Err(err) => {
                tracing::warn!(%err, "logo composite failed; falling back to uncomposited logo");
                Some(logo.source.clone())
            }
        }
    }
}
