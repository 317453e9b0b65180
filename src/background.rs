//! Fluid background component: mounts a [`FluidField`] on a render surface.
//!
//! Pointer events only write the shared target cell; the frame step is the
//! only reader of that cell and the only writer of the smoothed position.

use std::cell::Cell;
use std::rc::Rc;

use glam::DVec2;
use log::debug;

use crate::field::FluidField;
use crate::frame::{CancellationToken, FrameControl, FrameLoop};
use crate::surface::{EventKind, RenderSurface, Subscription, SurfaceEvent};

/// Mounted fluid background
pub struct FluidBackground {
    field: FluidField,
    frame_loop: FrameLoop,
    pointer_target: Rc<Cell<DVec2>>,
    pending_resize: Rc<Cell<Option<(u32, u32)>>>,
    _pointer_sub: Subscription,
    _resize_sub: Subscription,
}

impl FluidBackground {
    /// Mount on `surface`.
    ///
    /// Returns `None` without subscribing to anything when the surface has no
    /// drawing context.
    pub fn mount(surface: &mut dyn RenderSurface, field: FluidField) -> Option<Self> {
        if surface.context().is_none() {
            debug!("No drawing context, fluid background disabled");
            return None;
        }

        let pointer_target = Rc::new(Cell::new(field.pointer().target));
        let pending_resize = Rc::new(Cell::new(None));

        let target = Rc::clone(&pointer_target);
        let pointer_sub = surface.events().subscribe(EventKind::Pointer, move |event| {
            if let SurfaceEvent::PointerMoved { x, y } = *event {
                target.set(DVec2::new(x, y));
            }
        });

        let resize = Rc::clone(&pending_resize);
        let resize_sub = surface.events().subscribe(EventKind::Resize, move |event| {
            if let SurfaceEvent::Resized { width, height } = *event {
                resize.set(Some((width, height)));
            }
        });

        // Size the canvas to the surface before the first frame
        let (width, height) = surface.size();
        if let Some(canvas) = surface.context() {
            if canvas.size() != (width, height) {
                canvas.resize(width, height);
            }
        }

        debug!("Fluid background mounted ({}x{})", width, height);

        Some(Self {
            field,
            frame_loop: FrameLoop::new(CancellationToken::new()),
            pointer_target,
            pending_resize,
            _pointer_sub: pointer_sub,
            _resize_sub: resize_sub,
        })
    }

    pub fn field(&self) -> &FluidField {
        &self.field
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    /// Token that stops this background's frame loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.frame_loop.token().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.frame_loop.token().is_cancelled()
    }

    /// Render one frame onto `surface`.
    ///
    /// Returns whether another frame should be requested.
    pub fn frame(&mut self, surface: &mut dyn RenderSurface) -> bool {
        let field = &mut self.field;
        let pointer_target = &self.pointer_target;
        let pending_resize = &self.pending_resize;
        let pixel_ratio = surface.pixel_ratio();

        self.frame_loop.tick(|_| {
            let Some(canvas) = surface.context() else {
                return FrameControl::Stop;
            };
            if let Some((width, height)) = pending_resize.take() {
                debug!("Resizing fluid canvas to {}x{}", width, height);
                canvas.resize(width, height);
            }
            field.set_pointer_target(pointer_target.get());
            field.render(canvas, pixel_ratio);
            FrameControl::Continue
        })
    }

    /// Stop the frame loop and release subscriptions
    pub fn unmount(self) {
        debug!("Fluid background unmounted after {} frames", self.frames());
    }
}

impl Drop for FluidBackground {
    fn drop(&mut self) {
        self.frame_loop.token().cancel();
    }
}
