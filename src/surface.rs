//! Render surfaces and their event subscriptions.
//!
//! A surface owns its pointer/resize event hub. Components subscribe through
//! the hub and hold the returned [`Subscription`]; dropping it detaches the
//! listener, so nothing outlives the component that registered it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::canvas::Canvas;

/// Host events delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Pointer position normalized to [0, 1] over the surface
    PointerMoved { x: f64, y: f64 },
    /// New surface size in physical pixels
    Resized { width: u32, height: u32 },
}

impl SurfaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::PointerMoved { .. } => EventKind::Pointer,
            SurfaceEvent::Resized { .. } => EventKind::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Pointer,
    Resize,
}

type Listener = Box<dyn FnMut(&SurfaceEvent)>;
type Entry = (u64, EventKind, Listener);

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<Entry>,
    /// Nesting depth of in-flight dispatches
    dispatching: usize,
    /// Ids unsubscribed while a dispatch had the listeners checked out
    detached: Vec<u64>,
}

impl HubInner {
    /// Pull out detached listeners; the caller drops them after releasing
    /// the borrow, since a listener may own another `Subscription`.
    fn take_detached(&mut self) -> Vec<Entry> {
        if self.dispatching > 0 || self.detached.is_empty() {
            return Vec::new();
        }
        let ids = std::mem::take(&mut self.detached);
        let (gone, kept) = std::mem::take(&mut self.listeners)
            .into_iter()
            .partition(|(id, _, _)| ids.contains(id));
        self.listeners = kept;
        gone
    }
}

/// Single-threaded listener registry.
///
/// Listeners may subscribe or drop subscriptions while an event is being
/// delivered. New listeners receive events from the next dispatch on;
/// detached ones stop receiving immediately.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for events of `kind`
    pub fn subscribe(
        &self,
        kind: EventKind,
        listener: impl FnMut(&SurfaceEvent) + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, kind, Box::new(listener)));
        Subscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every matching listener; returns how many ran
    pub fn dispatch(&self, event: &SurfaceEvent) -> usize {
        let kind = event.kind();

        // Check the listeners out so none of them runs under a borrow
        let mut active = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatching += 1;
            std::mem::take(&mut inner.listeners)
        };

        let mut delivered = 0;
        for (id, k, listener) in active.iter_mut() {
            if *k != kind || self.inner.borrow().detached.contains(id) {
                continue;
            }
            listener(event);
            delivered += 1;
        }

        let gone = {
            let mut inner = self.inner.borrow_mut();
            inner.dispatching -= 1;
            let added = std::mem::replace(&mut inner.listeners, active);
            inner.listeners.extend(added);
            inner.take_detached()
        };
        drop(gone);
        delivered
    }

    /// Registered listeners of `kind` (listeners are checked out during a
    /// dispatch, so only ones added by it are visible then)
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Live listener registration; detaches on drop
#[must_use = "dropping a Subscription detaches the listener"]
pub struct Subscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let gone = {
            let mut inner = hub.borrow_mut();
            inner.detached.push(self.id);
            inner.take_detached()
        };
        drop(gone);
    }
}

/// A target the fluid background can be mounted on
pub trait RenderSurface {
    /// Size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Physical pixels per logical pixel
    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    fn events(&self) -> &EventHub;

    /// Drawing context, or `None` when the host cannot provide one
    fn context(&mut self) -> Option<&mut Canvas>;
}

/// In-memory surface for recording and tests
pub struct HeadlessSurface {
    size: (u32, u32),
    pixel_ratio: f64,
    canvas: Option<Canvas>,
    events: EventHub,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            pixel_ratio: 1.0,
            canvas: Some(Canvas::new(width, height)),
            events: EventHub::new(),
        }
    }

    /// Surface that cannot hand out a drawing context
    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            canvas: None,
            ..Self::new(width, height)
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Dispatch a pointer move at normalized (x, y)
    pub fn move_pointer(&self, x: f64, y: f64) -> usize {
        self.events.dispatch(&SurfaceEvent::PointerMoved { x, y })
    }

    /// Change size and notify subscribers
    pub fn resize(&mut self, width: u32, height: u32) -> usize {
        self.size = (width, height);
        self.events
            .dispatch(&SurfaceEvent::Resized { width, height })
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn events(&self) -> &EventHub {
        &self.events
    }

    fn context(&mut self) -> Option<&mut Canvas> {
        self.canvas.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_filters_by_kind() {
        let hub = EventHub::new();
        let pointer_hits = Rc::new(Cell::new(0));
        let resize_hits = Rc::new(Cell::new(0));

        let p = Rc::clone(&pointer_hits);
        let _pointer = hub.subscribe(EventKind::Pointer, move |_| p.set(p.get() + 1));
        let r = Rc::clone(&resize_hits);
        let _resize = hub.subscribe(EventKind::Resize, move |_| r.set(r.get() + 1));

        assert_eq!(hub.dispatch(&SurfaceEvent::PointerMoved { x: 0.1, y: 0.2 }), 1);
        assert_eq!(hub.dispatch(&SurfaceEvent::PointerMoved { x: 0.3, y: 0.4 }), 1);
        assert_eq!(
            hub.dispatch(&SurfaceEvent::Resized {
                width: 10,
                height: 10
            }),
            1
        );

        assert_eq!(pointer_hits.get(), 2);
        assert_eq!(resize_hits.get(), 1);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let hub = EventHub::new();
        let sub = hub.subscribe(EventKind::Pointer, |_| {});
        let other = hub.subscribe(EventKind::Pointer, |_| {});
        assert_eq!(hub.listener_count(EventKind::Pointer), 2);

        drop(sub);
        assert_eq!(hub.listener_count(EventKind::Pointer), 1);
        drop(other);
        assert_eq!(hub.total_listeners(), 0);
        assert_eq!(hub.dispatch(&SurfaceEvent::PointerMoved { x: 0.0, y: 0.0 }), 0);
    }

    #[test]
    fn test_listener_can_drop_its_own_subscription() {
        let hub = EventHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let s = Rc::clone(&slot);
        let sub = hub.subscribe(EventKind::Pointer, move |_| {
            let own = s.borrow_mut().take();
            drop(own);
        });
        *slot.borrow_mut() = Some(sub);

        let moved = SurfaceEvent::PointerMoved { x: 0.5, y: 0.5 };
        assert_eq!(hub.dispatch(&moved), 1);
        assert_eq!(hub.total_listeners(), 0);
        assert_eq!(hub.dispatch(&moved), 0);
    }

    #[test]
    fn test_drop_during_dispatch_skips_pending_listener() {
        let hub = EventHub::new();
        let later_hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let s = Rc::clone(&slot);
        let _first = hub.subscribe(EventKind::Pointer, move |_| {
            let other = s.borrow_mut().take();
            drop(other);
        });
        let hits = Rc::clone(&later_hits);
        *slot.borrow_mut() = Some(hub.subscribe(EventKind::Pointer, move |_| {
            hits.set(hits.get() + 1)
        }));

        assert_eq!(hub.dispatch(&SurfaceEvent::PointerMoved { x: 0.0, y: 0.0 }), 1);
        assert_eq!(later_hits.get(), 0);
        assert_eq!(hub.listener_count(EventKind::Pointer), 1);
    }

    #[test]
    fn test_listener_can_subscribe_during_dispatch() {
        let hub = EventHub::new();
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::default();

        let (h, l) = (hub.clone(), Rc::clone(&late));
        let _spawner = hub.subscribe(EventKind::Resize, move |_| {
            let sub = h.subscribe(EventKind::Resize, |_| {});
            l.borrow_mut().push(sub);
        });

        let resized = SurfaceEvent::Resized {
            width: 4,
            height: 4,
        };
        assert_eq!(hub.dispatch(&resized), 1);
        assert_eq!(hub.total_listeners(), 2);
        assert_eq!(hub.dispatch(&resized), 2);
        assert_eq!(hub.total_listeners(), 3);

        late.borrow_mut().clear();
        assert_eq!(hub.total_listeners(), 1);
    }

    #[test]
    fn test_listener_owning_subscription_drops_cleanly() {
        let hub = EventHub::new();
        let inner = hub.subscribe(EventKind::Resize, |_| {});
        let outer = hub.subscribe(EventKind::Pointer, move |_| {
            let _held = &inner;
        });
        assert_eq!(hub.total_listeners(), 2);

        drop(outer);
        assert_eq!(hub.total_listeners(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let sub = hub.subscribe(EventKind::Resize, |_| {});
        drop(hub);
        drop(sub);
    }

    #[test]
    fn test_headless_without_context() {
        let mut surface = HeadlessSurface::without_context(32, 32);
        assert!(surface.context().is_none());
        assert_eq!(surface.size(), (32, 32));
    }
}
