//! Outside-interaction detection
//!
//! The host forwards every pointer interaction to an [`InteractionHub`]. Components
//! register the region they occupy and get called back for each interaction that lands
//! outside it. Registrations are tied to an [`OutsideInteractionGuard`]; dropping the
//! guard removes the listener. A mounted component also removes its listeners when it
//! unmounts, whether or not the host still holds the guards.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// A pointer position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; the right and bottom edges are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && px < x + i64::from(self.width) && py >= y && py < y + i64::from(self.height)
    }
}

/// The area a component occupies, possibly made of several rectangles
/// (e.g. the input plus its dropdown)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Region {
    parts: Vec<Bounds>,
}

impl Region {
    pub fn new(parts: impl IntoIterator<Item = Bounds>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.parts.iter().any(|b| b.contains(point))
    }
}

impl From<Bounds> for Region {
    fn from(bounds: Bounds) -> Self {
        Self::new([bounds])
    }
}

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Listener {
    region: Region,
    callback: Callback,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Fan-out point for pointer interactions
#[derive(Clone, Default)]
pub struct InteractionHub {
    inner: Arc<Mutex<HubInner>>,
}

impl InteractionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` for every interaction outside `region` until the guard is dropped
    pub fn on_outside<F>(&self, region: impl Into<Region>, callback: F) -> OutsideInteractionGuard
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.insert(
            id,
            Listener {
                region: region.into(),
                callback: Arc::new(callback),
            },
        );

        OutsideInteractionGuard {
            registration: Registration {
                id,
                hub: Arc::downgrade(&self.inner),
            },
        }
    }

    /// Deliver one interaction; returns how many listeners it was outside of
    pub fn dispatch(&self, point: Point) -> usize {
        // Callbacks run without the lock so they may register or drop guards.
        let callbacks: Vec<Callback> = self
            .inner
            .lock()
            .listeners
            .values()
            .filter(|l| !l.region.contains(point))
            .map(|l| Arc::clone(&l.callback))
            .collect();

        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

/// Weak reference to one listener entry in a hub
#[derive(Clone)]
pub(crate) struct Registration {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Registration {
    /// Remove the listener; later calls are no-ops
    pub(crate) fn remove(&self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.lock().listeners.remove(&self.id);
        }
    }
}

/// Keeps an outside-interaction listener registered
#[must_use = "the listener is removed when the guard is dropped"]
pub struct OutsideInteractionGuard {
    registration: Registration,
}

impl OutsideInteractionGuard {
    /// Update the region after the component moved or resized
    pub fn set_region(&self, region: impl Into<Region>) {
        if let Some(hub) = self.registration.hub.upgrade() {
            if let Some(listener) = hub.lock().listeners.get_mut(&self.registration.id) {
                listener.region = region.into();
            }
        }
    }

    pub(crate) fn registration(&self) -> Registration {
        self.registration.clone()
    }
}

impl Drop for OutsideInteractionGuard {
    fn drop(&mut self) {
        self.registration.remove();
    }
}
