//! Global input surface that interaction listeners subscribe to.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;
use tracing::trace;

/// Buffered events per listener before older ones are dropped.
const SURFACE_CAPACITY: usize = 256;

/// Interaction event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// Pointer button pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Key pressed.
    KeyDown,
    /// Page or element scrolled.
    Scroll,
    /// Touch started.
    TouchStart,
    /// Click completed.
    Click,
}

impl InteractionKind {
    /// Every interaction that counts as admin activity.
    pub const TRACKED: [InteractionKind; 6] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::KeyDown,
        Self::Scroll,
        Self::TouchStart,
        Self::Click,
    ];

    /// DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::PointerMove => "mousemove",
            Self::KeyDown => "keypress",
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
            Self::Click => "click",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listener registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// A passive listener never prevents the default action of an event.
    pub passive: bool,
}

impl ListenerOptions {
    /// Passive registration.
    pub fn passive() -> Self {
        Self { passive: true }
    }

    /// Registration that may prevent the default action.
    pub fn blocking() -> Self {
        Self { passive: false }
    }
}

#[derive(Debug)]
struct SurfaceInner {
    sender: broadcast::Sender<InteractionKind>,
    blocking_listeners: AtomicUsize,
}

/// Broadcast point for interaction events.
///
/// Cloning yields another handle to the same surface.
#[derive(Debug, Clone)]
pub struct InputSurface {
    inner: Arc<SurfaceInner>,
}

impl Default for InputSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSurface {
    /// Create a surface with no listeners.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SURFACE_CAPACITY);
        Self {
            inner: Arc::new(SurfaceInner {
                sender,
                blocking_listeners: AtomicUsize::new(0),
            }),
        }
    }

    /// Register a listener for the given event kinds.
    pub fn listen(&self, kinds: &[InteractionKind], options: ListenerOptions) -> Listener {
        if !options.passive {
            self.inner.blocking_listeners.fetch_add(1, Ordering::SeqCst);
        }
        Listener {
            receiver: self.inner.sender.subscribe(),
            kinds: kinds.to_vec(),
            options,
            surface: Arc::clone(&self.inner),
        }
    }

    /// Deliver an event to every listener.
    ///
    /// Returns `true` when the default action may proceed without waiting
    /// on any listener, i.e. no blocking listener is registered.
    pub fn dispatch(&self, kind: InteractionKind) -> bool {
        let delivered = self.inner.sender.send(kind).unwrap_or(0);
        trace!(event = %kind, delivered, "Dispatched interaction");
        self.inner.blocking_listeners.load(Ordering::SeqCst) == 0
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.sender.receiver_count()
    }
}

/// A registration on an [`InputSurface`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Listener {
    receiver: broadcast::Receiver<InteractionKind>,
    kinds: Vec<InteractionKind>,
    options: ListenerOptions,
    surface: Arc<SurfaceInner>,
}

impl Listener {
    /// Options this listener was registered with.
    pub fn options(&self) -> ListenerOptions {
        self.options
    }

    /// Wait for the next event of a subscribed kind.
    ///
    /// Returns `None` if the surface channel is closed.
    pub async fn recv(&mut self) -> Option<InteractionKind> {
        loop {
            match self.receiver.recv().await {
                Ok(kind) if self.kinds.contains(&kind) => return Some(kind),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!(skipped, "Interaction listener lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if !self.options.passive {
            self.surface
                .blocking_listeners
                .fetch_sub(1, Ordering::SeqCst);
        }
    }
}
