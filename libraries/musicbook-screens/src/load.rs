//! Load state and request generations shared by the data-fetching screens.

/// Identifies one request issued by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets and remembers which one is current.
///
/// A screen begins every fetch with [`RequestTracker::begin`] and applies the
/// response only while its ticket is still current. Anything that makes an
/// in-flight response meaningless (new parameter, unmount) moves the
/// generation forward.
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; all earlier tickets become stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Ticket of the most recent request, without starting a new one.
    pub fn current(&self) -> Ticket {
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

/// Remote data as seen by a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    /// Nothing requested yet
    Idle,
    /// Request in flight
    Loading,
    /// Request failed; holds the message shown instead of the content
    Failed(&'static str),
    Ready(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            Loadable::Failed(message) => Some(*message),
            _ => None,
        }
    }
}

/// Put `item` at the head of `list`.
///
/// Used for locally created records: the merged list is a client-side
/// snapshot and is not re-checked against the server until the next full
/// fetch.
pub fn prepend<T>(mut list: Vec<T>, item: T) -> Vec<T> {
    list.insert(0, item);
    list
}
