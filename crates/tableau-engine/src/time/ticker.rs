use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Registration token handed out by [`Ticker::add`].
    ///
    /// Tokens are generational: once removed, a token never matches a later
    /// registration that happens to reuse its slot.
    pub struct TickerToken;
}

#[derive(Debug)]
struct Entry<T> {
    target: T,
    prev: Option<TickerToken>,
    next: Option<TickerToken>,
}

/// Shared per-frame callback source.
///
/// Targets are invoked exactly once per [`tick`](Ticker::tick), in registration
/// order. Registration order is kept as an intrusive doubly-linked list over a
/// slot map, so `add` and `remove` are both O(1).
///
/// The ticker never skips or coalesces ticks; the caller passes whatever delta
/// the host actually observed.
#[derive(Debug)]
pub struct Ticker<T> {
    entries: SlotMap<TickerToken, Entry<T>>,
    head: Option<TickerToken>,
    tail: Option<TickerToken>,
}

impl<T> Ticker<T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    /// Registers `target` at the end of the tick order.
    pub fn add(&mut self, target: T) -> TickerToken {
        let prev = self.tail;
        let token = self.entries.insert(Entry {
            target,
            prev,
            next: None,
        });

        match prev.and_then(|p| self.entries.get_mut(p)) {
            Some(tail) => tail.next = Some(token),
            None => self.head = Some(token),
        }
        self.tail = Some(token);

        token
    }

    /// Unregisters a target. Returns `None` for stale or unknown tokens.
    pub fn remove(&mut self, token: TickerToken) -> Option<T> {
        let entry = self.entries.remove(token)?;

        match entry.prev.and_then(|p| self.entries.get_mut(p)) {
            Some(prev) => prev.next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next.and_then(|n| self.entries.get_mut(n)) {
            Some(next) => next.prev = entry.prev,
            None => self.tail = entry.prev,
        }

        Some(entry.target)
    }

    #[inline]
    pub fn contains(&self, token: TickerToken) -> bool {
        self.entries.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates registered targets in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &T> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let entry = self.entries.get(cursor?)?;
            cursor = entry.next;
            Some(&entry.target)
        })
    }

    /// Invokes `f` once for every registered target, in registration order.
    ///
    /// `delta` is forwarded untouched.
    pub fn tick<F>(&self, delta: f32, mut f: F)
    where
        F: FnMut(&T, f32),
    {
        for target in self.targets() {
            f(target, delta);
        }
    }
}

impl<T> Default for Ticker<T> {
    fn default() -> Self {
        Self::new()
    }
}
