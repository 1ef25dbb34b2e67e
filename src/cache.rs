//! The fixed-capacity ring-buffer cache core.

/// One ring-buffer position, holding at most one memoized entry.
///
/// `Empty` is a real sentinel, not a zero-length argument list: shallow
/// equality against an empty slot is always false, so a cleared or
/// not-yet-filled slot can never be mistaken for a live entry.
#[derive(Debug, Clone)]
pub(crate) enum Slot<A, R> {
    Empty,
    Occupied { args: Vec<A>, result: R },
}

impl<A, R> Slot<A, R> {
    /// Whether this slot holds an entry whose argument list shallow-equals
    /// `args` under `eq`.
    fn matches<E>(&self, args: &[A], eq: &E) -> bool
    where
        E: Fn(&A, &A) -> bool + ?Sized,
    {
        match self {
            Slot::Empty => false,
            Slot::Occupied { args: stored, .. } => shallow_eq(stored, args, eq),
        }
    }
}

/// Positional shallow equality over two argument lists.
///
/// The lengths must match and `eq` must hold at every index; the comparison
/// short-circuits on the first mismatch.
fn shallow_eq<A, E>(prev: &[A], next: &[A], eq: &E) -> bool
where
    E: Fn(&A, &A) -> bool + ?Sized,
{
    prev.len() == next.len() && prev.iter().zip(next).all(|(p, n)| eq(p, n))
}

/// A bounded cache over argument lists, stored as a ring buffer.
///
/// Entries are logically ordered from most-recently-inserted to
/// least-recently-inserted, but live in a fixed array indexed by two
/// wrap-around integers, so inserting and evicting never shifts elements.
/// Hits do not reorder entries; eviction is strictly by insertion age.
pub(crate) struct RingCache<A, R> {
    slots: Box<[Slot<A, R>]>,
    /// Index of the most recently inserted slot. Starts at `N` (out of
    /// range) so the first insertion wraps onto `N - 1`; entries then fill
    /// back to front.
    last_index: usize,
    /// Number of live entries. Grows until it reaches `N` and stays there;
    /// from then on entries are replaced, never added.
    results_length: usize,
    /// The slot that served the previous hit or received the previous
    /// insert. Starts at `N - 1`, an empty slot, so the first call always
    /// misses the fast path.
    last_hit: usize,
}

impl<A: Clone, R> RingCache<A, R> {
    /// Creates a cache with `capacity` slots. Callers validate
    /// `capacity >= 1`.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        let mut slots = Vec::new();
        slots.resize_with(capacity, || Slot::Empty);
        Self {
            slots: slots.into_boxed_slice(),
            last_index: capacity,
            results_length: 0,
            last_hit: capacity - 1,
        }
    }

    /// Looks up `args`, preferring the slot that served the previous call.
    ///
    /// On a hit, the slot's stored argument list is replaced with a clone of
    /// the incoming one, so callers using reference-flavored equality keep
    /// matching against the freshest arguments.
    pub(crate) fn lookup<E>(&mut self, args: &[A], eq: &E) -> Option<&R>
    where
        E: Fn(&A, &A) -> bool + ?Sized,
    {
        let n = self.slots.len();

        // Fast path: the immediately-repeated call. One comparison, no scan.
        if self.last_hit < n && self.slots[self.last_hit].matches(args, eq) {
            return Some(self.refresh(self.last_hit, args));
        }

        // Recency-ordered scan over the live window `[last_index,
        // last_index + results_length)`, most recent first. The fast-path
        // slot was already checked.
        for offset in 0..self.results_length {
            let index = (self.last_index + offset) % n;
            if index == self.last_hit {
                continue;
            }
            if self.slots[index].matches(args, eq) {
                self.last_hit = index;
                return Some(self.refresh(index, args));
            }
        }

        None
    }

    /// Overwrites the argument list of a live slot and returns its result.
    fn refresh(&mut self, index: usize, args: &[A]) -> &R {
        match &mut self.slots[index] {
            Slot::Occupied { args: stored, result } => {
                stored.clear();
                stored.extend_from_slice(args);
                result
            }
            Slot::Empty => unreachable!("refreshed slot must be live"),
        }
    }

    /// Stores a freshly computed entry, evicting the logically-oldest one
    /// once the buffer is full.
    ///
    /// Callers compute `result` before calling this: a slot is only ever
    /// written as a whole, after the computation has succeeded, so a failed
    /// computation leaves the buffer exactly as it was.
    pub(crate) fn insert(&mut self, args: Vec<A>, result: R) {
        let n = self.slots.len();
        self.last_index = if self.last_index == 0 { n - 1 } else { self.last_index - 1 };
        if self.results_length < n {
            self.results_length += 1;
        }
        // Once all slots have been cycled through, the slot the pointer
        // wraps onto is necessarily the oldest live entry.
        self.slots[self.last_index] = Slot::Occupied { args, result };
        self.last_hit = self.last_index;
    }

    /// Drops every entry and restores the initial index state.
    pub(crate) fn clear(&mut self) {
        let n = self.slots.len();
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.results_length = 0;
        self.last_index = n;
        self.last_hit = n - 1;
    }

    /// The retained argument lists by physical slot, `None` where empty.
    pub(crate) fn args_arr(&self) -> Vec<Option<Vec<A>>> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => None,
                Slot::Occupied { args, .. } => Some(args.clone()),
            })
            .collect()
    }

    /// The retained results by physical slot, `None` where empty.
    pub(crate) fn results_arr(&self) -> Vec<Option<R>>
    where
        R: Clone,
    {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => None,
                Slot::Occupied { result, .. } => Some(result.clone()),
            })
            .collect()
    }

    pub(crate) fn last_index(&self) -> usize {
        self.last_index
    }

    pub(crate) fn last_hit(&self) -> usize {
        self.last_hit
    }

    pub(crate) fn results_length(&self) -> usize {
        self.results_length
    }
}
