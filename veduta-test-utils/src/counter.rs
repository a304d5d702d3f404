// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Trivial counter view state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Counter {
    pub ticks: u64,
}

impl Counter {
    #[must_use]
    pub const fn new(ticks: u64) -> Self {
        Self { ticks }
    }

    /// Returns a copy with the tick count advanced by one.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self {
            ticks: self.ticks + 1,
        }
    }
}
