// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// Market data fixture used as view state in tests.
///
/// The price is kept in cents so the fixture stays `Eq`-comparable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quote {
    pub symbol: String,
    pub price: u64,
}

impl Quote {
    #[must_use]
    pub const fn new(symbol: String, price: u64) -> Self {
        Self { symbol, price }
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quote[symbol={}, price={}]", self.symbol, self.price)
    }
}

pub fn quote_acme() -> Quote {
    Quote::new("ACME".to_string(), 4200)
}

pub fn quote_initech() -> Quote {
    Quote::new("INIT".to_string(), 1999)
}

pub fn quote_hooli() -> Quote {
    Quote::new("HOOL".to_string(), 31400)
}
