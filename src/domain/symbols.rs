//! The fixed universe of tracked ASX equities.

use serde::Serialize;

/// Broad industry grouping used in the terminal sector overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sector {
    Finance,
    Mining,
    Energy,
}

impl Sector {
    pub fn label(self) -> &'static str {
        match self {
            Sector::Finance => "Finance",
            Sector::Mining => "Mining",
            Sector::Energy => "Energy",
        }
    }
}

/// One tracked equity.
///
/// The declaration order of [`Symbol::ALL`] is the fetch order and also fixes
/// each symbol's chart color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Cba,
    Nab,
    Wbc,
    Anz,
    Bhp,
    Rio,
    Fmg,
    Org,
    Agl,
}

impl Symbol {
    pub const ALL: [Symbol; 9] = [
        Symbol::Cba,
        Symbol::Nab,
        Symbol::Wbc,
        Symbol::Anz,
        Symbol::Bhp,
        Symbol::Rio,
        Symbol::Fmg,
        Symbol::Org,
        Symbol::Agl,
    ];

    /// Exchange-qualified ticker as the upstream API expects it.
    pub fn ticker(self) -> &'static str {
        match self {
            Symbol::Cba => "CBA.AX",
            Symbol::Nab => "NAB.AX",
            Symbol::Wbc => "WBC.AX",
            Symbol::Anz => "ANZ.AX",
            Symbol::Bhp => "BHP.AX",
            Symbol::Rio => "RIO.AX",
            Symbol::Fmg => "FMG.AX",
            Symbol::Org => "ORG.AX",
            Symbol::Agl => "AGL.AX",
        }
    }

    pub fn company(self) -> &'static str {
        match self {
            Symbol::Cba => "Commonwealth Bank",
            Symbol::Nab => "National Australia Bank",
            Symbol::Wbc => "Westpac Banking Corp",
            Symbol::Anz => "ANZ Banking Group",
            Symbol::Bhp => "BHP Group",
            Symbol::Rio => "Rio Tinto",
            Symbol::Fmg => "Fortescue Metals Group",
            Symbol::Org => "Origin Energy",
            Symbol::Agl => "AGL Energy",
        }
    }

    pub fn sector(self) -> Sector {
        match self {
            Symbol::Cba | Symbol::Nab | Symbol::Wbc | Symbol::Anz => Sector::Finance,
            Symbol::Bhp | Symbol::Rio | Symbol::Fmg => Sector::Mining,
            Symbol::Org | Symbol::Agl => Sector::Energy,
        }
    }

    /// Position in [`Symbol::ALL`].
    pub fn index(self) -> usize {
        Symbol::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default()
    }

    pub fn from_ticker(ticker: &str) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|s| s.ticker() == ticker)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ticker())
    }
}
