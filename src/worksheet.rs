// src/worksheet.rs

use std::{fmt, str::FromStr};

use crate::error::BptError;

/// The seven BPT worksheet sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Worksheet {
    Ma1,
    Ma2,
    Ma3,
    Ma4,
    Ma5,
    Ma6,
    Ma7,
}

impl Worksheet {
    pub const ALL: [Worksheet; 7] = [
        Worksheet::Ma1,
        Worksheet::Ma2,
        Worksheet::Ma3,
        Worksheet::Ma4,
        Worksheet::Ma5,
        Worksheet::Ma6,
        Worksheet::Ma7,
    ];

    /// Benchmark (county) worksheet, split over several text files.
    pub const BENCHMARK: Worksheet = Worksheet::Ma5;

    pub fn tag(&self) -> &'static str {
        match self {
            Worksheet::Ma1 => "ma_1",
            Worksheet::Ma2 => "ma_2",
            Worksheet::Ma3 => "ma_3",
            Worksheet::Ma4 => "ma_4",
            Worksheet::Ma5 => "ma_5",
            Worksheet::Ma6 => "ma_6",
            Worksheet::Ma7 => "ma_7",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Worksheet::Ma1 => "base period experience",
            Worksheet::Ma2 => "projected allowed cost",
            Worksheet::Ma3 => "projected cost sharing",
            Worksheet::Ma4 => "projected revenue requirement",
            Worksheet::Ma5 => "benchmark",
            Worksheet::Ma6 => "bid summary",
            Worksheet::Ma7 => "optional supplemental benefits",
        }
    }
}

impl fmt::Display for Worksheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Worksheet {
    type Err = BptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Worksheet::ALL
            .into_iter()
            .find(|ws| ws.tag() == wanted)
            .ok_or_else(|| BptError::Config(format!("unknown worksheet tag `{}`", s)))
    }
}
