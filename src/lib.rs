//! Loading Medicare Advantage Bid Pricing Tool (BPT) data from zipped,
//! delimited text files into Arrow record batches, one bundle per year.

pub mod bundle;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod load;
pub mod locate;
pub mod process;
pub mod worksheet;

#[cfg(test)]
pub(crate) mod testutil;

pub use bundle::Bpt;
pub use config::{LoaderConfig, MatchPolicy, NamingConvention, YearLayout};
pub use dictionary::DataDictionary;
pub use error::{BptError, Result};
pub use worksheet::Worksheet;
