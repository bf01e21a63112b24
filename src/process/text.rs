// src/process/text.rs

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::warn;

/// How a member's bytes are turned into delimited records.
#[derive(Clone, Copy, Debug)]
pub struct TextFormat {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl TextFormat {
    /// Data dictionary: comma separated UTF-8.
    pub const DICTIONARY: TextFormat = TextFormat {
        delimiter: b',',
        encoding: UTF_8,
    };

    /// Worksheets: tab separated windows-1252.
    pub const WORKSHEET: TextFormat = TextFormat {
        delimiter: b'\t',
        encoding: WINDOWS_1252,
    };

    /// Decode `bytes`. A leading BOM overrides the configured encoding.
    pub fn decode(&self, bytes: &[u8], member: &str) -> String {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(member, encoding = used.name(), "replaced undecodable bytes");
        }
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worksheet_decodes_cp1252() {
        // "Café – 5" in windows-1252
        let bytes = [0x43, 0x61, 0x66, 0xE9, 0x20, 0x96, 0x20, 0x35];
        assert_eq!(TextFormat::WORKSHEET.decode(&bytes, "t"), "Café – 5");
    }

    #[test]
    fn dictionary_strips_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFNAME,FIELD\n";
        assert_eq!(TextFormat::DICTIONARY.decode(bytes, "d"), "NAME,FIELD\n");
    }
}
