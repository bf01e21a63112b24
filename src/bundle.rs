// src/bundle.rs

use arrow::record_batch::RecordBatch;
use std::path::Path;
use tracing::info;

use crate::config::{LoaderConfig, YearLayout};
use crate::dictionary::DataDictionary;
use crate::error::Result;
use crate::load::{data_loader, load_dictionary};
use crate::worksheet::Worksheet;

/// One year of BPT data: the data dictionary and all seven worksheets,
/// each renamed through the dictionary and stripped of rows without a bid id.
///
/// A `Bpt` only exists fully loaded; any failure while loading returns the
/// error instead of a partial bundle.
#[derive(Debug, Clone)]
pub struct Bpt {
    layout: YearLayout,
    dictionary: DataDictionary,
    ma_1: RecordBatch,
    ma_2: RecordBatch,
    ma_3: RecordBatch,
    ma_4: RecordBatch,
    ma_5: RecordBatch,
    ma_6: RecordBatch,
    ma_7: RecordBatch,
}

impl Bpt {
    /// Load `yeardir` with the default configuration.
    pub fn load(yeardir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(yeardir, &LoaderConfig::default())
    }

    pub fn load_with(yeardir: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self> {
        let layout = YearLayout::resolve(yeardir, config)?;
        Self::from_layout(layout)
    }

    pub fn from_layout(layout: YearLayout) -> Result<Self> {
        let dictionary = load_dictionary(&layout)?;
        info!(year = %layout.year(), convention = ?layout.convention(), "loading BPT data");

        let load = |ws: Worksheet| -> Result<RecordBatch> {
            info!(sheet = %ws, "loading {} data", ws.description());
            let sheet = data_loader(&layout, ws, &dictionary)?;
            info!(
                sheet = %ws,
                rows = sheet.num_rows(),
                columns = sheet.num_columns(),
                "loaded"
            );
            Ok(sheet)
        };

        let ma_1 = load(Worksheet::Ma1)?;
        let ma_2 = load(Worksheet::Ma2)?;
        let ma_3 = load(Worksheet::Ma3)?;
        let ma_4 = load(Worksheet::Ma4)?;
        let ma_5 = load(Worksheet::Ma5)?;
        let ma_6 = load(Worksheet::Ma6)?;
        let ma_7 = load(Worksheet::Ma7)?;

        Ok(Self {
            layout,
            dictionary,
            ma_1,
            ma_2,
            ma_3,
            ma_4,
            ma_5,
            ma_6,
            ma_7,
        })
    }

    pub fn year(&self) -> &str {
        self.layout.year()
    }

    pub fn layout(&self) -> &YearLayout {
        &self.layout
    }

    /// The raw dictionary table.
    pub fn data_dict(&self) -> &RecordBatch {
        self.dictionary.table()
    }

    pub fn dictionary(&self) -> &DataDictionary {
        &self.dictionary
    }

    pub fn sheet(&self, ws: Worksheet) -> &RecordBatch {
        match ws {
            Worksheet::Ma1 => &self.ma_1,
            Worksheet::Ma2 => &self.ma_2,
            Worksheet::Ma3 => &self.ma_3,
            Worksheet::Ma4 => &self.ma_4,
            Worksheet::Ma5 => &self.ma_5,
            Worksheet::Ma6 => &self.ma_6,
            Worksheet::Ma7 => &self.ma_7,
        }
    }

    /// All worksheets in tag order.
    pub fn sheets(&self) -> impl Iterator<Item = (Worksheet, &RecordBatch)> + '_ {
        Worksheet::ALL.into_iter().map(move |ws| (ws, self.sheet(ws)))
    }

    pub fn ma_1(&self) -> &RecordBatch {
        &self.ma_1
    }

    pub fn ma_2(&self) -> &RecordBatch {
        &self.ma_2
    }

    pub fn ma_3(&self) -> &RecordBatch {
        &self.ma_3
    }

    pub fn ma_4(&self) -> &RecordBatch {
        &self.ma_4
    }

    pub fn ma_5(&self) -> &RecordBatch {
        &self.ma_5
    }

    pub fn ma_6(&self) -> &RecordBatch {
        &self.ma_6
    }

    pub fn ma_7(&self) -> &RecordBatch {
        &self.ma_7
    }
}
