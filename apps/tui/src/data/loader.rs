use crate::config::DataPaths;
use crate::data::models::{ExposureDataset, ExposureRecord};
use crate::domain::RISK_HEADER_TOKEN;
use crate::error::DashboardError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single source could not be read. Mapped onto
/// [`DashboardError::DataUnavailable`] together with the offending path.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// State name to geographic identifier, as read from the lookup table.
pub type StateLookup = HashMap<String, u32>;

/// Counters collected while reading the exposure table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub header_artifacts: usize,
    pub unjoined: usize,
    pub missing_year: usize,
    pub missing_val: usize,
}

#[derive(Debug, Clone)]
pub struct DataLoader {
    paths: DataPaths,
}

impl DataLoader {
    pub const fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    pub const fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Reads, joins and coerces the exposure table. The deaths companion is
    /// optional and never fails the load.
    pub fn load(&self) -> Result<ExposureDataset, DashboardError> {
        let lookup = open_source(&self.paths.state_codes)
            .and_then(read_state_codes)
            .map_err(|e| DashboardError::data_unavailable(&self.paths.state_codes, e))?;

        let (records, has_measure_column, stats) = open_source(&self.paths.risks)
            .and_then(|file| read_exposure(file, &lookup))
            .map_err(|e| DashboardError::data_unavailable(&self.paths.risks, e))?;

        info!(
            rows = stats.rows,
            header_artifacts = stats.header_artifacts,
            unjoined = stats.unjoined,
            missing_year = stats.missing_year,
            missing_val = stats.missing_val,
            states = lookup.len(),
            "loaded exposure table from {}",
            self.paths.risks.display()
        );
        if stats.unjoined > 0 {
            warn!(
                "{} exposure rows have no state code and will not appear on the map",
                stats.unjoined
            );
        }

        let deaths_rows = count_rows(&self.paths.deaths);
        Ok(ExposureDataset::new(records, has_measure_column).with_deaths_rows(deaths_rows))
    }
}

fn open_source(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(SourceError::from)
}

fn column(headers: &StringRecord, name: &'static str) -> Result<usize, SourceError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or(SourceError::MissingColumn(name))
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source)
}

/// Reads the `state,mapid` lookup. Rows with an unusable id are skipped and
/// the first row for a state wins.
pub fn read_state_codes<R: Read>(source: R) -> Result<StateLookup, SourceError> {
    let mut rdr = reader(source);
    let headers = rdr.headers()?.clone();
    let state_idx = column(&headers, "state")?;
    let mapid_idx = column(&headers, "mapid")?;

    let mut lookup = StateLookup::new();
    for row in rdr.records() {
        let row = row?;
        let state = row.get(state_idx).unwrap_or_default();
        match row.get(mapid_idx).and_then(coerce_map_id) {
            Some(id) if !state.is_empty() => {
                lookup.entry(state.to_string()).or_insert(id);
            }
            _ => debug!("skipping state code row {:?}", row),
        }
    }

    Ok(lookup)
}

/// Reads the exposure table and left-joins it against `lookup` on state name.
/// Returns the records, whether a `measure_name` column was present, and
/// load counters.
pub fn read_exposure<R: Read>(
    source: R,
    lookup: &StateLookup,
) -> Result<(Vec<ExposureRecord>, bool, LoadStats), SourceError> {
    let mut rdr = reader(source);
    let headers = rdr.headers()?.clone();
    let location_idx = column(&headers, "location_name")?;
    let cause_idx = column(&headers, "cause_name")?;
    let rei_idx = column(&headers, "rei_name")?;
    let year_idx = column(&headers, "year")?;
    let val_idx = column(&headers, "val")?;
    let measure_idx = headers.iter().position(|header| header == "measure_name");

    let mut stats = LoadStats::default();
    let mut records = Vec::new();

    for row in rdr.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or_default();

        let rei_name = field(rei_idx);
        if rei_name == RISK_HEADER_TOKEN {
            stats.header_artifacts += 1;
            continue;
        }

        let location_name = field(location_idx);
        let map_id = lookup.get(location_name).copied();
        let year = coerce_year(field(year_idx));
        let val = coerce_val(field(val_idx));

        stats.rows += 1;
        stats.unjoined += usize::from(map_id.is_none());
        stats.missing_year += usize::from(year.is_none());
        stats.missing_val += usize::from(val.is_none());

        records.push(ExposureRecord {
            cause_name: field(cause_idx).to_string(),
            rei_name: rei_name.to_string(),
            location_name: location_name.to_string(),
            map_id,
            year,
            val,
            measure_name: measure_idx.map(|idx| field(idx).to_string()),
        });
    }

    Ok((records, measure_idx.is_some(), stats))
}

/// Counts data rows in an optional companion table.
fn count_rows(path: &Path) -> Option<usize> {
    let counted = open_source(path).and_then(|file| {
        let mut rdr = reader(file);
        let mut rows = 0_usize;
        for row in rdr.records() {
            row?;
            rows += 1;
        }
        Ok(rows)
    });

    match counted {
        Ok(rows) => Some(rows),
        Err(e) => {
            warn!("deaths table {} unavailable: {e}", path.display());
            None
        }
    }
}

/// Integer year; integral decimals such as `2010.0` are accepted.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(i32::MIN)
        && value <= f64::from(i32::MAX)
    {
        #[allow(clippy::cast_possible_truncation)]
        Some(value as i32)
    } else {
        None
    }
}

/// Finite float or nothing. Empty strings, text and NaN all become `None`.
pub fn coerce_val(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Positive integer identifier; `"6.0"` style exports are accepted.
pub fn coerce_map_id(raw: &str) -> Option<u32> {
    let year_like = coerce_year(raw)?;
    u32::try_from(year_like).ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STATE_CODES: &str = "state,mapid\nOhio,39\nIowa,19\nIowa,99\nNowhere,abc\n";

    fn lookup() -> Result<StateLookup, SourceError> {
        read_state_codes(STATE_CODES.as_bytes())
    }

    #[test]
    fn state_codes_skip_bad_ids_and_keep_first() -> Result<(), SourceError> {
        let lookup = lookup()?;
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("Iowa"), Some(&19));
        assert_eq!(lookup.get("Nowhere"), None);
        Ok(())
    }

    #[test]
    fn exposure_rows_are_joined_and_coerced() -> Result<(), SourceError> {
        let csv = "\
location_name,cause_name,rei_name,year,val
Ohio,Lung,Tobacco,2010,12.5
Texas,Lung,Tobacco,2010.0,
Iowa,Bladder,Air pollution,n/a,3
";
        let (records, has_measure, stats) = read_exposure(csv.as_bytes(), &lookup()?)?;

        assert!(!has_measure);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].map_id, Some(39));
        assert_eq!(records[0].val, Some(12.5));
        assert_eq!(records[1].map_id, None);
        assert_eq!(records[1].year, Some(2010));
        assert_eq!(records[1].val, None);
        assert_eq!(records[2].year, None);
        assert_eq!(
            stats,
            LoadStats {
                rows: 3,
                header_artifacts: 0,
                unjoined: 1,
                missing_year: 1,
                missing_val: 1,
            }
        );
        Ok(())
    }

    #[test]
    fn embedded_header_rows_are_dropped() -> Result<(), SourceError> {
        let csv = "\
measure_name,location_name,cause_name,rei_name,year,val
DALYs,Ohio,Lung,Tobacco,2010,1
measure_name,location_name,cause_name,rei_name,year,val
Deaths,Ohio,Lung,Tobacco,2010,2
";
        let (records, has_measure, stats) = read_exposure(csv.as_bytes(), &lookup()?)?;

        assert!(has_measure);
        assert_eq!(records.len(), 2);
        assert_eq!(stats.header_artifacts, 1);
        assert_eq!(records[1].measure_name.as_deref(), Some("Deaths"));
        Ok(())
    }

    #[test]
    fn missing_required_column_is_reported() {
        let csv = "location_name,cause_name,year,val\nOhio,Lung,2010,1\n";
        let result = lookup().and_then(|lookup| read_exposure(csv.as_bytes(), &lookup));
        assert!(matches!(result, Err(SourceError::MissingColumn("rei_name"))));
    }

    #[test]
    fn coercions() {
        assert_eq!(coerce_year(" 1995 "), Some(1995));
        assert_eq!(coerce_year("1995.5"), None);
        assert_eq!(coerce_year(""), None);
        assert_eq!(coerce_val("NaN"), None);
        assert_eq!(coerce_val("inf"), None);
        assert_eq!(coerce_val("-0.25"), Some(-0.25));
        assert_eq!(coerce_map_id("6.0"), Some(6));
        assert_eq!(coerce_map_id("0"), None);
        assert_eq!(coerce_map_id("-4"), None);
    }

    #[test]
    fn loader_reports_missing_file_as_data_unavailable() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        let paths = DataPaths::in_dir(dir.path());
        let err = DataLoader::new(paths.clone()).load();

        assert!(matches!(
            err,
            Err(DashboardError::DataUnavailable { ref path, .. }) if *path == paths.state_codes
        ));
        Ok(())
    }

    #[test]
    fn loader_reads_files_and_tolerates_missing_deaths() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let paths = DataPaths::in_dir(dir.path());
        File::create(&paths.state_codes)?.write_all(STATE_CODES.as_bytes())?;
        File::create(&paths.risks)?.write_all(
            b"location_name,cause_name,rei_name,year,val\nOhio,Lung,Tobacco,2010,4\n",
        )?;

        let dataset = DataLoader::new(paths.clone()).load()?;
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.deaths_rows(), None);

        File::create(&paths.deaths)?.write_all(b"location_name,val\nOhio,1\nIowa,2\n")?;
        let dataset = DataLoader::new(paths).load()?;
        assert_eq!(dataset.deaths_rows(), Some(2));
        Ok(())
    }
}
