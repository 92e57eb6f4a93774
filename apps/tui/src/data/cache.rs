use crate::data::loader::DataLoader;
use crate::data::models::ExposureDataset;
use crate::error::DashboardError;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Process-lifetime memo of the loaded dataset. Only successful loads are
/// stored, so a failed read is retried on the next refresh.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceCell<Arc<ExposureDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<ExposureDataset>> {
        self.cell.get().cloned()
    }

    /// Blocking load for callers outside a tokio runtime, such as library
    /// users scripting a single pass.
    pub fn get_or_load(&self, loader: &DataLoader) -> Result<Arc<ExposureDataset>, DashboardError> {
        self.get_or_load_with(|| loader.load())
    }

    pub fn get_or_load_with<F>(&self, load: F) -> Result<Arc<ExposureDataset>, DashboardError>
    where
        F: FnOnce() -> Result<ExposureDataset, DashboardError>,
    {
        if let Some(dataset) = self.cell.get() {
            debug!("dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }

    /// Reads the files on the blocking pool the first time, then serves the
    /// memoized copy.
    pub async fn get_or_load_async(
        &self,
        loader: DataLoader,
    ) -> Result<Arc<ExposureDataset>, DashboardError> {
        if let Some(dataset) = self.get() {
            debug!("dataset cache hit");
            return Ok(dataset);
        }

        let risks_path = loader.paths().risks.clone();
        let dataset = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| DashboardError::data_unavailable(risks_path, e))??;

        Ok(Arc::clone(self.cell.get_or_init(|| Arc::new(dataset))))
    }

    /// Drops the memoized dataset so the next access re-reads the files.
    pub fn invalidate(&mut self) {
        if self.cell.take().is_some() {
            debug!("dataset cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataPaths;
    use crate::data::models::ExposureRecord;
    use std::cell::Cell;
    use std::fs;

    fn one_row() -> ExposureDataset {
        ExposureDataset::new(
            vec![ExposureRecord::new(
                "Lung",
                "Tobacco",
                "Ohio",
                Some(39),
                2010,
                Some(1.0),
            )],
            false,
        )
    }

    #[test]
    fn loads_once() -> Result<(), DashboardError> {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);

        let first = cache.get_or_load_with(|| {
            calls.set(calls.get() + 1);
            Ok(one_row())
        })?;
        let second = cache.get_or_load_with(|| {
            calls.set(calls.get() + 1);
            Ok(ExposureDataset::default())
        })?;

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[test]
    fn failures_are_not_cached() -> Result<(), DashboardError> {
        let cache = DatasetCache::new();

        let failed =
            cache.get_or_load_with(|| Err(DashboardError::data_unavailable("x.csv", "missing")));
        assert!(failed.is_err());
        assert!(cache.get().is_none());

        let dataset = cache.get_or_load_with(|| Ok(one_row()))?;
        assert_eq!(dataset.len(), 1);
        Ok(())
    }

    #[test]
    fn invalidate_forces_reload() -> Result<(), DashboardError> {
        let mut cache = DatasetCache::new();
        cache.get_or_load_with(|| Ok(one_row()))?;
        cache.invalidate();
        assert!(cache.get().is_none());

        let reloaded = cache.get_or_load_with(|| Ok(ExposureDataset::default()))?;
        assert!(reloaded.is_empty());
        Ok(())
    }

    #[test]
    fn blocking_load_reads_files_once() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let paths = DataPaths::in_dir(dir.path());
        fs::write(&paths.state_codes, "state,mapid\nIowa,19\n")?;
        fs::write(
            &paths.risks,
            "location_name,cause_name,rei_name,year,val\nIowa,Lung,Tobacco,2010,4\n",
        )?;

        let cache = DatasetCache::new();
        let loader = DataLoader::new(paths.clone());
        let first = cache.get_or_load(&loader)?;

        fs::remove_file(&paths.risks)?;
        let second = cache.get_or_load(&loader)?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records()[0].map_id, Some(19));
        Ok(())
    }

    #[tokio::test]
    async fn async_load_reads_files_once() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let paths = DataPaths::in_dir(dir.path());
        fs::write(&paths.state_codes, "state,mapid\nOhio,39\n")?;
        fs::write(
            &paths.risks,
            "location_name,cause_name,rei_name,year,val\nOhio,Lung,Tobacco,2010,4\n",
        )?;

        let cache = DatasetCache::new();
        let first = cache.get_or_load_async(DataLoader::new(paths.clone())).await?;

        fs::remove_file(&paths.risks)?;
        let second = cache.get_or_load_async(DataLoader::new(paths)).await?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.records()[0].map_id, Some(39));
        Ok(())
    }
}
