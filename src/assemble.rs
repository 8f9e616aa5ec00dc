//! Merges per-station outcomes into one table.

use crate::fetching::dispatcher::StationDocument;
use crate::frame::TideFrame;
use crate::normalize::{normalize_document, SkipReason, StationOutcome};
use crate::types::observations::{ObservationRow, Observations};
use crate::types::product::{Interval, ProductKind};
use crate::types::station::StationId;
use log::{info, warn};
use polars::prelude::{IntoLazy, PolarsResult};

/// A station that contributed no rows because something went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStation {
    pub station: StationId,
    pub reason: SkipReason,
}

/// Row-wise union of every station's normalized table for one request.
///
/// Rows are kept in the order stations were processed. Nothing is sorted or
/// de-duplicated across stations.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedTable {
    product: ProductKind,
    observations: Observations,
    skipped: Vec<SkippedStation>,
    empty_stations: Vec<StationId>,
}

impl CombinedTable {
    /// An empty table shaped for `product` at `interval`.
    pub fn new(product: ProductKind, interval: Option<Interval>) -> Self {
        Self {
            product,
            observations: Observations::empty(product, interval),
            skipped: Vec::new(),
            empty_stations: Vec::new(),
        }
    }

    /// Records one station's outcome. Rows are appended after all rows pushed
    /// so far.
    ///
    /// # Arguments
    ///
    /// * `station` - The station the outcome belongs to.
    /// * `outcome` - What normalizing that station's document produced.
    ///
    /// Rows of a different record type than the table holds are not appended;
    /// the station is listed in [`CombinedTable::skipped`] with
    /// [`SkipReason::ShapeMismatch`] instead. This never fails.
    pub fn push(&mut self, station: StationId, outcome: StationOutcome) {
        match outcome {
            StationOutcome::Rows(rows) => {
                if let Err(rows) = self.observations.append(rows) {
                    warn!(
                        "Station {} produced {} rows of a different shape than {}; skipping",
                        station,
                        rows.len(),
                        self.product
                    );
                    self.skipped.push(SkippedStation {
                        station,
                        reason: SkipReason::ShapeMismatch,
                    });
                }
            }
            StationOutcome::Empty => self.empty_stations.push(station),
            StationOutcome::Error(reason) => self.skipped.push(SkippedStation { station, reason }),
        }
    }

    pub fn product(&self) -> ProductKind {
        self.product
    }

    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    pub fn into_observations(self) -> Observations {
        self.observations
    }

    /// Stations whose fetch failed or whose service response was an error.
    pub fn skipped(&self) -> &[SkippedStation] {
        &self.skipped
    }

    /// Stations that answered without any usable rows.
    pub fn empty_stations(&self) -> &[StationId] {
        &self.empty_stations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Rows as handed to a persistence layer, in table order.
    pub fn rows(&self) -> Vec<ObservationRow<'_>> {
        self.observations.rows()
    }

    /// Materializes the table as a polars frame.
    pub fn to_frame(&self) -> PolarsResult<TideFrame> {
        Ok(TideFrame::new(self.observations.to_dataframe()?.lazy()))
    }
}

/// Normalizes every document and merges the results in the order given.
///
/// # Arguments
///
/// * `documents` - Fetched station documents, in processing order.
/// * `product` - The product that was requested for every station.
/// * `interval` - The requested interval. Decides the prediction record type
///   and whether water level and currents are resampled to hourly rows.
///
/// # Returns
///
/// A [`CombinedTable`] holding every station's rows, with failed stations in
/// `skipped()` and stations without rows in `empty_stations()`.
pub fn assemble(
    documents: Vec<StationDocument>,
    product: ProductKind,
    interval: Option<Interval>,
) -> CombinedTable {
    let mut table = CombinedTable::new(product, interval);
    for document in documents {
        let station = document.station.clone();
        table.push(station, normalize_document(document, product, interval));
    }
    info!(
        "Assembled {} {} rows ({} stations skipped, {} empty)",
        table.len(),
        product,
        table.skipped.len(),
        table.empty_stations.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetching::error::FetchError;
    use serde_json::{json, Value};

    fn doc(station: &str, body: Value) -> StationDocument {
        StationDocument {
            station: StationId::from(station),
            body: Ok(body),
        }
    }

    fn levels(values: &[&str]) -> Value {
        let data: Vec<Value> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                json!({
                    "t": format!("2024-03-01 00:{:02}", i * 6),
                    "v": v,
                    "s": "0.0",
                    "f": "0,0,0,0",
                    "q": "v"
                })
            })
            .collect();
        json!({ "data": data })
    }

    #[test]
    fn test_rows_appended_in_processing_order() {
        let table = assemble(
            vec![
                doc("B", levels(&["2.0", "2.1"])),
                doc("A", levels(&["1.0", "1.1", "1.2"])),
            ],
            ProductKind::WaterLevel,
            None,
        );
        assert_eq!(table.len(), 5);
        let stations: Vec<&str> = table.rows().iter().map(|r| r.station_id).collect();
        assert_eq!(stations, ["B", "B", "A", "A", "A"]);
    }

    #[test]
    fn test_identical_rows_across_stations_are_kept() {
        let table = assemble(
            vec![doc("A", levels(&["1.0"])), doc("B", levels(&["1.0"]))],
            ProductKind::WaterLevel,
            None,
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_skips_are_recorded() {
        let documents = vec![
            doc("ok", levels(&["1.0"])),
            doc("err", json!({"error": {"message": "No data was found."}})),
            doc("none", json!({})),
            StationDocument {
                station: StationId::from("down"),
                body: Err(FetchError::Decode {
                    url: "http://localhost/".to_string(),
                    source: serde_json::from_str::<Value>("").unwrap_err(),
                }),
            },
        ];
        let table = assemble(documents, ProductKind::WaterLevel, None);
        assert_eq!(table.len(), 1);
        assert_eq!(table.empty_stations(), &[StationId::from("none")]);
        let skipped: Vec<&str> = table.skipped().iter().map(|s| s.station.as_str()).collect();
        assert_eq!(skipped, ["err", "down"]);
        assert!(matches!(table.skipped()[1].reason, SkipReason::FetchFailed(_)));
    }

    #[test]
    fn test_all_stations_empty() {
        let table = assemble(
            vec![doc("A", json!({"data": []}))],
            ProductKind::HighLow,
            None,
        );
        assert!(table.is_empty());
        assert!(matches!(table.observations(), Observations::HighLow(v) if v.is_empty()));
    }

    #[test]
    fn test_mismatched_shape_is_skipped() {
        let mut table = CombinedTable::new(ProductKind::WaterLevel, None);
        table.push(
            StationId::from("x"),
            StationOutcome::Rows(Observations::Predictions(Vec::new())),
        );
        assert_eq!(table.skipped()[0].reason, SkipReason::ShapeMismatch);
    }

    #[test]
    fn test_to_frame() -> PolarsResult<()> {
        let table = assemble(
            vec![doc("A", levels(&["1.0", "1.1"])), doc("B", levels(&["2.0"]))],
            ProductKind::WaterLevel,
            None,
        );
        let df = table.to_frame()?.collect()?;
        assert_eq!(df.height(), 3);
        assert_eq!(df.get_column_names()[0].as_str(), "station_id");
        Ok(())
    }
}
