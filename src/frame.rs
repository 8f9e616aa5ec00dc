//! Lazy polars view of a combined table.

use crate::types::dates::IntoUtcDateTime;
use crate::types::station::StationId;
use polars::prelude::{col, lit, DataFrame, DataType, Expr, LazyFrame, PolarsResult, TimeUnit};

/// A wrapper around a polars `LazyFrame` holding combined station data.
///
/// The frame always starts with a `station_id` column followed by
/// `date_time`; the remaining columns depend on the product that was
/// requested. `date_time` is stored timezone-naive and holds UTC wall time.
///
/// Instances are obtained from [`crate::CombinedTable::to_frame`] or
/// [`crate::Tides::get_frame`].
///
/// # Example
///
/// ```no_run
/// # use coops_tides::{ProductKind, StationId, Tides};
/// use chrono::{TimeZone, Utc};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tides = Tides::new()?;
/// let frame = tides
///     .get_frame()
///     .stations(&[StationId::from("8454000"), StationId::from("8452660")])
///     .begin_date("20240301")
///     .end_date("20240302")
///     .product(ProductKind::Predictions)
///     .call()
///     .await?;
///
/// let morning = frame
///     .station("8454000")
///     .get_range(
///         Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap(),
///         Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
///     )
///     .collect()?;
/// println!("{}", morning);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TideFrame {
    /// The underlying polars frame.
    pub frame: LazyFrame,
}

impl TideFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary polars predicate lazily, returning a new frame.
    pub fn filter(&self, predicate: Expr) -> TideFrame {
        TideFrame::new(self.frame.clone().filter(predicate))
    }

    /// Keeps only the rows of one station.
    pub fn station(&self, station: impl Into<StationId>) -> TideFrame {
        let station = station.into();
        self.filter(col("station_id").eq(lit(station.as_str())))
    }

    /// Keeps rows whose `date_time` lies within `start..=end`.
    ///
    /// Both bounds are inclusive. Dates are taken as midnight UTC, so passing
    /// the same date twice keeps only the row stamped exactly at midnight.
    ///
    /// # Arguments
    ///
    /// * `start` - The first instant to keep. Anything that implements [`IntoUtcDateTime`].
    /// * `end` - The last instant to keep.
    ///
    /// # Returns
    ///
    /// A new `TideFrame` with the range filter applied lazily. Nothing is
    /// evaluated until [`TideFrame::collect`] is called.
    pub fn get_range(
        &self,
        start: impl IntoUtcDateTime,
        end: impl IntoUtcDateTime,
    ) -> TideFrame {
        let start_naive = start.into_utc().naive_utc();
        let end_naive = end.into_utc().naive_utc();
        let date_time = || col("date_time").cast(DataType::Datetime(TimeUnit::Milliseconds, None));

        self.filter(
            date_time()
                .gt_eq(lit(start_naive))
                .and(date_time().lt_eq(lit(end_naive))),
        )
    }

    /// Executes the query plan.
    ///
    /// # Errors
    ///
    /// Returns a [`polars::prelude::PolarsError`] if the plan fails, for
    /// example when a filter references a column the product does not have.
    pub fn collect(self) -> PolarsResult<DataFrame> {
        self.frame.collect()
    }
}
