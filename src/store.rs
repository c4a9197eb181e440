//! Reference store
//!
//! Loading happens against a mutable builder; evaluation happens against
//! the immutable store the builder freezes into. The builder merges
//! writes per section with last-write-wins semantics on the
//! (version, sex, age) key, matching how repeated loads of the same file
//! must end up idempotent. The frozen store keeps each series sorted by
//! age and is safe to share across threads behind an `Arc`.

use itertools::Itertools;
use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::error::{GrowthRefError, Result};
use crate::models::reference::{
    Lms, PercentileBands, ReferencePoint, ReferenceVersion, Sex, ZScoreBands,
};

type SeriesKey = (ReferenceVersion, Sex);

/// Accumulated writes for one (version, sex, age) key
#[derive(Debug, Default)]
struct PendingPoint {
    lms: Option<Lms>,
    z_bands: Option<ZScoreBands>,
    percentiles: Option<PercentileBands>,
}

/// Mutable accumulator for reference table rows
#[derive(Debug, Default)]
pub struct ReferenceStoreBuilder {
    pending: FxHashMap<SeriesKey, FxHashMap<u32, PendingPoint>>,
}

impl ReferenceStoreBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an LMS triplet, overwriting any previous one for the key
    pub fn insert_lms(&mut self, version: ReferenceVersion, sex: Sex, age_months: u32, lms: Lms) {
        self.pending_point(version, sex, age_months).lms = Some(lms);
    }

    /// Write z-score bands, overwriting any previous ones for the key
    pub fn insert_z_bands(
        &mut self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
        bands: ZScoreBands,
    ) {
        self.pending_point(version, sex, age_months).z_bands = Some(bands);
    }

    /// Write percentile bands, overwriting any previous ones for the key
    pub fn insert_percentiles(
        &mut self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
        bands: PercentileBands,
    ) {
        self.pending_point(version, sex, age_months).percentiles = Some(bands);
    }

    fn pending_point(
        &mut self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
    ) -> &mut PendingPoint {
        self.pending
            .entry((version, sex))
            .or_default()
            .entry(age_months)
            .or_default()
    }

    /// Freeze into an immutable store.
    ///
    /// Keys that received bands but never an LMS triplet cannot serve
    /// the z-score path and are discarded with a warning.
    #[must_use]
    pub fn build(self) -> ReferenceStore {
        let mut series: FxHashMap<SeriesKey, Vec<ReferencePoint>> = FxHashMap::default();
        for ((version, sex), pending) in self.pending {
            let mut points: Vec<ReferencePoint> = pending
                .into_iter()
                .filter_map(|(age_months, point)| {
                    if let Some(lms) = point.lms {
                        Some(ReferencePoint {
                            version,
                            sex,
                            age_months,
                            lms,
                            z_bands: point.z_bands,
                            percentiles: point.percentiles,
                        })
                    } else {
                        warn!(
                            "Discarding {version}/{sex} age {age_months}: bands without LMS parameters"
                        );
                        None
                    }
                })
                .collect();

            if points.is_empty() {
                continue;
            }
            points.sort_unstable_by_key(|point| point.age_months);
            series.insert((version, sex), points);
        }

        ReferenceStore { series }
    }
}

/// Immutable snapshot of every loaded reference series
///
/// Read-only after construction; all lookups borrow, so concurrent
/// evaluation needs no locking.
#[derive(Debug)]
pub struct ReferenceStore {
    series: FxHashMap<SeriesKey, Vec<ReferencePoint>>,
}

impl ReferenceStore {
    /// Find the reference point for an age: the exact age when present,
    /// otherwise the nearest by absolute difference in months.
    ///
    /// An exact midpoint between two ages resolves to the lower age.
    ///
    /// # Errors
    /// Returns `ReferenceNotFoundError` only when the (version, sex)
    /// series holds no rows at all.
    pub fn lookup(
        &self,
        version: ReferenceVersion,
        sex: Sex,
        age_months: u32,
    ) -> Result<&ReferencePoint> {
        let points = self
            .series
            .get(&(version, sex))
            .ok_or(GrowthRefError::ReferenceNotFoundError { version, sex })?;

        let index = match points.binary_search_by_key(&age_months, |point| point.age_months) {
            Ok(exact) => exact,
            Err(0) => 0,
            Err(insertion) if insertion == points.len() => points.len() - 1,
            Err(insertion) => {
                let below = age_months - points[insertion - 1].age_months;
                let above = points[insertion].age_months - age_months;
                if above < below {
                    insertion
                } else {
                    insertion - 1
                }
            }
        };

        let point = &points[index];
        debug!(
            "Lookup {version}/{sex} age {age_months} resolved to age {}",
            point.age_months
        );
        Ok(point)
    }

    /// Verify that every required series is present.
    ///
    /// Intended for startup validation so a missing table set surfaces
    /// as a configuration error instead of failing per request later.
    ///
    /// # Errors
    /// Returns `ReferenceNotFoundError` for the first absent series.
    pub fn ensure_series(&self, required: &[(ReferenceVersion, Sex)]) -> Result<()> {
        for &(version, sex) in required {
            if !self.series.contains_key(&(version, sex)) {
                return Err(GrowthRefError::ReferenceNotFoundError { version, sex });
            }
        }
        Ok(())
    }

    /// Loaded series with their row counts, in stable order
    #[must_use]
    pub fn coverage(&self) -> Vec<(ReferenceVersion, Sex, usize)> {
        self.series
            .iter()
            .map(|(&(version, sex), points)| (version, sex, points.len()))
            .sorted_by_key(|&(version, sex, _)| (version.as_str(), sex.as_str()))
            .collect_vec()
    }

    /// Total number of reference points across all series
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// Whether no series was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
