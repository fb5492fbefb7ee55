//! Before/after mnemonic listings and plottable depth series.

use serde::Serialize;

use crate::las::WellLog;
use crate::standardize::Standardizer;

/// Number of curves plotted when none are requested.
pub const DEFAULT_PLOT_CURVES: usize = 3;

/// Original and standardized mnemonics of one log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurveComparison {
    pub file_name: String,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

impl CurveComparison {
    pub fn new(log: &WellLog, standardizer: &Standardizer) -> Self {
        Self {
            file_name: log.source.clone(),
            before: log.mnemonics(),
            after: standardizer.apply(log).log.mnemonics(),
        }
    }

    /// Pairs of `(before, after)` for curves whose mnemonic changed.
    pub fn changed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.before
            .iter()
            .zip(&self.after)
            .filter(|(b, a)| b != a)
            .map(|(b, a)| (b.as_str(), a.as_str()))
    }
}

/// One curve as `(depth, value)` points, ready for a depth-down line plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub mnemonic: String,
    pub unit: String,
    /// Points in log order. Rows missing either depth or value are skipped.
    pub points: Vec<(f64, f64)>,
}

/// The curves plotted when the caller does not choose: the first few
/// non-depth curves.
pub fn default_selection(log: &WellLog) -> Vec<String> {
    log.curves
        .iter()
        .skip(1)
        .take(DEFAULT_PLOT_CURVES)
        .map(|c| c.mnemonic.clone())
        .collect()
}

/// Depth series for each requested mnemonic present in `log`.
///
/// Unknown mnemonics are ignored. Requesting the depth curve itself is
/// allowed and plots depth against depth.
pub fn plot_series(log: &WellLog, mnemonics: &[String]) -> Vec<PlotSeries> {
    let Some(depth) = log.depth() else {
        return Vec::new();
    };

    mnemonics
        .iter()
        .filter_map(|name| log.curve(name))
        .map(|curve| PlotSeries {
            mnemonic: curve.mnemonic.clone(),
            unit: curve.unit.clone(),
            points: depth
                .data
                .iter()
                .zip(&curve.data)
                .filter_map(|(d, v)| Some(((*d)?, (*v)?)))
                .collect(),
        })
        .collect()
}
