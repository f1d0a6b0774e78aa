use serde::Serialize;

use crate::{Sample, StatsError};

/// One paired observation for a scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Zips two samples into scatter points, pairing values by position.
///
/// # Arguments
///
/// * `x` - Horizontal coordinates
/// * `y` - Vertical coordinates, the same length as `x`
///
/// # Errors
///
/// Returns [`StatsError::MismatchedLength`] if the samples differ in length.
///
/// # Examples
///
/// ```
/// # use statlens_stats::{Sample, scatter::{ScatterPoint, scatter_points}};
/// let x = Sample::from(vec![1.0, 2.0]);
/// let y = Sample::from(vec![10.0, 20.0]);
/// assert_eq!(
///     scatter_points(&x, &y).unwrap(),
///     vec![ScatterPoint { x: 1.0, y: 10.0 }, ScatterPoint { x: 2.0, y: 20.0 }]
/// );
/// ```
pub fn scatter_points(x: &Sample, y: &Sample) -> Result<Vec<ScatterPoint>, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::MismatchedLength {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(x.values()
        .iter()
        .zip(y.values())
        .map(|(&x, &y)| ScatterPoint { x, y })
        .collect())
}
