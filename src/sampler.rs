//! Waypoint sampling for external directions links.
//!
//! Map services cap how many intermediate waypoints a directions URL may
//! carry, so a decoded route path is thinned to at most `density`
//! evenly-strided intermediates between its fixed origin and destination.

use crate::model::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("cannot sample an empty path")]
    InsufficientWaypoints,
    #[error("path of {points} points is too short for a density of {density}")]
    InvalidSampleDensity { points: usize, density: usize },
}

/// Origin, destination and the intermediates between them.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWaypoints {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub intermediates: Vec<Coordinate>,
}

/// Samples `path` for a directions link with at most `density` intermediates.
///
/// The stride is `floor(N / density)`, widened to `ceil((N - 2) / density)`
/// when the plain stride would emit more than `density` points. Intermediates
/// start at index 1 and never reach index `N - 1`.
///
/// A single-point path yields origin == destination and no intermediates.
/// Paths with more than one point but fewer than `density` points, and a
/// `density` of zero, are rejected rather than stepping by zero.
pub fn sample(path: &[Coordinate], density: usize) -> Result<SampledWaypoints, SampleError> {
    let (origin, destination) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(SampleError::InsufficientWaypoints),
    };
    let len = path.len();

    if len == 1 {
        return Ok(SampledWaypoints {
            origin,
            destination,
            intermediates: Vec::new(),
        });
    }

    let stride = stride_for(len, density)?;
    let intermediates = path[..len - 1]
        .iter()
        .skip(1)
        .step_by(stride)
        .copied()
        .collect();

    Ok(SampledWaypoints {
        origin,
        destination,
        intermediates,
    })
}

fn stride_for(len: usize, density: usize) -> Result<usize, SampleError> {
    let base = len.checked_div(density).unwrap_or(0);
    if base == 0 {
        return Err(SampleError::InvalidSampleDensity {
            points: len,
            density,
        });
    }
    let interior = len.saturating_sub(2);
    Ok(base.max(interior.div_ceil(density)))
}
