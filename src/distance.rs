use crate::error::{LcaError, Result};
use crate::guards;

/// `n` evenly spaced points from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>> {
    guards::finite("start", start)?;
    guards::finite("end", end)?;
    if n == 0 {
        return Err(LcaError::EmptyDistances);
    }
    if end < start {
        return Err(LcaError::NonMonotonicDistances { index: n - 1 });
    }
    if n == 1 {
        return Ok(vec![start]);
    }

    let step = (end - start) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
    // Pin the last sample so phases that share a boundary match exactly.
    points[n - 1] = end;
    Ok(points)
}
