//! Polyline representation for route geometries.
//!
//! Routes arrive from the backend as Google encoded polylines (precision
//! 1e-5). This module decodes them into coordinate sequences for the map
//! scene and the directions link, and encodes coordinate sequences back for
//! fixtures.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;
use crate::traits::PolylineDecoder;

const PRECISION: f64 = 1e5;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;
const ASCII_OFFSET: u8 = 63;
/// Deltas of valid 1e-5 coordinates fit in 32 bits; anything longer is
/// rejected before it is accumulated.
const MAX_SHIFT: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("invalid polyline character {found:?} at byte {position}")]
    InvalidCharacter { position: usize, found: char },
    #[error("polyline ends mid-value at byte {position}")]
    Truncated { position: usize },
    #[error("polyline value starting at byte {position} overflows")]
    Overflow { position: usize },
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes a Google encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut cursor = 0;
        let mut latitude: i64 = 0;
        let mut longitude: i64 = 0;
        let mut points = Vec::new();

        while cursor < bytes.len() {
            latitude = accumulate(latitude, bytes, &mut cursor)?;
            longitude = accumulate(longitude, bytes, &mut cursor)?;
            points.push(Coordinate::new(
                latitude as f64 / PRECISION,
                longitude as f64 / PRECISION,
            ));
        }

        Ok(Self { points })
    }

    /// Encodes the points as a Google encoded polyline string.
    pub fn encode(&self) -> String {
        let mut encoded = String::new();
        let mut previous = (0_i64, 0_i64);

        for point in &self.points {
            let latitude = (point.latitude * PRECISION).round() as i64;
            let longitude = (point.longitude * PRECISION).round() as i64;
            push_delta(&mut encoded, latitude - previous.0);
            push_delta(&mut encoded, longitude - previous.1);
            previous = (latitude, longitude);
        }

        encoded
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn accumulate(total: i64, bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let position = *cursor;
    let delta = next_delta(bytes, cursor)?;
    total
        .checked_add(delta)
        .ok_or(PolylineError::Overflow { position })
}

fn next_delta(bytes: &[u8], cursor: &mut usize) -> Result<i64, PolylineError> {
    let start = *cursor;
    let mut value: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*cursor)
            .ok_or(PolylineError::Truncated { position: *cursor })?;
        if !(ASCII_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *cursor,
                found: byte as char,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { position: start });
        }

        let chunk = i64::from(byte - ASCII_OFFSET);
        value |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        *cursor += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if value & 1 == 1 { !(value >> 1) } else { value >> 1 })
}

fn push_delta(out: &mut String, delta: i64) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= CONTINUATION {
        let chunk = (CONTINUATION | (value & CHUNK_MASK)) as u8 + ASCII_OFFSET;
        out.push(chunk as char);
        value >>= CHUNK_BITS;
    }
    out.push((value as u8 + ASCII_OFFSET) as char);
}

/// Decoder for the Google encoded polyline format.
#[derive(Debug, Clone, Copy, Default)]
pub struct GooglePolyline;

impl PolylineDecoder for GooglePolyline {
    fn decode(&self, encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
        Polyline::decode(encoded).map(Polyline::into_points)
    }
}
