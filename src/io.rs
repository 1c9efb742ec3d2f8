//! Geometry source and sink.
//!
//! Curves come in as JSON: either a bare array of geometry records or a
//! GeoJSON `FeatureCollection`. Only valid `LineString` geometries are
//! used; everything else is counted and skipped. Bends go out as a
//! GeoJSON `FeatureCollection` of 3-point line strings.

use std::io::{Read, Write};

use geo::{Coord, LineString};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::bends::BendCollection;
use crate::error::BendError;

/// One geometry as read from the source.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveRecord {
    /// Geometry kind tag, e.g. `"LineString"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub coordinates: Value,
}

fn default_valid() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceDocument {
    Records(Vec<CurveRecord>),
    Features { features: Vec<Feature> },
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<CurveRecord>,
}

/// Curves accepted from a source, plus how many records were passed over.
#[derive(Debug, Clone, Default)]
pub struct CurveSet {
    pub curves: Vec<LineString<f64>>,
    pub skipped: usize,
}

impl CurveRecord {
    /// The record as a curve, or `None` if it is not a valid line string.
    ///
    /// A third (z) ordinate is dropped. Any other arity is an error.
    pub fn to_curve(&self) -> Result<Option<LineString<f64>>, BendError> {
        if self.kind != "LineString" || !self.valid {
            return Ok(None);
        }
        let raw: Vec<Vec<f64>> = serde_json::from_value(self.coordinates.clone())?;
        let coords = raw
            .iter()
            .enumerate()
            .map(|(i, pos)| match pos.as_slice() {
                [x, y] | [x, y, _] => Ok(Coord { x: *x, y: *y }),
                _ => Err(BendError::InvalidGeometry(format!(
                    "position {} has {} ordinates",
                    i,
                    pos.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(LineString::new(coords)))
    }
}

/// Read every usable curve from a JSON source.
pub fn read_curves<R: Read>(reader: R) -> Result<CurveSet, BendError> {
    let records: Vec<Option<CurveRecord>> = match serde_json::from_reader::<_, SourceDocument>(reader)? {
        SourceDocument::Records(records) => records.into_iter().map(Some).collect(),
        SourceDocument::Features { features } => features.into_iter().map(|f| f.geometry).collect(),
    };

    let mut set = CurveSet::default();
    for record in records {
        match record.as_ref().map(CurveRecord::to_curve).transpose()?.flatten() {
            Some(curve) => set.curves.push(curve),
            None => set.skipped += 1,
        }
    }
    Ok(set)
}

/// Write bends as a GeoJSON `FeatureCollection`.
///
/// Each feature carries `distance`, `length` and `class` (null when the
/// bend was never classified).
pub fn write_bends<W: Write>(writer: W, bends: &BendCollection) -> Result<(), BendError> {
    let features: Vec<Value> = bends
        .iter()
        .map(|bend| {
            let coordinates: Vec<[f64; 2]> = bend.geometry().coords().map(|c| [c.x, c.y]).collect();
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
                "properties": {
                    "distance": bend.distance(),
                    "length": bend.length(),
                    "class": bend.class_level(),
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });
    serde_json::to_writer_pretty(writer, &collection)?;
    Ok(())
}
