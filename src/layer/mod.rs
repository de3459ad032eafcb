//! In-memory calibrated line layers.
//!
//! A [`Layer`] owns its features together with an R-tree over their
//! envelopes, the spatial index used to shortlist candidate lines for a
//! click. Layers are read-only once built.

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod feature;
#[doc(hidden)]
pub mod load;

#[doc(inline)]
pub use error::LayerError;
#[doc(inline)]
pub use feature::{Feature, FeatureId, IndexedFeature, UNKNOWN_ROAD};

use std::collections::BTreeSet;

use log::debug;
use pk_geo::Crs;
use rstar::RTree;
use rustc_hash::FxHashMap;

pub struct Layer {
    pub(crate) name: String,
    pub(crate) crs: Crs,
    pub(crate) fields: Vec<String>,

    pub(crate) features: Vec<Feature>,
    pub(crate) lookup: FxHashMap<FeatureId, usize>,

    pub(crate) index: RTree<IndexedFeature>,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Layer '{}' ({}) with Features: {}",
            self.name,
            self.crs,
            self.features.len()
        )
    }
}

impl Layer {
    /// Builds a layer, bulk loading the spatial index.
    /// Features without any vertices are kept but never indexed.
    pub fn new(name: impl Into<String>, crs: Crs, fields: Vec<String>, features: Vec<Feature>) -> Self {
        let lookup = features
            .iter()
            .enumerate()
            .map(|(position, feature)| (feature.id, position))
            .collect::<FxHashMap<_, _>>();

        let indexed = features
            .iter()
            .filter_map(IndexedFeature::new)
            .collect::<Vec<_>>();

        let name = name.into();
        debug!(
            "Indexed {} of {} features for layer '{name}'",
            indexed.len(),
            features.len()
        );

        Layer {
            name,
            crs,
            fields,
            features,
            lookup,
            index: RTree::bulk_load(indexed),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn index(&self) -> &RTree<IndexedFeature> {
        &self.index
    }

    pub fn size(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.lookup.get(&id).map(|position| &self.features[*position])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|name| name == field)
    }

    /// If the layer can back the PK tools: it must carry the road field.
    /// Measured geometry is guaranteed by construction.
    pub fn is_calibrated(&self, road_field: &str) -> bool {
        self.has_field(road_field)
    }

    /// Every distinct, non-empty road identifier, sorted.
    pub fn road_names(&self, road_field: &str) -> Vec<&str> {
        self.features
            .iter()
            .filter_map(|feature| feature.attribute(road_field))
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The first feature, in layer order, whose road identifier is exactly `name`.
    pub fn find_road(&self, road_field: &str, name: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.attribute(road_field) == Some(name))
    }
}
