//! The interface a map canvas exposes to the PK tools.

use geo::Point;
use pk_geo::{Crs, GeoError, Reproject, SphericalMercator};
use smallvec::SmallVec;
use strum::{Display, EnumString};

pub type MarkerId = u64;

/// Colour scheme of a marker, one per tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MarkerStyle {
    Identify,
    Locate,
    Measure,
}

impl MarkerStyle {
    /// RGB colour the marker is drawn in.
    pub const fn color(&self) -> (u8, u8, u8) {
        match self {
            MarkerStyle::Identify => (255, 0, 0),
            MarkerStyle::Locate => (0, 0, 255),
            MarkerStyle::Measure => (0, 200, 0),
        }
    }
}

/// A resolved position is drawn as a hollow ring around a filled dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MarkerShape {
    Ring,
    Dot,
}

impl MarkerShape {
    /// Icon size in pixels.
    pub const fn size(&self) -> u32 {
        match self {
            MarkerShape::Ring => 20,
            MarkerShape::Dot => 6,
        }
    }

    pub const fn filled(&self) -> bool {
        matches!(self, MarkerShape::Dot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Position in the map's reference system.
    pub position: Point,
    pub style: MarkerStyle,
    pub shape: MarkerShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Level {
    Info,
    Warning,
}

/// A value the user can copy from a notice, under a button label.
#[derive(Clone, Debug, PartialEq)]
pub struct Copyable {
    pub label: &'static str,
    pub text: String,
}

/// A message pushed to the host's message bar.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: &'static str,
    pub level: Level,
    pub text: String,
    pub link: Option<String>,
    pub copy: SmallVec<[Copyable; 3]>,
}

impl Notice {
    pub fn info(title: &'static str, text: impl Into<String>) -> Self {
        Notice {
            title,
            level: Level::Info,
            text: text.into(),
            link: None,
            copy: SmallVec::new(),
        }
    }

    pub fn warning(title: &'static str, text: impl Into<String>) -> Self {
        Notice {
            level: Level::Warning,
            ..Notice::info(title, text)
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_copy(mut self, label: &'static str, text: impl Into<String>) -> Self {
        self.copy.push(Copyable {
            label,
            text: text.into(),
        });
        self
    }
}

/// The canvas hosting the tools.
///
/// Every call is synchronous and runs on the host's event loop.
pub trait Host {
    /// The reference system clicks arrive in and markers are drawn in.
    fn map_crs(&self) -> Crs;

    /// Reprojects between reference systems. Defaults to the built-in
    /// [`SphericalMercator`] transform.
    fn transform(&self, point: Point, from: Crs, to: Crs) -> Result<Point, GeoError> {
        SphericalMercator.transform(point, from, to)
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId;

    fn remove_marker(&mut self, id: MarkerId);

    fn push_message(&mut self, notice: Notice);

    /// Asks the user to pick one of several layers, by name.
    /// Returns the chosen index, or `None` if the choice was dismissed.
    fn choose_layer(&mut self, names: &[&str]) -> Option<usize>;

    /// Centers the map on `point` (map reference system) at the scale
    /// denominator `scale`.
    fn set_center(&mut self, point: Point, scale: f64);
}

/// Adapts a [`Host`] into a [`Reproject`] implementation.
pub(crate) struct HostTransform<'a, H: Host>(pub &'a H);

impl<H: Host> Reproject for HostTransform<'_, H> {
    fn transform(&self, point: Point, from: Crs, to: Crs) -> Result<Point, GeoError> {
        self.0.transform(point, from, to)
    }
}
