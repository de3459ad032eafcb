//! Map tool controllers.
//!
//! Three independent tools share the resolver through composition:
//! [`IdentifyTool`] resolves a click to a PK, [`LocateTool`] resolves a
//! typed PK to a map position and [`MeasureTool`] measures the distance
//! between two clicks along one road. Each owns its own [`Session`].
//!
//! Tools are driven synchronously by their [`Host`]. Failures are turned
//! into notices at the tool boundary and never returned to the host.
//!
//! [`Session`]: crate::session::Session

#[doc(hidden)]
pub mod host;
#[doc(hidden)]
pub mod identify;
#[doc(hidden)]
pub mod locate;
#[doc(hidden)]
pub mod measure;
#[doc(hidden)]
pub mod notice;
#[doc(hidden)]
pub mod select;

#[doc(inline)]
pub use host::{Copyable, Host, Level, Marker, MarkerId, MarkerShape, MarkerStyle, Notice};
#[doc(inline)]
pub use identify::IdentifyTool;
#[doc(inline)]
pub use locate::LocateTool;
#[doc(inline)]
pub use measure::{MeasureReport, MeasureState, MeasureTool};
#[doc(inline)]
pub use notice::{report, street_view_url};
#[doc(inline)]
pub use select::select_layer;

use geo::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(char),
}

/// Whether a tool keeps receiving map events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolStatus {
    Active,
    Detached,
}

/// A tool receiving canvas events.
pub trait MapTool {
    fn on_click<H: Host>(&mut self, host: &mut H, point: Point);

    /// Escape detaches the tool. Its markers stay on the map until the
    /// tool is deactivated.
    fn on_key<H: Host>(&mut self, _host: &mut H, key: Key) -> ToolStatus {
        match key {
            Key::Escape => ToolStatus::Detached,
            Key::Other(_) => ToolStatus::Active,
        }
    }
}
