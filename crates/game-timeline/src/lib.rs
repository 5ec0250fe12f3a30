pub mod adapters;
pub mod api;
pub mod errors;
pub mod export;
pub mod locator;
pub mod model;
pub mod policy;
pub mod ports;
pub mod reader;
pub mod stitch;

pub use api::{GameTimeline, TimelineService};
pub use errors::{TlError, TlResult};
pub use model::{
    EventRecord, ExportResult, GameContext, GameReference, HighlightReport, NotablePlaySelection, PlayId,
    Snapshot, Subject, Timecode, Timeline,
};
pub use policy::{MissingSnapshotPolicy, TimelinePolicyHandle, TimelinePolicyView};
pub use stitch::filter::NOTABLE_PITCH_CODES;
