pub mod geometry;
pub mod graph;
pub mod assets;
pub mod audio;
pub mod composer;
pub mod sync;
pub mod interaction;
pub mod perf;
pub mod app;
pub mod demo;

pub use self::geometry::{Color, Geometry};
pub use self::graph::{Light, NodeId, NodeStore, SceneGraph, VisualNode};
pub use self::assets::{AssetLoader, MeshLibrary};
pub use self::audio::{AudioSink, CueLog, TracingAudio};
pub use self::composer::{LightDesc, SceneComposer, SceneDescriptor};
pub use self::sync::{FrameSynchronizer, SyncReport};
pub use self::interaction::InteractionController;
pub use self::perf::{PerfMonitor, PerfSnapshot};
pub use self::app::{SceneApp, TickReport};
