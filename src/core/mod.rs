pub mod bar_buffer;
pub mod chart_data;
pub mod data_set;
pub mod entry;
pub mod indexer;
pub mod line_buffer;
pub mod scale;
pub mod transformer;
pub mod types;
pub mod windowing;

pub use bar_buffer::{
    BarBuffer, BarBufferBuilder, BarBufferOptions, BarDirection, BarRect, CornerRounding,
    RoundedEdge, clamp_bar_height,
};
pub use chart_data::{ChartData, ChartKind, DEFAULT_BAR_WIDTH, DataRevision};
pub use data_set::{DataSet, Rounding};
pub use entry::{Entry, IconHandle, StackRange, StackRanges};
pub use indexer::{EntryAddress, EntryIndexer, IndexingMode, SortedEntryIndex};
pub use line_buffer::{
    DEFAULT_POINT_SIZE_PX, LineBuffer, LineBufferBuilder, LineBufferOptions, LinePoint,
};
pub use scale::LinearScale;
pub use transformer::{AxisRange, AxisTransform, CoordinateTransformer, FLAT_SPAN_PADDING};
pub use types::{
    AnimationPhase, AxisDependency, ContentInsets, IntRect, PixelPoint, PixelRect, ValueRect,
    Viewport,
};
pub use windowing::XBounds;
