pub mod path;
pub mod polygon;
pub mod rect;
pub mod segment;

pub use path::Path;
pub use polygon::Polygon;
pub use rect::Rect;
pub use segment::Segment;
