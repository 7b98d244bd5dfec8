pub mod highlight;
pub mod placement;
pub mod renderer;
pub mod span;
pub mod spinner;
pub mod style;
pub mod theme;

pub use placement::{PanelGeometry, PlacementOptions, Rect, Side};
pub use renderer::{Notice, NoticeKind, PanelFrame, RenderFrame, Renderer, ViewState};
pub use span::{Span, SpanLine};
pub use style::{Color, Style};
pub use theme::Theme;
