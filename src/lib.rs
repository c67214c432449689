//! Plans the animated transition between two highlighted states of a code
//! block: which lines stay, enter or exit, how token groups are focused and
//! annotated, and the tweens a renderer samples to draw any frame.

pub mod annotations;
pub mod cache;
pub mod config;
pub mod differ;
pub mod error;
pub mod focus;
pub mod line_numbers;
pub mod myers;
pub mod normalize;
pub mod shift;
pub mod splitter;
pub mod tween;

pub use annotations::{
    AnnotatedLine, AnnotatedTokenGroups, AnnotationDescriptor, AnnotationKind, AnnotationProps,
    InlineAnnotation, LineGroup, MultilineAnnotation, Renderer,
};
pub use cache::PlanCache;
pub use config::ShiftConfig;
pub use differ::{MergedCode, MergedLine, Movement};
pub use error::{Error, Result};
pub use focus::{ColumnRange, FocusSpec, LineRange};
pub use line_numbers::LineNumbers;
pub use normalize::{HighlightedLine, Token};
pub use shift::{parse, CodeShift, ShiftInput, TweenedLine, TweenedLineGroup};
pub use splitter::{FocusedCode, FocusedLine, TokenGroup};
pub use tween::{Easing, FullTween, Side, Tween, TweenParams};
