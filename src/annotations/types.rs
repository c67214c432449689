use crate::focus::{ColumnRange, LineRange};
use crate::tween::FullTween;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What a renderer receives when it draws an annotation.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationProps<'a> {
    pub data: &'a Value,
    /// Already rendered content the annotation wraps.
    pub children: &'a str,
    pub is_inline: bool,
}

/// Opaque render callback attached to an annotation. The planner never
/// calls it, it only carries it to the output.
#[derive(Clone)]
pub struct Renderer(Arc<dyn Fn(&AnnotationProps<'_>) -> String + Send + Sync>);

impl Renderer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&AnnotationProps<'_>) -> String + Send + Sync + 'static,
    {
        Renderer(Arc::new(f))
    }

    pub fn render(&self, props: &AnnotationProps<'_>) -> String {
        (self.0)(props)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer(..)")
    }
}

/// Two renderers are equal when they share the same callback.
impl PartialEq for Renderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An annotation as declared by the author, for one code state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationDescriptor {
    /// Target in focus-string syntax, e.g. `"3:5"` or `"4[2:9]"`.
    pub focus: String,
    #[serde(default)]
    pub data: Value,
    /// Only settable from code.
    #[serde(skip)]
    pub render: Option<Renderer>,
}

impl AnnotationDescriptor {
    pub fn new(focus: impl Into<String>) -> Self {
        AnnotationDescriptor {
            focus: focus.into(),
            data: Value::Null,
            render: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_render(mut self, render: Renderer) -> Self {
        self.render = Some(render);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    /// Targets column ranges within lines.
    Inline,
    /// Targets whole line ranges.
    Multiline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineAnnotation {
    pub column_numbers: ColumnRange,
    pub data: Value,
    #[serde(skip)]
    pub render: Option<Renderer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultilineAnnotation {
    pub line_numbers: LineRange,
    pub data: Value,
    #[serde(skip)]
    pub render: Option<Renderer>,
}

/// Inline annotations keyed by visible line number, in declaration order.
pub type InlineByLine = BTreeMap<usize, Vec<InlineAnnotation>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAnnotations {
    pub inline: FullTween<InlineByLine>,
    pub multiline: FullTween<Vec<MultilineAnnotation>>,
}
