mod bind;
mod types;
pub use bind::*;
pub use types::*;

use crate::error::{Error, Result};
use crate::focus::FocusSpec;
use crate::tween::{FullTween, Tween};

impl AnnotationDescriptor {
    /// Whether the descriptor targets columns or whole lines.
    pub fn kind(&self) -> Result<AnnotationKind> {
        let spec = FocusSpec::parse(&self.focus)?;
        classify(&spec, &self.focus)
    }
}

fn classify(spec: &FocusSpec, input: &str) -> Result<AnnotationKind> {
    let selectors = spec.selectors();
    if selectors.is_empty() {
        return Err(Error::malformed(input, "annotation target is empty"));
    }
    let with_columns = selectors.iter().filter(|s| s.columns.is_some()).count();
    if with_columns == selectors.len() {
        Ok(AnnotationKind::Inline)
    } else if with_columns == 0 {
        Ok(AnnotationKind::Multiline)
    } else {
        Err(Error::malformed(
            input,
            "annotation target mixes column and line selectors",
        ))
    }
}

/// Resolves the annotations declared for each state. Annotations are never
/// carried over from one state to the other.
///
/// # Examples
///
/// ```
/// use codeshift::annotations::{parse_annotations, AnnotationDescriptor};
/// use codeshift::Tween;
///
/// let declared = Tween::prev_only(vec![
///     AnnotationDescriptor::new("2[3:5]"),
///     AnnotationDescriptor::new("4:6"),
/// ]);
/// let parsed = parse_annotations(&declared).unwrap();
/// assert_eq!(parsed.inline.prev[&2][0].column_numbers.start, 3);
/// assert_eq!(parsed.multiline.prev[0].line_numbers.end, 6);
/// assert!(parsed.multiline.next.is_empty());
/// ```
pub fn parse_annotations(
    annotations: &Tween<Vec<AnnotationDescriptor>>,
) -> Result<ParsedAnnotations> {
    let parsed = FullTween::new(
        annotations.prev.as_deref().unwrap_or_default(),
        annotations.next.as_deref().unwrap_or_default(),
    )
    .try_map(|descriptors, _| parse_side(descriptors))?;
    Ok(ParsedAnnotations {
        inline: FullTween::new(parsed.prev.0, parsed.next.0),
        multiline: FullTween::new(parsed.prev.1, parsed.next.1),
    })
}

fn parse_side(descriptors: &[AnnotationDescriptor]) -> Result<(InlineByLine, Vec<MultilineAnnotation>)> {
    let mut inline = InlineByLine::new();
    let mut multiline = vec![];
    for descriptor in descriptors {
        let spec = FocusSpec::parse(&descriptor.focus)?;
        match classify(&spec, &descriptor.focus)? {
            AnnotationKind::Inline => {
                for selector in spec.selectors() {
                    let columns = selector.columns.as_deref().unwrap_or_default();
                    for column_numbers in columns {
                        inline
                            .entry(selector.lines.start)
                            .or_default()
                            .push(InlineAnnotation {
                                column_numbers: *column_numbers,
                                data: descriptor.data.clone(),
                                render: descriptor.render.clone(),
                            });
                    }
                }
            }
            AnnotationKind::Multiline => {
                for selector in spec.selectors() {
                    multiline.push(MultilineAnnotation {
                        line_numbers: selector.lines,
                        data: descriptor.data.clone(),
                        render: descriptor.render.clone(),
                    });
                }
            }
        }
    }
    Ok((inline, multiline))
}
