//! Rectangle and line operator generation
//!
//! All coordinates are top-origin (y grows downward) and converted to PDF
//! bottom-origin coordinates here, so callers never handle the flip.

use crate::canvas::Color;
use lopdf::content::Operation;
use lopdf::Object;

/// Operators for a rectangle at top-origin (x, y) extending down by `height`.
///
/// Fill and stroke are independent; passing both paints the fill first so the
/// border stays visible.
pub fn rect_operations(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    page_height: f32,
    fill: Option<Color>,
    stroke: Option<(Color, f32)>,
) -> Vec<Operation> {
    let pdf_y = page_height - y - height;
    let rect = vec![
        Object::Real(x),
        Object::Real(pdf_y),
        Object::Real(width),
        Object::Real(height),
    ];

    let mut ops = Vec::new();
    if let Some(color) = fill {
        ops.push(Operation::new(
            "rg",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ));
        ops.push(Operation::new("re", rect.clone()));
        ops.push(Operation::new("f", vec![]));
    }
    if let Some((color, line_width)) = stroke {
        ops.push(Operation::new(
            "RG",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ));
        ops.push(Operation::new("w", vec![Object::Real(line_width)]));
        ops.push(Operation::new("re", rect));
        ops.push(Operation::new("S", vec![]));
    }
    ops
}

/// Operators for a straight stroked line between two top-origin points
pub fn line_operations(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    page_height: f32,
    color: Color,
    width: f32,
) -> Vec<Operation> {
    vec![
        Operation::new(
            "RG",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ),
        Operation::new("w", vec![Object::Real(width)]),
        Operation::new(
            "m",
            vec![Object::Real(x1), Object::Real(page_height - y1)],
        ),
        Operation::new(
            "l",
            vec![Object::Real(x2), Object::Real(page_height - y2)],
        ),
        Operation::new("S", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filled_rect_flips_y() {
        let ops = rect_operations(10.0, 20.0, 100.0, 30.0, 800.0, Some(Color::black()), None);
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["rg", "re", "f"]);
        // top-origin y=20 with height 30 puts the bottom edge at pdf y=750
        assert_eq!(ops[1].operands[1], Object::Real(750.0));
    }

    #[test]
    fn test_stroked_rect_sets_line_width() {
        let ops = rect_operations(
            0.0,
            0.0,
            50.0,
            50.0,
            800.0,
            None,
            Some((Color::black(), 0.8)),
        );
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["RG", "w", "re", "S"]);
        assert_eq!(ops[1].operands, vec![Object::Real(0.8)]);
    }

    #[test]
    fn test_fill_and_stroke_paints_fill_first() {
        let ops = rect_operations(
            0.0,
            0.0,
            10.0,
            10.0,
            800.0,
            Some(Color::white()),
            Some((Color::black(), 1.0)),
        );
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["rg", "re", "f", "RG", "w", "re", "S"]);
    }

    #[test]
    fn test_no_style_no_ops() {
        let ops = rect_operations(0.0, 0.0, 10.0, 10.0, 800.0, None, None);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_line_operations() {
        let ops = line_operations(40.0, 100.0, 500.0, 100.0, 841.89, Color::black(), 0.75);
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["RG", "w", "m", "l", "S"]);
        assert_eq!(ops[2].operands[0], Object::Real(40.0));
        match ops[2].operands[1] {
            Object::Real(y) => assert!((y - 741.89).abs() < 0.01),
            ref other => panic!("expected real, got {other:?}"),
        }
        assert_eq!(ops[3].operands[0], Object::Real(500.0));
    }
}
