//! A surface that records draw calls instead of rasterizing them.

use carbonzero_core::{Point, Rgba, Size};

use crate::{Affine, Ellipse, Paint, Surface, TransformStack};

/// A recorded draw call, with the logical transform in effect when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: Point,
        size: Size,
        paint: Paint,
        transform: Affine,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
        transform: Affine,
    },
    FillEllipse {
        ellipse: Ellipse,
        paint: Paint,
        transform: Affine,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        line_width: f64,
        color: Rgba,
        transform: Affine,
    },
}

/// Records every draw call made against it.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    size: Size,
    transforms: TransformStack,
    commands: Vec<DrawCommand>,
}

impl Recording {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transforms: TransformStack::new(Affine::IDENTITY),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Logical-space centers of every filled ellipse, in draw order.
    pub fn ellipse_centers(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillEllipse {
                    ellipse, transform, ..
                } => Some(transform.apply(ellipse.center)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recording {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transforms.concat(Affine::translation(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.transforms.concat(Affine::rotation(angle));
    }

    fn transform(&self) -> Affine {
        self.transforms.current()
    }

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            paint: paint.clone(),
            transform: self.transforms.current(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
            transform: self.transforms.current(),
        });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Paint) {
        self.commands.push(DrawCommand::FillEllipse {
            ellipse,
            paint: paint.clone(),
            transform: self.transforms.current(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
            transform: self.transforms.current(),
        });
    }
}
