//! Overlay drawn on the processed frame.

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use nalgebra::Point2;
use vision_pairs_core::Contour;
use vision_pairs_targets::{Side, Target};

#[cfg(feature = "tracing")]
use tracing::instrument;

pub const LEFT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Fill for every target that is not `LEFT`, including `UNKNOWN`.
pub const RIGHT_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const CENTER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const SELECTION_COLOR: Rgb<u8> = Rgb([255, 0, 255]);

pub const CENTER_MARKER_RADIUS: i32 = 5;
pub const SELECTION_MARKER_RADIUS: i32 = 10;
pub const SELECTION_MARKER_THICKNESS: i32 = 2;

/// Draw targets, the image center and the selected pair center onto `image`.
///
/// Targets are filled by side, the image center gets a small filled green
/// dot, and the selected pair (if any) a larger purple ring. Degenerate
/// contours are drawn as well as they can be; nothing here fails.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(targets = targets.len()))
)]
pub fn annotate(
    image: &mut RgbImage,
    targets: &[Target],
    image_center: Point2<f64>,
    selected_center: Option<Point2<f64>>,
) {
    let bounds = DrawBounds::around(image);
    for target in targets {
        let color = if target.side() == Side::Left {
            LEFT_COLOR
        } else {
            RIGHT_COLOR
        };
        fill_contour(image, target.contour(), color, &bounds);
    }

    if let Some(c) = bounds.marker(image_center) {
        draw_filled_circle_mut(image, c, CENTER_MARKER_RADIUS, CENTER_COLOR);
    }

    if let Some(c) = selected_center.and_then(|p| bounds.marker(p)) {
        for ring in 0..SELECTION_MARKER_THICKNESS {
            draw_hollow_circle_mut(image, c, SELECTION_MARKER_RADIUS - ring, SELECTION_COLOR);
        }
    }
}

/// Pixel window that drawing coordinates are confined to: the image plus a
/// margin of four times its larger side. Keeps imageproc's integer
/// arithmetic far from `i32` overflow.
#[derive(Clone, Copy, Debug)]
struct DrawBounds {
    min: f64,
    max_x: f64,
    max_y: f64,
}

impl DrawBounds {
    fn around(image: &RgbImage) -> Self {
        let margin = 4.0 * f64::from(image.width().max(image.height()).max(1));
        Self {
            min: -margin,
            max_x: f64::from(image.width()) + margin,
            max_y: f64::from(image.height()) + margin,
        }
    }

    /// Vertex position, pulled onto the window edge when it lies outside.
    fn clamp(&self, p: Point2<f64>) -> (i32, i32) {
        (
            p.x.clamp(self.min, self.max_x).round() as i32,
            p.y.clamp(self.min, self.max_y).round() as i32,
        )
    }

    /// Marker position, `None` when the marker lies outside the window.
    fn marker(&self, p: Point2<f64>) -> Option<(i32, i32)> {
        let inside =
            (self.min..=self.max_x).contains(&p.x) && (self.min..=self.max_y).contains(&p.y);
        inside.then(|| (p.x.round() as i32, p.y.round() as i32))
    }
}

fn fill_contour(image: &mut RgbImage, contour: &Contour, color: Rgb<u8>, bounds: &DrawBounds) {
    if !contour.is_finite() {
        return;
    }

    let mut poly: Vec<Point<i32>> = Vec::with_capacity(contour.len());
    for p in contour.distinct_points() {
        let (x, y) = bounds.clamp(p);
        let q = Point::new(x, y);
        if poly.last() != Some(&q) {
            poly.push(q);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }

    match poly.as_slice() {
        [] => {}
        [p] => {
            if let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) {
                if x < image.width() && y < image.height() {
                    image.put_pixel(x, y, color);
                }
            }
        }
        [a, b] => draw_line_segment_mut(
            image,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            color,
        ),
        _ => draw_polygon_mut(image, &poly, color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(x: f64, lean: f64) -> Target {
        Target::new(
            Contour::from_xy(&[
                (x, 20.0),
                (x + 8.0, 20.0),
                (x + 8.0 + lean, 60.0),
                (x + lean, 60.0),
            ]),
            false,
        )
    }

    #[test]
    fn empty_frame_only_shows_center_marker() {
        let mut img = RgbImage::new(160, 120);
        annotate(&mut img, &[], Point2::new(80.0, 60.0), None);
        assert_eq!(*img.get_pixel(80, 60), CENTER_COLOR);
        assert_eq!(*img.get_pixel(84, 60), CENTER_COLOR);
        let colored = img.pixels().filter(|p| p.0 != [0, 0, 0]).count();
        let marker = img.pixels().filter(|p| **p == CENTER_COLOR).count();
        assert_eq!(colored, marker);
    }

    #[test]
    fn fills_by_side_with_unknown_as_not_left() {
        let left = strip(20.0, -10.0);
        let right = strip(60.0, 10.0);
        let unknown = strip(110.0, 0.0);
        assert_eq!(unknown.side(), Side::Unknown);

        let mut img = RgbImage::new(160, 120);
        annotate(
            &mut img,
            &[left.clone(), right.clone(), unknown.clone()],
            Point2::new(80.0, 5.0),
            None,
        );
        assert_eq!(*img.get_pixel(19, 40), LEFT_COLOR);
        assert_eq!(*img.get_pixel(69, 40), RIGHT_COLOR);
        assert_eq!(*img.get_pixel(114, 40), RIGHT_COLOR);
    }

    #[test]
    fn selection_ring_is_hollow() {
        let mut img = RgbImage::new(160, 120);
        annotate(&mut img, &[], Point2::new(20.0, 20.0), Some(Point2::new(100.0, 60.0)));
        assert_eq!(*img.get_pixel(110, 60), SELECTION_COLOR);
        assert_eq!(*img.get_pixel(109, 60), SELECTION_COLOR);
        assert_eq!(*img.get_pixel(100, 60), Rgb([0, 0, 0]));
    }

    #[test]
    fn degenerate_and_offscreen_contours_do_not_panic() {
        let shapes = [
            Contour::default(),
            Contour::from_xy(&[(5.0, 5.0)]),
            Contour::from_xy(&[(5.0, 5.0), (5.2, 5.1)]),
            Contour::from_xy(&[(1.0, 1.0), (30.0, 1.0)]),
            Contour::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]),
            Contour::from_xy(&[(40.0, -50.0), (500.0, -40.0), (400.0, 400.0)]),
            Contour::from_xy(&[(1.0, 1.0), (f64::INFINITY, 2.0), (3.0, 3.0)]),
        ];
        let targets: Vec<Target> = shapes.into_iter().map(|c| Target::new(c, false)).collect();
        let mut img = RgbImage::new(64, 48);
        annotate(&mut img, &targets, Point2::new(-100.0, 300.0), Some(Point2::new(63.0, 0.0)));
        assert_eq!(*img.get_pixel(5, 5), RIGHT_COLOR);
    }

    #[test]
    fn huge_coordinates_are_confined_to_the_draw_window() {
        let wide = Target::new(
            Contour::from_xy(&[(-1e12, 0.0), (1e12, 0.0), (1e12, 50.0)]),
            false,
        );
        let far = Target::new(
            Contour::from_xy(&[(0.0, 0.0), (6e155, 0.0), (16e155, 40e155), (10e155, 40e155)]),
            false,
        );
        let mut img = RgbImage::new(64, 48);
        annotate(
            &mut img,
            &[wide, far],
            Point2::new(32.0, 24.0),
            Some(Point2::new(1e12, 10.0)),
        );
        // The wide sliver still covers the row just above its lower edge.
        assert_ne!(*img.get_pixel(40, 1), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(32, 24), CENTER_COLOR);
        assert!(img.pixels().all(|p| *p != SELECTION_COLOR));
    }
}
