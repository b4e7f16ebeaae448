//! Translation of a duplicate segment so that it sits beside the original.
//!
//! Both strategies take the target offset distance and the two live endpoints
//! of a segment and return the displacement to apply to the duplicate.
//! [`CalcMethod::Exact`] places the duplicate at exactly `|d|` from the
//! original line; [`CalcMethod::Approximate`] avoids the trigonometric call and
//! lands somewhere in `[|d|, sqrt(2) * |d|]`.

/// A position in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards on screen.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A displacement to apply to a rendered segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation {
	/// Shift along x.
	pub dx: f64,
	/// Shift along y.
	pub dy: f64,
}

impl Translation {
	/// No displacement.
	pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

	/// Shift by `(dx, dy)`.
	pub const fn new(dx: f64, dy: f64) -> Self {
		Self { dx, dy }
	}
}

/// Which algorithm computes link translations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalcMethod {
	/// Offset equals the target distance.
	#[default]
	Exact,
	/// Offset within `sqrt(2)` of the target distance, without trigonometry.
	Approximate,
}

impl CalcMethod {
	/// Translation for a segment `p0 -> p1` offset by `target_distance`.
	pub fn translation(self, target_distance: f64, p0: Point, p1: Point) -> Translation {
		match self {
			CalcMethod::Exact => calc_translation_exact(target_distance, p0, p1),
			CalcMethod::Approximate => calc_translation_approximate(target_distance, p0, p1),
		}
	}

	/// The other method.
	pub fn toggled(self) -> Self {
		match self {
			CalcMethod::Exact => CalcMethod::Approximate,
			CalcMethod::Approximate => CalcMethod::Exact,
		}
	}

	/// Lowercase name for display.
	pub fn label(self) -> &'static str {
		match self {
			CalcMethod::Exact => "exact",
			CalcMethod::Approximate => "approximate",
		}
	}
}

fn is_degenerate(dx: f64, dy: f64) -> bool {
	dx == 0.0 && dy == 0.0
}

/// Translation placing the duplicate segment exactly `|target_distance|` away.
///
/// Horizontal and zero-length segments are shifted straight along the y axis.
pub fn calc_translation_exact(target_distance: f64, p0: Point, p1: Point) -> Translation {
	let (x1_x0, y1_y0) = (p1.x - p0.x, p1.y - p0.y);
	if y1_y0 == 0.0 {
		return Translation::new(0.0, target_distance);
	}
	let angle = (x1_x0 / y1_y0).atan();
	Translation::new(-target_distance * angle.cos(), target_distance * angle.sin())
}

/// Cheaper translation whose resulting offset lies in
/// `[|target_distance|, sqrt(2) * |target_distance|]`.
///
/// The translation runs along one axis with unit weight and compensates on
/// the other, picking the axis closest to the segment's normal.
pub fn calc_translation_approximate(target_distance: f64, p0: Point, p1: Point) -> Translation {
	let (x1_x0, y1_y0) = (p1.x - p0.x, p1.y - p0.y);
	if target_distance == 0.0 {
		return Translation::ZERO;
	}
	if is_degenerate(x1_x0, y1_y0) {
		return Translation::new(0.0, target_distance);
	}
	if y1_y0 == 0.0 || (x1_x0 / y1_y0).abs() > 1.0 {
		Translation::new(target_distance * y1_y0 / x1_x0, -target_distance)
	} else {
		Translation::new(target_distance, target_distance * -x1_x0 / y1_y0)
	}
}

/// Distance between the line through `p0, p1` and the same line moved by
/// `translation`. Zero-length segments report the length of the translation.
pub fn perpendicular_distance(p0: Point, p1: Point, translation: Translation) -> f64 {
	let (x1_x0, y1_y0) = (p1.x - p0.x, p1.y - p0.y);
	let length = x1_x0.hypot(y1_y0);
	if length == 0.0 {
		return translation.dx.hypot(translation.dy);
	}
	(x1_x0 * translation.dy - y1_y0 * translation.dx).abs() / length
}
