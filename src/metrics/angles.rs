// Joint angle computation
// Angle at a joint from the two adjacent limb segments

use crate::capture::Point3;

/// Angle at vertex `b` between the rays `b -> a` and `b -> c`, in degrees.
///
/// Returns `None` when the angle is undefined: a limb vector has zero
/// length (coincident keypoints), or a coordinate is not finite. The cosine
/// ratio is clamped to [-1, 1] before the inverse cosine so floating point
/// rounding can never push it outside the domain; a `Some` result is always
/// within [0, 180].
pub fn joint_angle(a: Point3, b: Point3, c: Point3) -> Option<f64> {
    let v1 = a - b;
    let v2 = c - b;

    let norms = v1.norm() * v2.norm();
    if norms == 0.0 || !norms.is_finite() {
        return None;
    }

    let cos = (v1.dot(v2) / norms).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// `joint_angle` over possibly-untracked keypoints: `None` as soon as any
/// of the three points is absent.
pub fn limb_angle(a: Option<Point3>, b: Option<Point3>, c: Option<Point3>) -> Option<f64> {
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) => joint_angle(a, b, c),
        _ => None,
    }
}
