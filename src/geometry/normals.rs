use glam::Vec3;

use crate::constants::sphere::FACE_NORMAL_EPSILON;

/// Flat normal of triangle `(a, b, c)` with counter-clockwise front faces.
///
/// Collinear or collapsed triangles get `Vec3::ZERO` instead of a division
/// by a vanishing length. The test is on the angle between the edges, so the
/// triangle's size does not matter.
pub fn compute_face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let (Some(e1), Some(e2)) = (edge_direction(b - a), edge_direction(c - a)) else {
        log::trace!("Collapsed face {:?} {:?} {:?}, using zero normal", a, b, c);
        return Vec3::ZERO;
    };

    // |e1 x e2| is the sine of the corner angle at `a`
    let cross = e1.cross(e2);
    let length = cross.length();
    if length < FACE_NORMAL_EPSILON {
        log::trace!("Degenerate face {:?} {:?} {:?}, using zero normal", a, b, c);
        return Vec3::ZERO;
    }
    cross / length
}

/// Unit direction of `edge`, rescaled first so squaring its components
/// cannot overflow or underflow. `None` for zero or non-finite edges.
fn edge_direction(edge: Vec3) -> Option<Vec3> {
    let scale = edge.abs().max_element();
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    (edge / scale).try_normalize()
}
