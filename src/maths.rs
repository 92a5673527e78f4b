//! Mathematical utilities

use nalgebra::Vector3;

/// Get miniminum distance between a point and a line.
///
/// # Arguments
///
/// `pos`: position of the point
///
/// `line_point`: a point on the line
///
/// `dir`: vector pointing along the line.
///
/// Returns the distance and the projection of `pos - line_point` onto `dir`.
pub fn get_minimum_distance_line_point(
    pos: &Vector3<f64>,
    line_point: &Vector3<f64>,
    dir: &Vector3<f64>,
) -> (f64, f64) {
    let rela_cood = pos - line_point;
    let distance = (dir.cross(&rela_cood) / dir.norm()).norm();
    let z = rela_cood.dot(dir) / dir.norm();
    (distance, z)
}

/// `num` evenly spaced values over `[start, stop]`, including both end points.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
