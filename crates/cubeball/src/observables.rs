//! Shape observables measured on the cube coordinates.
//!
//! The lattice coordinates are diagnostic only (surgery never reads them), but
//! they give the radial profile of the ball: moments of the distance of each
//! cube from the centroid.

use nalgebra::Vector3;

use crate::complex::Ball;

/// Means of `r`, `r²`, `r³`, `r⁴` over all cubes, `r` measured from the
/// centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RadiusMoments {
    pub mean_r: f64,
    pub mean_r2: f64,
    pub mean_r3: f64,
    pub mean_r4: f64,
}

impl RadiusMoments {
    pub fn as_array(&self) -> [f64; 4] {
        [self.mean_r, self.mean_r2, self.mean_r3, self.mean_r4]
    }
}

/// Mean lattice coordinate of the cubes.
pub fn centroid(ball: &Ball) -> Vector3<f64> {
    let sum = ball
        .cubes()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, (_, c)| {
            acc + c.coord().cast::<f64>()
        });
    sum / ball.volume() as f64
}

pub fn radius_moments(ball: &Ball) -> RadiusMoments {
    let center = centroid(ball);
    let mut sums = [0.0f64; 4];
    for (_, cube) in ball.cubes() {
        let r = (cube.coord().cast::<f64>() - center).norm();
        let r2 = r * r;
        sums[0] += r;
        sums[1] += r2;
        sums[2] += r2 * r;
        sums[3] += r2 * r2;
    }
    let n = ball.volume() as f64;
    RadiusMoments {
        mean_r: sums[0] / n,
        mean_r2: sums[1] / n,
        mean_r3: sums[2] / n,
        mean_r4: sums[3] / n,
    }
}
