//! Plain-text dumps of the complex for offline analysis.
//!
//! All writers emit one line per object, in dense-id (or bid) order, and take
//! any `io::Write`; callers own buffering and file naming.

use std::io::{self, Write};

use crate::complex::Ball;
use crate::geom::Dir3;

/// `id` followed by the ids of the face-sharing neighbour cubes, in axis order,
/// tab-separated.
pub fn write_cube_neighbors(ball: &Ball, mut out: impl Write) -> io::Result<()> {
    for (_, cube) in ball.cubes() {
        write!(out, "{}", cube.id())?;
        for dir in Dir3::AXES {
            if let Some(n) = cube.neighbor(dir) {
                write!(out, "\t{}", ball.cube(n).id())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `bid` followed by the bids of the four adjacent boundary faces, in slot
/// order, space-separated.
pub fn write_boundary_neighbors(ball: &Ball, mut out: impl Write) -> io::Result<()> {
    for (_, face) in ball.boundary_faces() {
        write!(out, "{}", face.bid().unwrap_or_default())?;
        for (_, adj) in face.adjacent_faces() {
            match ball.face(adj).bid() {
                Some(bid) => write!(out, " {bid}")?,
                None => write!(out, " -")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// `id x y z` per cube.
pub fn write_cube_coordinates(ball: &Ball, mut out: impl Write) -> io::Result<()> {
    for (_, cube) in ball.cubes() {
        let c = cube.coord();
        writeln!(out, "{} {} {} {}", cube.id(), c.x, c.y, c.z)?;
    }
    Ok(())
}
