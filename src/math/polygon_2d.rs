use super::Point2;

/// Returns the average of all points, or `None` for an empty slice.
#[must_use]
pub fn centroid_2d(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Some(Point2::new(sum_x / n, sum_y / n))
}

/// Returns the point halfway between `a` and `b`.
#[must_use]
pub fn midpoint_2d(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn centroid_of_square() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let c = centroid_2d(&pts).unwrap();
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 1.0);
    }

    #[test]
    fn centroid_of_empty_is_none() {
        assert!(centroid_2d(&[]).is_none());
    }

    #[test]
    fn midpoint_is_halfway() {
        let m = midpoint_2d(&Point2::new(-1.0, 4.0), &Point2::new(3.0, 0.0));
        assert_relative_eq!(m.x, 1.0);
        assert_relative_eq!(m.y, 2.0);
    }
}
