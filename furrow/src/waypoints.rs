//! Waypoint sequencing.
//!
//! Flattens an ordered guidance line set into one continuous coordinate
//! sequence. The default pattern alternates direction on every line
//! (boustrophedon), so each line starts on the side where the previous one
//! ended.

use crate::geometry::{Line, Waypoint};

/// How consecutive guidance lines are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalPattern {
    /// Alternate start/end on every line: even index forward, odd reversed.
    #[default]
    Boustrophedon,
    /// Every line driven start to end, returning to the same side each time.
    SameSide,
}

impl TraversalPattern {
    /// Get pattern name as string.
    pub fn name(&self) -> &'static str {
        match self {
            TraversalPattern::Boustrophedon => "boustrophedon",
            TraversalPattern::SameSide => "same-side",
        }
    }

    /// Parse pattern from string.
    pub fn from_name(name: &str) -> Option<TraversalPattern> {
        match name.to_lowercase().as_str() {
            "boustrophedon" | "alternate" | "zigzag" => Some(TraversalPattern::Boustrophedon),
            "same-side" | "same" | "oneway" => Some(TraversalPattern::SameSide),
            _ => None,
        }
    }

    /// All available patterns.
    pub fn all() -> &'static [TraversalPattern] {
        &[TraversalPattern::Boustrophedon, TraversalPattern::SameSide]
    }

    /// Whether the line at `index` is driven end to start.
    #[inline]
    pub fn is_reversed(&self, index: usize) -> bool {
        match self {
            TraversalPattern::Boustrophedon => index % 2 == 1,
            TraversalPattern::SameSide => false,
        }
    }
}

/// Convert ordered guidance lines into the boustrophedon waypoint path.
///
/// Two waypoints per line; nothing is added or dropped. An empty line set
/// gives an empty path.
pub fn sequence_waypoints(lines: &[Line]) -> Vec<Waypoint> {
    sequence_with_pattern(lines, TraversalPattern::Boustrophedon)
}

/// Convert ordered guidance lines into a waypoint path using `pattern`.
pub fn sequence_with_pattern(lines: &[Line], pattern: TraversalPattern) -> Vec<Waypoint> {
    let mut waypoints = Vec::with_capacity(lines.len() * 2);
    for (index, line) in lines.iter().enumerate() {
        if pattern.is_reversed(index) {
            waypoints.push(line.end());
            waypoints.push(line.start());
        } else {
            waypoints.push(line.start());
            waypoints.push(line.end());
        }
    }
    waypoints
}

/// Non-productive travel in a waypoint path: the sum of the hops from the
/// last waypoint of each line to the first waypoint of the next.
///
/// Expects the two-waypoints-per-line layout produced by this module.
pub fn transit_distance(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .chunks_exact(2)
        .collect::<Vec<_>>()
        .windows(2)
        .map(|pair| pair[0][1].distance(pair[1][0]))
        .sum()
}

/// Productive travel: the summed length of all guidance lines.
pub fn working_distance(lines: &[Line]) -> f64 {
    lines.iter().map(Line::length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn rows() -> Vec<Line> {
        (0..4)
            .map(|i| Line::new(0.0, i as f64 * 5.0, 100.0, i as f64 * 5.0))
            .collect()
    }

    #[test]
    fn empty_lines_give_empty_path() {
        assert!(sequence_waypoints(&[]).is_empty());
        assert_eq!(transit_distance(&[]), 0.0);
    }

    #[test]
    fn two_waypoints_per_line() {
        assert_eq!(sequence_waypoints(&rows()).len(), 8);
    }

    #[test]
    fn direction_alternates_starting_forward() {
        let path = sequence_waypoints(&rows());
        assert_eq!(path[0], Point::new(0.0, 0.0));
        assert_eq!(path[1], Point::new(100.0, 0.0));
        assert_eq!(path[2], Point::new(100.0, 5.0));
        assert_eq!(path[3], Point::new(0.0, 5.0));
        assert_eq!(path[4], Point::new(0.0, 10.0));
        assert_eq!(path[7], Point::new(0.0, 15.0));
    }

    #[test]
    fn same_side_never_reverses() {
        let path = sequence_with_pattern(&rows(), TraversalPattern::SameSide);
        for pair in path.chunks_exact(2) {
            assert_eq!(pair[0].x, 0.0);
            assert_eq!(pair[1].x, 100.0);
        }
    }

    #[test]
    fn alternating_transit_is_row_spacing() {
        let lines = rows();
        let zigzag = transit_distance(&sequence_waypoints(&lines));
        let same_side = transit_distance(&sequence_with_pattern(&lines, TraversalPattern::SameSide));
        assert!((zigzag - 15.0).abs() < 1e-9);
        assert!(same_side > zigzag);
        assert!((working_distance(&lines) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn pattern_parsing() {
        assert_eq!(TraversalPattern::from_name("Boustrophedon"), Some(TraversalPattern::Boustrophedon));
        assert_eq!(TraversalPattern::from_name("same-side"), Some(TraversalPattern::SameSide));
        assert_eq!(TraversalPattern::from_name("spiral"), None);
        assert_eq!(TraversalPattern::all().len(), 2);
    }
}
