//! Scripted balloon flight path
//!
//! The path is a fixed piecewise-parametric curve over a single progress
//! scalar. Each segment contributes a closed-form transform evaluated at a
//! locally clamped sub-progress, composed onto the accumulated transform by
//! post-multiplication: once a segment's interval is passed its contribution
//! freezes at the interval length, and only the active segment keeps evolving.
//! This keeps the path authorable as independent closed-form pieces with no
//! numerical integration or spline machinery.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

/// Progress value at which a balloon has escaped the terrain.
pub const PATH_END: f32 = 314.25;

/// Where balloons enter the world (progress 0).
pub const PATH_SPAWN: Vec3 = Vec3::new(60.0, 0.0, -30.0);

/// Closed-form motion of one path segment, parameterized by the locally
/// clamped sub-progress `local` in `[0, len]`.
#[derive(Debug, Clone, Copy)]
enum SegmentMotion {
    /// Upward parabolic arc ending `height` above the segment start.
    Rise { height: f32 },
    /// Straight lateral translation along the local -x axis.
    Lateral { rate: f32 },
    /// Lateral translation with a sinusoidal vertical bob.
    Weave { rate: f32, amp: f32, freq: f32 },
    /// Rotation about a point offset from the local origin, turning the
    /// local frame by `turn` radians over the segment.
    Pivot { turn: f32, radius: f32 },
    /// Final downward parabolic arc, `depth` below the segment start.
    Dive { depth: f32 },
}

#[derive(Debug, Clone, Copy)]
struct PathSegment {
    start: f32,
    len: f32,
    motion: SegmentMotion,
}

impl PathSegment {
    fn contribution(&self, local: f32) -> Mat4 {
        let u = (local / self.len).clamp(0.0, 1.0);
        match self.motion {
            SegmentMotion::Rise { height } => {
                Mat4::from_translation(Vec3::new(0.0, height * (2.0 * u - u * u), 0.0))
            }
            SegmentMotion::Lateral { rate } => {
                Mat4::from_translation(Vec3::new(-rate * local, 0.0, 0.0))
            }
            SegmentMotion::Weave { rate, amp, freq } => Mat4::from_translation(Vec3::new(
                -rate * local,
                amp * (freq * local).sin(),
                0.0,
            )),
            SegmentMotion::Pivot { turn, radius } => {
                let pivot = Vec3::new(0.0, 0.0, -radius);
                Mat4::from_translation(pivot)
                    * Mat4::from_rotation_y(turn * u)
                    * Mat4::from_translation(-pivot)
            }
            SegmentMotion::Dive { depth } => {
                Mat4::from_translation(Vec3::new(0.0, -depth * u * u, 0.0))
            }
        }
    }
}

const SEGMENTS: [PathSegment; 10] = [
    PathSegment {
        start: 0.0,
        len: 5.0,
        motion: SegmentMotion::Rise { height: 12.0 },
    },
    PathSegment {
        start: 5.0,
        len: 5.0,
        motion: SegmentMotion::Lateral { rate: 1.5 },
    },
    PathSegment {
        start: 10.0,
        len: 31.4,
        motion: SegmentMotion::Weave {
            rate: 1.5,
            amp: 1.5,
            freq: 0.5,
        },
    },
    PathSegment {
        start: 41.4,
        len: 18.6,
        motion: SegmentMotion::Pivot {
            turn: -FRAC_PI_2,
            radius: 8.0,
        },
    },
    PathSegment {
        start: 60.0,
        len: 20.0,
        motion: SegmentMotion::Lateral { rate: 1.5 },
    },
    PathSegment {
        start: 80.0,
        len: 5.0,
        motion: SegmentMotion::Pivot {
            turn: -FRAC_PI_2,
            radius: 6.0,
        },
    },
    PathSegment {
        start: 85.0,
        len: 50.0,
        motion: SegmentMotion::Weave {
            rate: 1.5,
            amp: 2.0,
            freq: 0.4,
        },
    },
    PathSegment {
        start: 135.0,
        len: 80.0,
        motion: SegmentMotion::Pivot {
            turn: PI,
            radius: 10.0,
        },
    },
    PathSegment {
        start: 215.0,
        len: 94.25,
        motion: SegmentMotion::Weave {
            rate: 1.5,
            amp: 1.5,
            freq: 0.3,
        },
    },
    PathSegment {
        start: 309.25,
        len: 5.0,
        motion: SegmentMotion::Dive { depth: 12.0 },
    },
];

/// Segment interval boundaries, most advanced last. The spatial cluster index
/// partitions the path along these same intervals.
pub fn segment_bounds() -> impl Iterator<Item = (f32, f32)> {
    SEGMENTS.iter().map(|s| (s.start, s.start + s.len))
}

/// World transform of a balloon at the given path progress.
pub fn path_transform(progress: f32) -> Mat4 {
    let mut m = Mat4::from_translation(PATH_SPAWN);
    for seg in &SEGMENTS {
        if progress <= seg.start {
            break;
        }
        let local = (progress - seg.start).min(seg.len);
        m *= seg.contribution(local);
    }
    m
}

/// Whether the progress scalar has passed the terminal waypoint.
#[inline]
pub fn reached_end(progress: f32) -> bool {
    progress >= PATH_END
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::translation_of;

    fn pos(progress: f32) -> Vec3 {
        translation_of(&path_transform(progress))
    }

    #[test]
    fn test_spawn_position_at_zero_progress() {
        assert_eq!(pos(0.0), PATH_SPAWN);
    }

    #[test]
    fn test_rise_segment_ends_at_full_height() {
        let p = pos(5.0);
        assert!((p.y - (PATH_SPAWN.y + 12.0)).abs() < 1e-4);
        assert!((p.x - PATH_SPAWN.x).abs() < 1e-4);
    }

    #[test]
    fn test_boundary_transforms_match_manual_composition() {
        // Compose the first four segments by hand in post-multiplication
        // order and compare against the table-driven result at each boundary.
        let spawn = Mat4::from_translation(PATH_SPAWN);
        let rise = Mat4::from_translation(Vec3::new(0.0, 12.0, 0.0));
        let lateral = Mat4::from_translation(Vec3::new(-1.5 * 5.0, 0.0, 0.0));
        let weave = Mat4::from_translation(Vec3::new(
            -1.5 * 31.4,
            1.5 * (0.5f32 * 31.4).sin(),
            0.0,
        ));
        let pivot_pt = Vec3::new(0.0, 0.0, -8.0);
        let pivot = Mat4::from_translation(pivot_pt)
            * Mat4::from_rotation_y(-FRAC_PI_2)
            * Mat4::from_translation(-pivot_pt);

        let cases: [(f32, Mat4); 4] = [
            (5.0, spawn * rise),
            (10.0, spawn * rise * lateral),
            (41.4, spawn * rise * lateral * weave),
            (60.0, spawn * rise * lateral * weave * pivot),
        ];
        for (progress, expected) in cases {
            let got = path_transform(progress);
            assert!(
                got.abs_diff_eq(expected, 1e-3),
                "mismatch at progress {progress}: {got:?} vs {expected:?}"
            );
        }
    }

    #[test]
    fn test_completed_segments_stay_frozen() {
        // Advancing within the lateral segment must not disturb the rise
        // contribution: only x changes between these two samples.
        let a = pos(6.0);
        let b = pos(9.0);
        assert!((a.y - b.y).abs() < 1e-4);
        assert!((a.z - b.z).abs() < 1e-4);
        assert!(b.x < a.x);
    }

    #[test]
    fn test_path_is_continuous_across_boundaries() {
        for (start, end) in segment_bounds() {
            for boundary in [start, end] {
                if boundary == 0.0 {
                    continue;
                }
                let before = pos(boundary - 1e-3);
                let after = pos(boundary + 1e-3);
                assert!(
                    before.distance(after) < 0.1,
                    "discontinuity at progress {boundary}"
                );
            }
        }
    }

    #[test]
    fn test_quarter_pivot_turns_heading() {
        // Heading just before the first pivot vs just after it should be
        // roughly perpendicular.
        let pre = (pos(41.0) - pos(40.0)).normalize();
        let post = (pos(62.0) - pos(61.0)).normalize();
        assert!(pre.dot(post).abs() < 0.1, "dot = {}", pre.dot(post));
    }

    #[test]
    fn test_path_stays_inside_terrain_envelope() {
        let mut progress = 0.0;
        while progress <= PATH_END {
            let p = pos(progress);
            assert!(p.x.abs() <= consts::TERRAIN_HALF_EXTENT, "x out at {progress}");
            assert!(p.z.abs() <= consts::TERRAIN_HALF_EXTENT, "z out at {progress}");
            assert!(p.y >= consts::TERRAIN_FLOOR && p.y <= consts::TERRAIN_CEILING);
            progress += 0.25;
        }
    }

    #[test]
    fn test_reached_end_boundary() {
        assert!(!reached_end(314.0));
        assert!(reached_end(314.25));
        assert!(reached_end(400.0));
    }
}
