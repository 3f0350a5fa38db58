//! Bowyer–Watson Delaunay triangulation.
//!
//! Triangles keep neighbour links so each insertion only touches its own
//! cavity: the containing triangle is found by walking from the previous
//! insertion, and the cavity grows through neighbours whose circumcircle
//! holds the new point. Points are inserted in strip order so consecutive
//! insertions stay close and walks stay short.

use super::{incircle, orient2d};
use config::constants::SUPER_TRIANGLE_SCALE;
use glam::DVec2;

const NONE: usize = usize::MAX;

/// Triangle soup with neighbour links. `nbr[t][i]` is the triangle across
/// the edge opposite vertex `i`, i.e. edge `(v[i + 1], v[i + 2])`.
struct Mesh {
    vertices: Vec<DVec2>,
    tris: Vec<[usize; 3]>,
    nbr: Vec<[usize; 3]>,
    alive: Vec<bool>,
    /// Insertion stamp of the last cavity search that visited a triangle.
    seen: Vec<usize>,
    /// Insertion stamp of the last cavity a triangle belonged to.
    bad: Vec<usize>,
}

impl Mesh {
    fn push(&mut self, tri: [usize; 3], nbr: [usize; 3]) -> usize {
        self.tris.push(tri);
        self.nbr.push(nbr);
        self.alive.push(true);
        self.seen.push(0);
        self.bad.push(0);
        self.tris.len() - 1
    }

    fn in_circle(&self, t: usize, p: DVec2) -> bool {
        let [a, b, c] = self.tris[t];
        incircle(self.vertices[a], self.vertices[b], self.vertices[c], p) > 0.0
    }

    /// Triangle whose closed area contains `p`, walking from `start`.
    fn locate(&self, start: usize, p: DVec2) -> Option<usize> {
        let mut t = start;
        let mut steps = 0;
        'walk: while steps <= self.tris.len() {
            steps += 1;
            let v = self.tris[t];
            for i in 0..3 {
                let (a, b) = (v[(i + 1) % 3], v[(i + 2) % 3]);
                if orient2d(self.vertices[a], self.vertices[b], p) < 0.0 {
                    let next = self.nbr[t][i];
                    if next == NONE {
                        return None;
                    }
                    t = next;
                    continue 'walk;
                }
            }
            return Some(t);
        }
        // A visibility walk cannot cycle on a Delaunay mesh; scan if it does.
        (0..self.tris.len()).find(|&t| {
            self.alive[t] && {
                let v = self.tris[t];
                (0..3).all(|i| {
                    orient2d(self.vertices[v[(i + 1) % 3]], self.vertices[v[(i + 2) % 3]], p)
                        >= 0.0
                })
            }
        })
    }

    /// Inserts vertex `pi`; returns a triangle touching it, or `None` when
    /// the point duplicates an existing vertex.
    fn insert(&mut self, pi: usize, start: usize, stamp: usize) -> Option<usize> {
        let p = self.vertices[pi];
        let t0 = self.locate(start, p)?;
        if self.tris[t0].iter().any(|&v| self.vertices[v] == p) {
            return None;
        }

        let mut cavity = vec![t0];
        self.seen[t0] = stamp;
        self.bad[t0] = stamp;
        let mut k = 0;
        while k < cavity.len() {
            let t = cavity[k];
            k += 1;
            for n in self.nbr[t] {
                if n == NONE || self.seen[n] == stamp {
                    continue;
                }
                self.seen[n] = stamp;
                if self.in_circle(n, p) {
                    self.bad[n] = stamp;
                    cavity.push(n);
                }
            }
        }

        // Boundary edges (a, b) with the triangle outside each of them.
        let mut fan: Vec<(usize, usize, usize, usize)> = Vec::new();
        for &t in &cavity {
            let v = self.tris[t];
            for i in 0..3 {
                let n = self.nbr[t][i];
                if n == NONE || self.bad[n] != stamp {
                    fan.push((v[(i + 1) % 3], v[(i + 2) % 3], n, t));
                }
            }
            self.alive[t] = false;
        }

        let first = self.tris.len();
        for &(a, b, outside, old) in &fan {
            let new = self.push([a, b, pi], [NONE, NONE, outside]);
            if outside != NONE {
                if let Some(j) = self.nbr[outside].iter().position(|&n| n == old) {
                    self.nbr[outside][j] = new;
                }
            }
        }
        for (offset, &(a, b, _, _)) in fan.iter().enumerate() {
            let t = first + offset;
            // Edge (b, p) is shared with the fan triangle starting at b,
            // edge (p, a) with the one ending at a.
            if let Some(next) = fan.iter().position(|&(s, ..)| s == b) {
                self.nbr[t][0] = first + next;
            }
            if let Some(prev) = fan.iter().position(|&(_, e, ..)| e == a) {
                self.nbr[t][1] = first + prev;
            }
        }
        Some(first)
    }
}

/// Indices of `points` ordered in alternating vertical strips.
fn strip_order(points: &[DVec2], min: DVec2, max: DVec2) -> Vec<usize> {
    let strips = ((points.len() as f64).sqrt() / 2.0).ceil().max(1.0);
    let width = ((max.x - min.x) / strips).max(f64::MIN_POSITIVE);
    let strip = |p: DVec2| (((p.x - min.x) / width) as usize).min(strips as usize - 1);

    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (points[i], points[j]);
        let (sa, sb) = (strip(a), strip(b));
        sa.cmp(&sb).then_with(|| {
            if sa % 2 == 0 {
                a.y.total_cmp(&b.y)
            } else {
                b.y.total_cmp(&a.y)
            }
        })
    });
    order
}

/// Triangulates a planar point set.
///
/// Returns counter-clockwise index triples into `points`. Co-circular ties
/// are broken by insertion order, so the result is a valid (not necessarily
/// unique) Delaunay triangulation. Exact duplicates are skipped and fully
/// collinear inputs yield no triangles.
///
/// # Example
///
/// ```rust
/// use carve_core::geometry::delaunay;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// assert_eq!(delaunay(&square).len(), 2);
/// ```
pub fn delaunay(points: &[DVec2]) -> Vec<[usize; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }

    let (min, max) = points
        .iter()
        .fold((points[0], points[0]), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    let mid = (min + max) / 2.0;
    let reach = (max - min).max_element().max(1.0) * SUPER_TRIANGLE_SCALE;

    let mut vertices = points.to_vec();
    let s0 = vertices.len();
    vertices.push(mid + DVec2::new(-reach, -reach));
    vertices.push(mid + DVec2::new(reach, -reach));
    vertices.push(mid + DVec2::new(0.0, reach));

    let mut mesh = Mesh {
        vertices,
        tris: Vec::with_capacity(points.len() * 4),
        nbr: Vec::with_capacity(points.len() * 4),
        alive: Vec::new(),
        seen: Vec::new(),
        bad: Vec::new(),
    };
    let mut last = mesh.push([s0, s0 + 1, s0 + 2], [NONE; 3]);

    for (stamp, i) in strip_order(points, min, max).into_iter().enumerate() {
        if let Some(t) = mesh.insert(i, last, stamp + 1) {
            last = t;
        }
    }

    let Mesh {
        vertices,
        tris,
        alive,
        ..
    } = mesh;
    let mut triangles: Vec<[usize; 3]> = tris
        .into_iter()
        .zip(alive)
        .filter(|(t, alive)| {
            *alive
                && t.iter().all(|&v| v < s0)
                && orient2d(vertices[t[0]], vertices[t[1]], vertices[t[2]]) > 0.0
        })
        .map(|(t, _)| t)
        .collect();
    triangles.sort_unstable();
    triangles
}
