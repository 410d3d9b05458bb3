//! Monotone cubic sampling and rectangle clipping for series polylines.

/// Pixel-space point.
pub type Pt = (f64, f64);

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Tangents of a monotone-in-x cubic through `pts` (Steffen's method).
/// `pts` must be ascending in x.
fn tangents(pts: &[Pt]) -> Vec<f64> {
    let n = pts.len();
    let mut t = vec![0.0; n];
    if n < 2 {
        return t;
    }
    let secant = |i: usize| (pts[i + 1].1 - pts[i].1) / (pts[i + 1].0 - pts[i].0);
    if n == 2 {
        t[0] = secant(0);
        t[1] = t[0];
        return t;
    }
    for i in 1..n - 1 {
        let h0 = pts[i].0 - pts[i - 1].0;
        let h1 = pts[i + 1].0 - pts[i].0;
        let (s0, s1) = (secant(i - 1), secant(i));
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        t[i] = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    }
    t[0] = (3.0 * secant(0) - t[1]) / 2.0;
    t[n - 1] = (3.0 * secant(n - 2) - t[n - 2]) / 2.0;
    t
}

/// Sample the monotone curve through `pts`, `steps` samples per segment.
///
/// The curve passes through every input point and never overshoots between
/// two of them. Fewer than three points come back as straight segments.
pub fn monotone_samples(pts: &[Pt], steps: usize) -> Vec<Pt> {
    if pts.len() < 3 || steps < 2 {
        return pts.to_vec();
    }
    let t = tangents(pts);
    let mut out = Vec::with_capacity((pts.len() - 1) * steps + 1);
    out.push(pts[0]);
    for i in 0..pts.len() - 1 {
        let ((x0, y0), (x1, y1)) = (pts[i], pts[i + 1]);
        let dx = x1 - x0;
        for k in 1..=steps {
            let u = k as f64 / steps as f64;
            let (u2, u3) = (u * u, u * u * u);
            let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
            let h10 = u3 - 2.0 * u2 + u;
            let h01 = -2.0 * u3 + 3.0 * u2;
            let h11 = u3 - u2;
            let y = h00 * y0 + h10 * dx * t[i] + h01 * y1 + h11 * dx * t[i + 1];
            out.push((x0 + u * dx, y));
        }
    }
    out
}

/// Liang–Barsky clip of segment `a`-`b` to the box.
fn clip_segment(a: Pt, b: Pt, (x0, y0, x1, y1): (f64, f64, f64, f64)) -> Option<(Pt, Pt)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-dx, a.0 - x0),
        (dx, x1 - a.0),
        (-dy, a.1 - y0),
        (dy, y1 - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Cut a polyline to the box `[0, width] x [0, height]`.
///
/// Returns the visible runs; a run breaks wherever the line leaves the box.
pub fn clip_polyline(pts: &[Pt], width: f64, height: f64) -> Vec<Vec<Pt>> {
    let bounds = (0.0, 0.0, width, height);
    let mut runs: Vec<Vec<Pt>> = Vec::new();
    let mut cur: Vec<Pt> = Vec::new();
    for w in pts.windows(2) {
        match clip_segment(w[0], w[1], bounds) {
            Some((a, b)) => {
                if cur.last() != Some(&a) {
                    if cur.len() > 1 {
                        runs.push(std::mem::take(&mut cur));
                    }
                    cur.clear();
                    cur.push(a);
                }
                cur.push(b);
            }
            None => {
                if cur.len() > 1 {
                    runs.push(std::mem::take(&mut cur));
                }
                cur.clear();
            }
        }
    }
    if cur.len() > 1 {
        runs.push(cur);
    }
    runs
}
