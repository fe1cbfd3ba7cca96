/// Golden-angle spiral of `per_blob` points inside a disc of `radius`
/// around each center. Deterministic and evenly filled.
pub fn blobs_2d(centers: &[[f32; 2]], per_blob: usize, radius: f32) -> Vec<f32> {
    assert!(per_blob > 0, "blobs need at least one point");
    let golden = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());
    let mut out = Vec::with_capacity(centers.len() * per_blob * 2);
    for c in centers {
        for k in 0..per_blob {
            let r = radius * ((k as f32 + 0.5) / per_blob as f32).sqrt();
            let theta = k as f32 * golden;
            out.push(c[0] + r * theta.cos());
            out.push(c[1] + r * theta.sin());
        }
    }
    out
}

/// Uniform pseudo-random points in `[0, extent)^dim` from a fixed seed.
pub fn uniform_points(n: usize, dim: usize, extent: f32, seed: u64) -> Vec<f32> {
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    let mut out = Vec::with_capacity(n * dim);
    for _ in 0..n * dim {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = ((state >> 40) as f32) / ((1u64 << 24) as f32);
        out.push(unit * extent);
    }
    out
}
