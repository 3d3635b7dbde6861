/// Interleaved `[x, y, z, u, v]` per vertex.
pub const VERTEX_STRIDE: usize = 5;

/// Largest subdivision whose vertex count still fits u16 indices.
pub const MAX_SEGMENTS: u16 = 127;

/// Unit plane in the xy plane, spanning [-0.5, 0.5]², facing +z.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGrid {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
}

pub fn plane_grid(segments: u16) -> PlaneGrid {
    let n = segments.clamp(1, MAX_SEGMENTS);
    let row = n + 1;
    let mut vertices = Vec::with_capacity(row as usize * row as usize * VERTEX_STRIDE);
    for iy in 0..row {
        let v = iy as f32 / n as f32;
        for ix in 0..row {
            let u = ix as f32 / n as f32;
            vertices.extend_from_slice(&[u - 0.5, v - 0.5, 0.0, u, v]);
        }
    }

    let mut indices = Vec::with_capacity(n as usize * n as usize * 6);
    for iy in 0..n {
        for ix in 0..n {
            let a = iy * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    PlaneGrid { vertices, indices }
}

impl PlaneGrid {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(g: &PlaneGrid, i: u16) -> [f32; 3] {
        let o = i as usize * VERTEX_STRIDE;
        [g.vertices[o], g.vertices[o + 1], g.vertices[o + 2]]
    }

    #[test]
    fn single_segment_is_a_quad() {
        let g = plane_grid(1);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.indices, vec![0, 1, 3, 0, 3, 2]);
        assert_eq!(&g.vertices[..5], &[-0.5, -0.5, 0.0, 0.0, 0.0]);
        assert_eq!(&g.vertices[15..], &[0.5, 0.5, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn segments_are_clamped() {
        assert_eq!(plane_grid(0).vertex_count(), 4);
        let big = plane_grid(u16::MAX);
        assert_eq!(big.vertex_count(), 128 * 128);
        assert!(big.indices.iter().all(|&i| (i as usize) < big.vertex_count()));
    }

    #[test]
    fn triangles_wind_counter_clockwise() {
        let g = plane_grid(4);
        for tri in g.indices.chunks(3) {
            let [a, b, c] = [position(&g, tri[0]), position(&g, tri[1]), position(&g, tri[2])];
            let cross_z = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross_z > 0.0);
        }
    }
}
