use crate::core::geometry::Vertex;
use crate::core::math::transform::TransformFactory;
use crate::scene::mesh::Mesh;
use crate::scene::normals::accumulate_vertex_normals;
use log::info;
use nalgebra::{Matrix4, Point3, Vector3};

/// Hand-modeled right half of a face, digitized in roughly centimetre units
/// (x right, y up, z toward the viewer; the nose sits near the origin).
///
/// The table is 1-based: entry 0 is a reserved placeholder so the authored
/// face indices below can be used directly as buffer indices. A handful of
/// entries (11, 12, 16-18, 41, 45) were abandoned during modeling and are
/// referenced by no face; they stay in the table to keep the numbering
/// stable and end up with zero normals.
#[rustfmt::skip]
const POINTS: [[f32; 3]; 51] = [
    [0.0, 0.0, 0.0],
    // 1-5: hairline and brow ridge
    [0.0, 8.0, -2.25], [1.75, 8.0, -2.25], [3.5, 7.0, -2.25], [6.0, 5.5, -2.25], [6.85, 2.7, -2.45],
    // 6-10: temple and jaw silhouette
    [7.0, 0.55, -2.45], [7.0, -1.6, -2.4], [6.0, -4.1, -2.4], [5.0, -6.1, -2.25], [2.7, 4.9, -1.0],
    // 11-15: upper lip and philtrum region
    [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, -2.5, -0.7], [1.3, -1.4, -1.0], [2.1, 0.9, -1.0],
    // 16-20: cheekbone
    [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [4.9, -1.5, -1.1], [5.0, 0.6, -1.15],
    // 21-25: eye socket and brow
    [6.0, 2.7, -1.85], [5.0, 4.5, -1.15], [4.6, 2.7, -1.12], [2.9, 3.0, -1.11], [0.0, 6.75, -1.15],
    // 26-30: forehead and nose bridge
    [3.0, 5.7, -1.15], [1.25, 6.75, -1.15], [0.0, 3.6, -1.0], [1.2, 5.0, -1.0], [1.2, 3.6, -1.2],
    // 31-35: nose ridge down the center line
    [0.0, 5.0, -1.0], [0.0, 2.5, -1.0], [0.0, 1.0, -0.5], [0.0, 0.0, 0.0], [1.1, 2.6, -1.13],
    // 36-40: nostril and nasolabial fold
    [1.0, 1.0, -1.0], [1.2, -0.1, -1.0], [2.5, -2.5, -1.0], [0.0, -1.6, 0.0], [2.7, 0.0, -1.1],
    // 41-45: mouth corner
    [0.0, 0.0, 0.0], [0.0, -3.8, -1.2], [1.9, -3.9, -1.0], [3.8, -4.0, -1.0], [0.0, 0.0, 0.0],
    // 46-50: chin and jawline
    [2.0, -6.9, -1.5], [2.0, -5.2, -1.0], [0.0, -5.7, -0.7], [0.0, -6.9, -1.6], [4.0, -5.2, -1.0],
];

/// Triangulation of the point table, wound so the accumulated normals point
/// toward the viewer.
#[rustfmt::skip]
const FACES: [[u32; 3]; 58] = [
    [1, 25, 27], [1, 27, 2], [2, 27, 26], [2, 26, 3], [3, 26, 22], [3, 22, 4], [25, 31, 29], [25, 29, 27],
    [27, 29, 10], [27, 10, 26], [26, 10, 22], [31, 28, 30], [31, 30, 29], [29, 30, 24], [29, 24, 10],
    [22, 23, 21], [10, 24, 23], [10, 23, 22], [22, 21, 5], [4, 22, 5], [23, 20, 21], [21, 20, 5], [5, 20, 6], [28, 32, 35],
    [28, 35, 30], [32, 33, 36], [32, 36, 35], [35, 36, 15], [33, 34, 37], [33, 37, 36], [36, 37, 40],
    [36, 40, 15], [40, 19, 20], [20, 19, 7], [20, 7, 6], [40, 38, 19], [34, 39, 14], [34, 14, 37],
    [39, 13, 38], [39, 38, 14], [37, 14, 38], [37, 38, 40], [13, 42, 43], [13, 43, 38], [38, 43, 44],
    [19, 44, 8], [19, 8, 7], [42, 48, 47], [42, 47, 43], [43, 47, 50], [43, 50, 44], [44, 50, 8],
    [48, 49, 46], [48, 46, 47], [47, 46, 9], [47, 9, 50], [50, 9, 8], [38, 44, 19],
];

/// Shrinks the authored units to clip-friendly size; the extra vertical
/// factor restores the proportions lost during digitizing.
const MODEL_SCALE: [f32; 3] = [0.02, 0.03, 0.02];

/// Object-to-world transform for the face mesh.
pub fn model_transform() -> Matrix4<f32> {
    TransformFactory::scaling_nonuniform(&Vector3::new(
        MODEL_SCALE[0],
        MODEL_SCALE[1],
        MODEL_SCALE[2],
    ))
}

/// Builds the face mesh: validates the index table and derives smooth
/// per-vertex normals from the triangulation.
pub fn face_mesh() -> Result<Mesh, String> {
    let positions: Vec<Point3<f32>> = POINTS.iter().map(|p| Point3::from(*p)).collect();
    let indices: Vec<u32> = FACES.iter().flatten().copied().collect();

    let normals = accumulate_vertex_normals(&positions, &indices)
        .map_err(|e| format!("Face mesh data is malformed: {e}"))?;

    let vertices: Vec<Vertex> = positions
        .into_iter()
        .zip(normals)
        .map(|(position, normal)| Vertex::new(position, normal))
        .collect();

    info!(
        "Face mesh built: {} vertices, {} triangles",
        vertices.len(),
        indices.len() / 3
    );

    Ok(Mesh::new(vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn face_mesh_builds_and_validates() {
        let mesh = face_mesh().unwrap();
        assert_eq!(mesh.vertices.len(), POINTS.len());
        assert_eq!(mesh.indices.len(), FACES.len() * 3);
    }

    #[test]
    fn referenced_vertices_have_unit_normals() {
        let mesh = face_mesh().unwrap();
        let referenced: HashSet<u32> = mesh.indices.iter().copied().collect();

        for (i, vertex) in mesh.vertices.iter().enumerate() {
            let norm = vertex.normal.norm();
            if referenced.contains(&(i as u32)) {
                assert!(
                    (norm - 1.0).abs() < 1e-5,
                    "vertex {i} normal length {norm}"
                );
            } else {
                assert_eq!(norm, 0.0, "placeholder vertex {i} should stay zero");
            }
        }
    }

    #[test]
    fn placeholder_entry_zero_is_never_referenced() {
        let mesh = face_mesh().unwrap();
        assert!(mesh.indices.iter().all(|&i| i != 0));
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }
}
